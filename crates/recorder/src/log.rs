//! JSON frame log
//!
//! One record per frame with the grid as `#`/`.` strings, handy for diffing
//! runs and for golden tests.

use std::path::Path;

use serde::{Deserialize, Serialize};

use qr_tetris_core::{Frame, FrameSink, Grid, SinkError};

use crate::error::Result;
use crate::output::write_atomic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub index: usize,
    pub fast: bool,
    pub duration_ms: u64,
    pub rows: Vec<String>,
}

impl FrameRecord {
    pub fn new(index: usize, frame: &Frame) -> Self {
        Self {
            index,
            fast: frame.fast,
            duration_ms: u64::try_from(frame.duration.as_millis()).unwrap_or(u64::MAX),
            rows: grid_rows(&frame.grid),
        }
    }
}

/// Grid rows as text, `#` for dark modules
pub fn grid_rows(grid: &Grid) -> Vec<String> {
    grid.rows()
        .map(|row| row.iter().map(|&c| if c { '#' } else { '.' }).collect())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLog {
    pub frames: Vec<FrameRecord>,
}

impl FrameLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the log as pretty JSON
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        write_atomic(path, json.as_bytes())?;
        tracing::info!(path = %path.display(), frames = self.frames.len(), "wrote frame log");
        Ok(())
    }
}

impl FrameSink for FrameLog {
    fn accept(&mut self, frame: &Frame) -> std::result::Result<(), SinkError> {
        let record = FrameRecord::new(self.frames.len(), frame);
        self.frames.push(record);
        Ok(())
    }
}

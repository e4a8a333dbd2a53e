//! Rendered frames and the sinks that consume them

use std::time::Duration;

use crate::error::SinkError;
use crate::grid::Grid;

/// Working grid snapshot plus how long to show it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub grid: Grid,
    pub duration: Duration,
    /// Drop step rendered with the fast interval
    pub fast: bool,
}

/// Consumer of rendered frames (terminal preview, GIF recorder, ...)
pub trait FrameSink {
    fn accept(&mut self, frame: &Frame) -> Result<(), SinkError>;
}

/// Collects frames in memory
impl FrameSink for Vec<Frame> {
    fn accept(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.push(frame.clone());
        Ok(())
    }
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn accept(&mut self, frame: &Frame) -> Result<(), SinkError> {
        (**self).accept(frame)
    }
}

/// Forwards each frame to several sinks in order
///
/// Stops at the first sink that fails.
#[derive(Default)]
pub struct Fanout<'a> {
    sinks: Vec<&'a mut dyn FrameSink>,
}

impl<'a> Fanout<'a> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn push(&mut self, sink: &'a mut dyn FrameSink) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl FrameSink for Fanout<'_> {
    fn accept(&mut self, frame: &Frame) -> Result<(), SinkError> {
        for sink in self.sinks.iter_mut() {
            sink.accept(frame)?;
        }
        Ok(())
    }
}

/// Counts frames without keeping them
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameCounter {
    pub frames: usize,
    pub fast_frames: usize,
    pub total: Duration,
}

impl FrameSink for FrameCounter {
    fn accept(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.frames += 1;
        if frame.fast {
            self.fast_frames += 1;
        }
        self.total += frame.duration;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl FrameSink for Failing {
        fn accept(&mut self, _frame: &Frame) -> Result<(), SinkError> {
            Err("disk full".into())
        }
    }

    fn frame(fast: bool) -> Frame {
        Frame {
            grid: Grid::new(2),
            duration: Duration::from_millis(if fast { 100 } else { 500 }),
            fast,
        }
    }

    #[test]
    fn fanout_feeds_every_sink() {
        let mut frames = Vec::new();
        let mut counter = FrameCounter::default();
        {
            let mut fanout = Fanout::new();
            fanout.push(&mut frames);
            fanout.push(&mut counter);
            fanout.accept(&frame(false)).unwrap();
            fanout.accept(&frame(true)).unwrap();
        }
        assert_eq!(frames.len(), 2);
        assert_eq!(counter.frames, 2);
        assert_eq!(counter.fast_frames, 1);
        assert_eq!(counter.total, Duration::from_millis(600));
    }

    #[test]
    fn fanout_stops_at_first_failure() {
        let mut failing = Failing;
        let mut counter = FrameCounter::default();
        {
            let mut fanout = Fanout::new();
            fanout.push(&mut failing);
            fanout.push(&mut counter);
            assert!(fanout.accept(&frame(false)).is_err());
        }
        assert_eq!(counter.frames, 0);
    }
}

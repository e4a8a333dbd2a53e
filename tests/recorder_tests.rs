//! Recorder tests - GIF output and the JSON frame log

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;

use qr_tetris::core::{run, Fanout, FrameSink, Grid, Program, RunConfig};
use qr_tetris::recorder::{FrameLog, GifOptions, GifRecorder, RecorderError};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("qr-tetris-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn record(program: &str, gif: &mut GifRecorder, log: &mut FrameLog) -> usize {
    let program = Program::parse(program).unwrap();
    let mut sinks = Fanout::new();
    sinks.push(gif);
    sinks.push(log);
    let (_, summary) = run(
        Grid::new(8),
        &program,
        RunConfig::default(),
        &mut sinks as &mut dyn FrameSink,
    )
    .unwrap();
    summary.frames
}

#[test]
fn test_gif_has_one_image_per_frame() {
    let mut gif = GifRecorder::new(GifOptions::new().with_scale(2));
    let mut log = FrameLog::new();
    // initial + spawn + 6 drop steps
    let frames = record("spawn square; drop", &mut gif, &mut log);
    assert_eq!(frames, 8);
    assert_eq!(gif.len(), 8);

    let bytes = gif.encode().unwrap();
    let decoder = GifDecoder::new(Cursor::new(bytes)).unwrap();
    let decoded = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(decoded.len(), 8);

    let side = (8 + 2 * 4) * 2;
    assert_eq!(decoded[0].buffer().dimensions(), (side, side));

    let (num, den) = decoded[0].delay().numer_denom_ms();
    assert_eq!(num / den, 500);
    let (num, den) = decoded[7].delay().numer_denom_ms();
    assert_eq!(num / den, 100);
}

#[test]
fn test_finish_writes_file_without_partial() {
    let dir = scratch_dir("gif");
    let path = dir.join("anim.gif");

    let mut gif = GifRecorder::new(GifOptions::new().with_scale(1));
    let mut log = FrameLog::new();
    record("spawn t; left 2; drop", &mut gif, &mut log);
    let written = gif.finish(&path).unwrap();

    assert_eq!(written, log.len());
    assert!(fs::read(&path).unwrap().starts_with(b"GIF89a"));
    assert!(!dir.join("anim.gif.partial").exists());
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_failed_write_creates_nothing() {
    let dir = scratch_dir("keep");
    let path = dir.join("missing-dir").join("anim.gif");

    assert!(matches!(
        GifRecorder::default().finish(&path),
        Err(RecorderError::Empty)
    ));

    let mut gif = GifRecorder::new(GifOptions::new().with_scale(1));
    let mut log = FrameLog::new();
    record("spawn i", &mut gif, &mut log);
    assert!(matches!(gif.finish(&path), Err(RecorderError::Io { .. })));
    assert!(!path.exists());
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_frame_log_round_trip_through_file() {
    let dir = scratch_dir("log");
    let path = dir.join("frames.json");

    let mut gif = GifRecorder::default();
    let mut log = FrameLog::new();
    record("spawn square; down 2; drop", &mut gif, &mut log);
    log.write(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["frames"].as_array().unwrap().len(), log.len());

    let loaded = FrameLog::from_json(&text).unwrap();
    assert_eq!(loaded, log);

    let first = &loaded.frames[0];
    assert_eq!(first.index, 0);
    assert!(!first.fast);
    assert_eq!(first.rows, vec!["........"; 8]);

    let last = loaded.frames.last().unwrap();
    assert!(last.fast);
    assert_eq!(last.duration_ms, Duration::from_millis(100).as_millis() as u64);
    assert_eq!(last.rows[7], "....##..");
    fs::remove_dir_all(dir).unwrap();
}

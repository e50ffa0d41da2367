use super::*;
use crate::foundation::core::{Bounds, Raster, Rgba16};
use crate::palette::palette::Palette;
use crate::render::text::{RowDispatch, render_text};

fn two_by_two() -> TextFrame {
    let raster = Raster::from_pixels(
        Bounds::from_size(2, 2),
        vec![Rgba16::BLACK, Rgba16::WHITE, Rgba16::WHITE, Rgba16::BLACK],
    )
    .unwrap();
    render_text(
        &raster,
        &Palette::from_chars(" #").unwrap(),
        RowDispatch::Sequential,
    )
}

#[test]
fn terminal_sink_clears_then_writes_rows() {
    let frame = two_by_two();
    let mut sink = TerminalSink::new(Vec::new());
    sink.begin_frame(0, true).unwrap();
    for line in frame.lines() {
        sink.write_line(&line).unwrap();
    }
    sink.end_frame().unwrap();
    let out = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(out, format!("{CLEAR_SCREEN} #\n# \n"));
}

#[test]
fn terminal_sink_can_skip_clear() {
    let mut sink = TerminalSink::new(Vec::new());
    sink.begin_frame(3, false).unwrap();
    sink.write_line("ab").unwrap();
    sink.end_frame().unwrap();
    assert_eq!(sink.into_inner(), b"ab\n");
}

#[test]
fn in_memory_sink_groups_lines_by_frame() {
    let mut sink = InMemorySink::default();
    sink.begin_frame(1, true).unwrap();
    sink.write_line("x").unwrap();
    sink.end_frame().unwrap();
    sink.begin_frame(2, false).unwrap();
    sink.write_line("y").unwrap();
    sink.write_line("z").unwrap();
    sink.end_frame().unwrap();
    assert_eq!(sink.frames.len(), 2);
    assert_eq!(sink.frames[0].index, 1);
    assert!(sink.frames[0].cleared);
    assert!(!sink.frames[1].cleared);
    assert_eq!(sink.frames[1].lines, vec!["y", "z"]);
}

#[test]
fn in_memory_sink_rejects_orphan_lines() {
    let mut sink = InMemorySink::default();
    assert!(sink.write_line("x").is_err());
}

#[test]
fn text_frames_are_separated_by_blank_lines() {
    let frame = two_by_two();
    let mut out = Vec::new();
    write_text_frames(&mut out, &[frame.clone(), frame]).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "\n #\n# \n\n #\n# \n");
}

use std::io::{self, Write};

use crate::render::text::TextFrame;

/// ANSI sequence that clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Destination for played-back text frames.
///
/// A frame is delivered as `begin_frame`, zero or more `write_line` calls, then `end_frame`.
/// Playback may stop a frame early, in which case fewer lines than the frame height arrive
/// before `end_frame`.
pub trait TextSink: Send {
    /// Start frame `index`. Terminal sinks clear the screen first when `clear` is set.
    fn begin_frame(&mut self, index: usize, clear: bool) -> io::Result<()>;

    /// Write one row of the current frame, without a line terminator.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Finish the current frame (for terminals: flush).
    fn end_frame(&mut self) -> io::Result<()>;
}

/// Terminal-style sink over any writer.
#[derive(Debug)]
pub struct TerminalSink<W> {
    out: W,
}

impl<W: Write + Send> TerminalSink<W> {
    /// Sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> TextSink for TerminalSink<W> {
    fn begin_frame(&mut self, _index: usize, clear: bool) -> io::Result<()> {
        if clear {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")
    }

    fn end_frame(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// A frame as seen by [`InMemorySink`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SinkFrame {
    /// Index of the frame in the played sequence.
    pub index: usize,
    /// Whether the frame was started with a clear.
    pub cleared: bool,
    /// Rows received, in order.
    pub lines: Vec<String>,
}

/// Sink that records every frame it receives.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    /// Frames in arrival order.
    pub frames: Vec<SinkFrame>,
}

impl TextSink for InMemorySink {
    fn begin_frame(&mut self, index: usize, clear: bool) -> io::Result<()> {
        self.frames.push(SinkFrame {
            index,
            cleared: clear,
            lines: Vec::new(),
        });
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.lines.push(line.to_owned());
                Ok(())
            }
            None => Err(io::Error::other("write_line before begin_frame")),
        }
    }

    fn end_frame(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Write frames as plain text: each frame is preceded by an empty line, one row per line.
pub fn write_text_frames<W: Write + ?Sized>(out: &mut W, frames: &[TextFrame]) -> io::Result<()> {
    for frame in frames {
        writeln!(out)?;
        write!(out, "{frame}")?;
    }
    out.flush()
}

#[cfg(test)]
#[path = "../../tests/unit/playback/sink.rs"]
mod tests;

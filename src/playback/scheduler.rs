use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use crate::animation::frame::LoopCount;
use crate::foundation::error::{GlyphError, GlyphResult, is_permanent_io};
use crate::playback::clock::{CancelToken, Clock, SystemClock};
use crate::playback::sink::TextSink;
use crate::render::text::TextFrame;

/// How many passes over the frame sequence to play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Loop until cancelled.
    #[default]
    Forever,
    /// A single pass, ending in [`PlaybackState::Done`].
    Once,
    /// This many passes (at least one).
    Times(u32),
}

impl LoopMode {
    fn pass_limit(self) -> Option<u64> {
        match self {
            Self::Forever => None,
            Self::Once => Some(1),
            Self::Times(n) => Some(u64::from(n.max(1))),
        }
    }
}

impl From<LoopCount> for LoopMode {
    fn from(count: LoopCount) -> Self {
        match count {
            LoopCount::Infinite => Self::Forever,
            LoopCount::Finite(n) => Self::Times(n),
        }
    }
}

/// Playback settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackOpts {
    /// Wall time of one delay unit. GIF delays are hundredths of a second.
    pub delay_unit: Duration,
    /// Number of passes.
    pub loop_mode: LoopMode,
    /// Whether each frame starts with a screen clear; passed to [`TextSink::begin_frame`].
    pub clear: bool,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            delay_unit: Duration::from_millis(10),
            loop_mode: LoopMode::Forever,
            clear: true,
        }
    }
}

/// Scheduler state, reported to observers on every transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum PlaybackState {
    /// Not started.
    #[default]
    Idle,
    /// Frame `i` was handed to the writer.
    Displaying(usize),
    /// Waiting out the display time of frame `i`.
    Sleeping(usize),
    /// Single-pass or counted playback finished.
    Done,
    /// Stopped through the [`CancelToken`].
    Cancelled,
    /// Stopped because the sink became unusable.
    Failed,
}

/// What happened during one [`Player::play`] call.
///
/// Every dispatched frame ends up in exactly one of `frames_shown`, `frames_truncated`,
/// `frames_dropped` or `write_errors`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PlaybackReport {
    /// Frames whose rows were all written.
    pub frames_shown: u64,
    /// Frames stopped mid-write because the next frame was due or playback was cancelled.
    pub frames_truncated: u64,
    /// Frames superseded before the writer started them.
    pub frames_dropped: u64,
    /// Frames abandoned after a transient sink error.
    pub write_errors: u64,
    /// Complete passes over the sequence.
    pub passes_completed: u64,
    /// State the scheduler stopped in.
    pub final_state: PlaybackState,
}

/// Display time for a frame: `units` delay units, with zero treated as one unit.
pub fn frame_delay(units: u32, unit: Duration) -> Duration {
    unit.saturating_mul(units.max(1))
}

type StateObserver = Box<dyn FnMut(PlaybackState) + Send>;

/// Real-time text frame player.
///
/// The calling thread runs the schedule while a writer thread owns the sink. Each frame is
/// posted to a single-slot mailbox; posting a newer frame replaces one the writer has not
/// picked up yet and makes the frame in flight stale, so the writer stops it before its next
/// line. The schedule therefore never waits on a slow sink.
pub struct Player<C = SystemClock> {
    opts: PlaybackOpts,
    clock: C,
    cancel: CancelToken,
    state: PlaybackState,
    observer: Option<StateObserver>,
}

impl Player<SystemClock> {
    /// Player on the wall clock.
    pub fn new(opts: PlaybackOpts) -> Self {
        Self::with_clock(opts, SystemClock::default())
    }
}

impl<C: Clock> Player<C> {
    /// Player on a custom clock.
    pub fn with_clock(opts: PlaybackOpts, clock: C) -> Self {
        Self {
            opts,
            clock,
            cancel: CancelToken::new(),
            state: PlaybackState::Idle,
            observer: None,
        }
    }

    /// Use `token` for cancellation instead of a private one.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Call `observer` on every state transition, on the playing thread.
    pub fn on_state(mut self, observer: impl FnMut(PlaybackState) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Token that stops playback from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Current (or final) state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Playback settings.
    pub fn opts(&self) -> &PlaybackOpts {
        &self.opts
    }

    /// The clock driving the schedule.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Play `frames` to `sink`, frame `i` shown for `delays[i]` delay units.
    ///
    /// Returns when the configured passes are complete or the cancel token fires. Transient
    /// write errors skip the frame and are counted; a permanent sink failure (for example a
    /// closed pipe) wakes the schedule at once, leaves the player in
    /// [`PlaybackState::Failed`] and returns [`GlyphError::SinkWrite`].
    #[tracing::instrument(skip_all, fields(frames = frames.len(), loop_mode = ?self.opts.loop_mode))]
    pub fn play<S>(
        &mut self,
        sink: &mut S,
        frames: &[TextFrame],
        delays: &[u32],
    ) -> GlyphResult<PlaybackReport>
    where
        S: TextSink + ?Sized,
    {
        if frames.is_empty() {
            return Err(GlyphError::EmptySequence);
        }
        if delays.len() != frames.len() {
            return Err(GlyphError::validation(format!(
                "got {} delays for {} frames",
                delays.len(),
                frames.len()
            )));
        }

        self.transition(PlaybackState::Idle);
        let mailbox = Mailbox::default();
        let gate = FrameGate::default();
        // Cancelled by the caller's token or by the writer when the sink fails.
        let halt = self.cancel.child_token();
        let clear = self.opts.clear;

        let (schedule, written) = thread::scope(|scope| -> GlyphResult<_> {
            let writer_end = WriterEnd {
                mailbox: &mailbox,
                gate: &gate,
                halt: &halt,
                clear,
            };
            let writer = thread::Builder::new()
                .name("glyphreel-playback".to_owned())
                .spawn_scoped(scope, move || write_frames(sink, frames, writer_end))
                .map_err(|e| {
                    GlyphError::Other(anyhow::Error::new(e).context("failed to spawn playback writer"))
                })?;

            let schedule = {
                let _close = CloseOnDrop(&mailbox);
                self.run_schedule(delays, &mailbox, &gate, &halt)
            };
            let written = writer
                .join()
                .map_err(|_| GlyphError::Other(anyhow::anyhow!("playback writer panicked")))?;
            Ok((schedule, written))
        })?;

        if written.is_err() && self.state != PlaybackState::Failed {
            self.transition(PlaybackState::Failed);
        }
        let tally = written.inspect_err(|e| {
            tracing::error!(error = %e, "playback stopped: sink unusable");
        })?;
        let report = PlaybackReport {
            frames_shown: tally.shown,
            frames_truncated: tally.truncated,
            frames_dropped: schedule.replaced + tally.stale,
            write_errors: tally.write_errors,
            passes_completed: schedule.passes,
            final_state: self.state,
        };
        tracing::info!(
            shown = report.frames_shown,
            truncated = report.frames_truncated,
            dropped = report.frames_dropped,
            write_errors = report.write_errors,
            passes = report.passes_completed,
            "playback finished"
        );
        Ok(report)
    }

    fn run_schedule(
        &mut self,
        delays: &[u32],
        mailbox: &Mailbox,
        gate: &FrameGate,
        halt: &CancelToken,
    ) -> Schedule {
        let mut out = Schedule::default();
        let limit = self.opts.loop_mode.pass_limit();
        let mut due = self.clock.now();
        loop {
            for (i, &units) in delays.iter().enumerate() {
                if halt.is_cancelled() {
                    self.stop_halted();
                    return out;
                }

                self.transition(PlaybackState::Displaying(i));
                let ticket = gate.advance();
                match mailbox.post(WriteJob { index: i, ticket }) {
                    Delivery::Queued => {}
                    Delivery::Replaced => {
                        out.replaced += 1;
                        tracing::debug!(frame = i, "writer behind; previous frame dropped");
                    }
                    Delivery::ReceiverGone => {
                        self.transition(PlaybackState::Failed);
                        return out;
                    }
                }

                self.transition(PlaybackState::Sleeping(i));
                // A schedule running more than one frame late restarts from now.
                let now = self.clock.now();
                due = due
                    .saturating_add(frame_delay(units, self.opts.delay_unit))
                    .max(now);
                if !self.clock.sleep(due - now, halt) {
                    self.stop_halted();
                    return out;
                }
            }
            out.passes += 1;
            if limit.is_some_and(|limit| out.passes >= limit) {
                self.transition(PlaybackState::Done);
                return out;
            }
        }
    }

    fn stop_halted(&mut self) {
        if self.cancel.is_cancelled() {
            self.transition(PlaybackState::Cancelled);
        } else {
            self.transition(PlaybackState::Failed);
        }
    }

    fn transition(&mut self, next: PlaybackState) {
        tracing::trace!(state = ?next, "playback state");
        self.state = next;
        if let Some(observer) = self.observer.as_mut() {
            observer(next);
        }
    }
}

#[derive(Debug, Default)]
struct Schedule {
    passes: u64,
    replaced: u64,
}

#[derive(Debug, Default)]
struct WriterTally {
    shown: u64,
    truncated: u64,
    stale: u64,
    write_errors: u64,
}

#[derive(Clone, Copy, Debug)]
struct WriteJob {
    index: usize,
    ticket: u64,
}

/// Generation counter; advancing it makes every earlier ticket stale.
#[derive(Debug, Default)]
struct FrameGate {
    generation: AtomicU64,
}

impl FrameGate {
    fn advance(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::Acquire) == ticket
    }
}

enum Delivery {
    Queued,
    Replaced,
    ReceiverGone,
}

#[derive(Debug, Default)]
struct Mailbox {
    state: Mutex<MailboxState>,
    ready: Condvar,
}

#[derive(Debug, Default)]
struct MailboxState {
    pending: Option<WriteJob>,
    closed: bool,
    receiver_gone: bool,
}

impl Mailbox {
    fn lock(&self) -> std::sync::MutexGuard<'_, MailboxState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn post(&self, job: WriteJob) -> Delivery {
        let mut state = self.lock();
        if state.receiver_gone {
            return Delivery::ReceiverGone;
        }
        let replaced = state.pending.replace(job).is_some();
        self.ready.notify_one();
        if replaced {
            Delivery::Replaced
        } else {
            Delivery::Queued
        }
    }

    // Blocks until a job is pending; `None` once closed and drained.
    fn take(&self) -> Option<WriteJob> {
        let mut state = self.lock();
        loop {
            if let Some(job) = state.pending.take() {
                return Some(job);
            }
            if state.closed {
                return None;
            }
            state = self.ready.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
    }

    fn hang_up(&self) {
        let mut state = self.lock();
        state.receiver_gone = true;
        state.pending = None;
    }
}

struct CloseOnDrop<'a>(&'a Mailbox);

impl Drop for CloseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Everything the writer thread shares with the schedule.
#[derive(Clone, Copy)]
struct WriterEnd<'a> {
    mailbox: &'a Mailbox,
    gate: &'a FrameGate,
    halt: &'a CancelToken,
    clear: bool,
}

impl WriterEnd<'_> {
    fn is_live(&self, ticket: u64) -> bool {
        !self.halt.is_cancelled() && self.gate.is_current(ticket)
    }
}

// Runs when the writer returns for any reason; the schedule stops posting and stops sleeping.
struct HangUpOnDrop<'a>(WriterEnd<'a>);

impl Drop for HangUpOnDrop<'_> {
    fn drop(&mut self) {
        self.0.mailbox.hang_up();
        self.0.halt.cancel();
    }
}

fn write_frames<S>(
    sink: &mut S,
    frames: &[TextFrame],
    end: WriterEnd<'_>,
) -> GlyphResult<WriterTally>
where
    S: TextSink + ?Sized,
{
    let _hang_up = HangUpOnDrop(end);
    let mut tally = WriterTally::default();
    while let Some(job) = end.mailbox.take() {
        if !end.is_live(job.ticket) {
            tally.stale += 1;
            continue;
        }
        match write_frame(sink, &frames[job.index], job, end) {
            Ok(true) => tally.shown += 1,
            Ok(false) => {
                tally.truncated += 1;
                tracing::debug!(frame = job.index, "frame truncated");
            }
            Err(e) if is_permanent_io(&e) => return Err(GlyphError::SinkWrite(e)),
            Err(e) => {
                tally.write_errors += 1;
                tracing::warn!(frame = job.index, error = %e, "sink write failed; skipping frame");
            }
        }
    }
    Ok(tally)
}

// Returns `Ok(false)` when the frame went stale or playback was cancelled mid-write.
fn write_frame<S>(
    sink: &mut S,
    frame: &TextFrame,
    job: WriteJob,
    end: WriterEnd<'_>,
) -> io::Result<bool>
where
    S: TextSink + ?Sized,
{
    sink.begin_frame(job.index, end.clear)?;
    for y in 0..frame.height() {
        if !end.is_live(job.ticket) {
            sink.end_frame()?;
            return Ok(false);
        }
        sink.write_line(&frame.line(y))?;
    }
    sink.end_frame()?;
    Ok(true)
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;

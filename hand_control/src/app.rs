//! The frame loop, and the wiring that builds it from an [`AppConfig`].
//!
//! One iteration: block on the next frame → classify → deliver admitted
//! events → show the preview and check for an exit request.  An idle poll
//! skips straight to the preview.  Everything runs on the calling thread
//! unless the sink is queued.

use gesture_core::{
    FramePipeline, NavKey, NavigationPipeline, PinchDetector, SignalGesture, SignalPipeline,
};
use hand_frame::{Frame, LandmarkSource, MirroredSource, Reading, ReplaySource, UdpLandmarkSource};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{AppConfig, Mode, SourceKind};
use crate::error::AppError;
use crate::preview::{Monitor, PreviewWindow};
use crate::sink::{EventSink, KeyboardSink, LogSink, QueuedSink, UdpSink};

// ════════════════════════════════════════════════════════════════════════════
// RunSummary
// ════════════════════════════════════════════════════════════════════════════

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The source has no more frames.
    EndOfStream,
    /// A frame could not be read or decoded.
    ReadFailure,
    /// The preview asked to exit (Escape or window closed).
    ExitRequested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub frames:            usize,
    /// Polls that returned no frame.
    pub idle_polls:        usize,
    pub events:            usize,
    pub failed_deliveries: usize,
    pub stop:              StopReason,
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the frame loop
// ════════════════════════════════════════════════════════════════════════════

/// Drive `pipeline` with frames from `source` until the stream ends, a frame
/// fails, or `monitor` asks to stop.
///
/// Frames without a capture timestamp are stamped with `clock`.  Idle polls
/// never reach the pipeline, so detector state survives gaps in the feed; the
/// monitor is shown the last frame again.  A failed delivery is logged and
/// counted; it never stops the loop.
pub fn run<P, S, K, C>(
    pipeline:    &mut P,
    source:      &mut S,
    sink:        &mut K,
    clock:       &C,
    mut monitor: Option<&mut dyn Monitor>,
) -> RunSummary
where
    P: FramePipeline,
    S: LandmarkSource + ?Sized,
    K: EventSink<P::Event> + ?Sized,
    C: Clock + ?Sized,
{
    let mut frames            = 0;
    let mut idle_polls        = 0;
    let mut events            = 0;
    let mut failed_deliveries = 0;
    let mut last_event: Option<String> = None;
    let mut shown = Frame::default();

    let stop = loop {
        match source.next_frame() {
            Ok(Some(Reading::Frame(frame))) => {
                frames += 1;
                events += deliver(pipeline, sink, clock, &frame, frames, &mut last_event, &mut failed_deliveries);
                shown = frame;
            }
            Ok(Some(Reading::Idle)) => idle_polls += 1,
            Ok(None) => {
                info!("landmark stream ended");
                break StopReason::EndOfStream;
            }
            Err(e) => {
                warn!(error = %e, "frame read failed, stopping");
                break StopReason::ReadFailure;
            }
        }

        if let Some(m) = monitor.as_deref_mut() {
            if !m.present(&shown, last_event.as_deref()) {
                info!("exit requested");
                break StopReason::ExitRequested;
            }
        }
    };

    RunSummary { frames, idle_polls, events, failed_deliveries, stop }
}

/// Classify one frame and hand its admitted events to `sink`.  Returns how
/// many events were admitted.
fn deliver<P, K, C>(
    pipeline:   &mut P,
    sink:       &mut K,
    clock:      &C,
    frame:      &Frame,
    index:      usize,
    last_event: &mut Option<String>,
    failed:     &mut usize,
) -> usize
where
    P: FramePipeline,
    K: EventSink<P::Event> + ?Sized,
    C: Clock + ?Sized,
{
    let now = frame.timestamp.unwrap_or_else(|| clock.now());
    let admitted = pipeline.process(frame, now);
    if !admitted.is_empty() {
        debug!(frame = index, count = admitted.len(), ?now, "events admitted");
    }

    let count = admitted.len();
    for event in admitted {
        *last_event = Some(event.to_string());
        if let Err(e) = sink.emit(event) {
            *failed += 1;
            warn!(event = %event, error = %e, "event delivery failed");
        }
    }
    count
}

// ════════════════════════════════════════════════════════════════════════════
// launch() — build everything from config and run
// ════════════════════════════════════════════════════════════════════════════

fn open_source(cfg: &AppConfig) -> Result<Box<dyn LandmarkSource>, AppError> {
    let source: Box<dyn LandmarkSource> = match &cfg.source {
        SourceKind::Udp => {
            let udp = UdpLandmarkSource::bind(cfg.listen, Some(cfg.source_poll))?;
            info!(listen = %cfg.listen, "waiting for landmark frames");
            Box::new(udp)
        }
        SourceKind::Replay(path) => {
            info!(path = %path.display(), "replaying landmark session");
            Box::new(ReplaySource::open(path)?)
        }
        #[cfg(feature = "leap")]
        SourceKind::Leap => Box::new(crate::leap::LeapLandmarkSource::open()?),
    };

    Ok(if cfg.mirror { Box::new(MirroredSource::new(source)) } else { source })
}

/// Box a sink, on a delivery thread when `queued`.
fn make_sink<E, S, F>(queued: bool, make: F) -> Result<Box<dyn EventSink<E>>, AppError>
where
    E: Send + 'static,
    S: EventSink<E> + 'static,
    F: FnOnce() -> Result<S, crate::sink::SinkError> + Send + 'static,
{
    Ok(if queued {
        Box::new(QueuedSink::spawn(make)?)
    } else {
        Box::new(make()?)
    })
}

fn drive<P: FramePipeline>(
    mut pipeline: P,
    mut sink:     Box<dyn EventSink<P::Event>>,
    cfg:          &AppConfig,
) -> Result<RunSummary, AppError> {
    let mut source = open_source(cfg)?;
    let mut preview = if cfg.preview {
        Some(PreviewWindow::new(PinchDetector::new(cfg.navigation.pinch_threshold))?)
    } else {
        None
    };
    let clock = SystemClock::new();

    let monitor = preview.as_mut().map(|p| p as &mut dyn Monitor);
    Ok(run(&mut pipeline, &mut source, &mut sink, &clock, monitor))
}

/// Build the configured mode and run it to completion.
pub fn launch(cfg: AppConfig) -> Result<RunSummary, AppError> {
    let summary = match cfg.mode {
        Mode::Navigation => {
            let sink: Box<dyn EventSink<NavKey>> = if cfg.dry_run {
                Box::new(LogSink)
            } else {
                make_sink(cfg.queued_sink, KeyboardSink::new)?
            };
            drive(NavigationPipeline::new(cfg.navigation), sink, &cfg)?
        }
        Mode::Signal => {
            let sink: Box<dyn EventSink<SignalGesture>> = if cfg.dry_run {
                Box::new(LogSink)
            } else {
                let target = cfg.target;
                make_sink(cfg.queued_sink, move || UdpSink::new(target))?
            };
            info!(target = %cfg.target, "sending gesture labels");
            drive(SignalPipeline::new(cfg.signal), sink, &cfg)?
        }
    };

    info!(
        frames = summary.frames,
        idle   = summary.idle_polls,
        events = summary.events,
        failed = summary.failed_deliveries,
        stop   = ?summary.stop,
        "session finished"
    );
    Ok(summary)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

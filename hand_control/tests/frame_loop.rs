//! End-to-end runs of the frame loop: recorded sessions in, events out.

use std::io::Cursor;
use std::net::UdpSocket;
use std::thread;
use std::time::Duration;

use gesture_core::{Direction, NavKey, NavigationPipeline, SignalGesture, SignalPipeline};
use hand_control::clock::{ManualClock, SystemClock};
use hand_control::sink::{QueuedSink, RecordingSink, UdpSink};
use hand_control::{run, StopReason};
use hand_frame::{
    Frame, FrameRecord, HandObservation, Handedness, LandmarkPoint, LandmarkSource, MirroredSource,
    Reading, ReplaySource, ScriptedSource, SourceError, UdpLandmarkSource,
};

fn ms(n: u64) -> Duration { Duration::from_millis(n) }

/// Thumb and index tips nearly touching.
fn holding(handedness: Handedness, x: f32) -> HandObservation {
    HandObservation::from_key_points(
        handedness,
        LandmarkPoint::new(x, 0.9),
        LandmarkPoint::new(x + 0.01, 0.5),
        LandmarkPoint::new(x, 0.5),
    )
}

/// Index tip at `(x, y)`, thumb well away from it.
fn pointing(handedness: Handedness, x: f32, y: f32) -> HandObservation {
    HandObservation::from_key_points(
        handedness,
        LandmarkPoint::new(x, 0.9),
        LandmarkPoint::new(x + 0.2, y + 0.1),
        LandmarkPoint::new(x, y),
    )
}

fn session(frames: &[Frame]) -> String {
    frames
        .iter()
        .map(|f| serde_json::to_string(&FrameRecord::from(f)).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

fn pointer_frames(xs: &[f32]) -> Vec<Frame> {
    xs.iter()
        .enumerate()
        .map(|(i, &x)| {
            Frame::new(vec![holding(Handedness::Left, 0.2), pointing(Handedness::Right, x, 0.4)])
                .at(ms(i as u64 * 33))
        })
        .collect()
}

#[test]
fn recorded_pointer_session_presses_arrows() {
    let text = session(&pointer_frames(&[0.40, 0.40, 0.45, 0.49, 0.50]));
    let mut source = ReplaySource::from_reader(Cursor::new(text));
    let mut sink = RecordingSink::default();

    let summary = run(&mut NavigationPipeline::default(), &mut source, &mut sink, &ManualClock::default(), None);

    assert_eq!(summary.stop, StopReason::EndOfStream);
    assert_eq!(summary.frames, 5);
    assert_eq!(sink.events, vec![NavKey::Arrow(Direction::Right); 2]);
}

#[test]
fn mirrored_session_reverses_horizontal_keys() {
    let source = ScriptedSource::new(pointer_frames(&[0.40, 0.45]));
    let mut source = MirroredSource::new(source);
    let mut sink = RecordingSink::default();

    run(&mut NavigationPipeline::default(), &mut source, &mut sink, &ManualClock::default(), None);

    assert_eq!(sink.events, vec![NavKey::Arrow(Direction::Left)]);
}

#[test]
fn swipe_label_reaches_udp_peer_once_per_cooldown() {
    let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
    receiver.set_read_timeout(Some(Duration::from_millis(300))).unwrap();
    let target = receiver.local_addr().unwrap();

    // Right wrist 0.30 → 0.45 → 0.25 over 100 ms: a right swipe, then a left
    // swipe that lands inside the one-second cooldown.
    let frames = [(0, 0.30), (50, 0.45), (100, 0.25)]
        .iter()
        .map(|&(t, x)| Frame::new(vec![pointing(Handedness::Right, x, 0.4)]).at(ms(t)))
        .collect::<Vec<_>>();
    let mut source = ReplaySource::from_reader(Cursor::new(session(&frames)));

    let mut sink = QueuedSink::spawn(move || UdpSink::new(target)).unwrap();
    let summary = run(&mut SignalPipeline::default(), &mut source, &mut sink, &ManualClock::default(), None);
    drop(sink);

    assert_eq!(summary.events, 1);
    assert_eq!(summary.failed_deliveries, 0);

    let mut buf = [0u8; 64];
    let n = receiver.recv(&mut buf).unwrap();
    assert_eq!(&buf[..n], SignalGesture::RightSwipe.label().as_bytes());
    assert!(receiver.recv(&mut buf).is_err());
}

#[test]
fn corrupt_line_stops_after_good_frames() {
    let mut text = session(&pointer_frames(&[0.40, 0.45]));
    text.push_str("\n{\"hands\": [oops]}\n");
    let mut source = ReplaySource::from_reader(Cursor::new(text));
    let mut sink = RecordingSink::default();

    let summary = run(&mut NavigationPipeline::default(), &mut source, &mut sink, &ManualClock::default(), None);

    assert_eq!(summary.stop, StopReason::ReadFailure);
    assert_eq!(summary.frames, 2);
    assert_eq!(sink.events, vec![NavKey::Arrow(Direction::Right)]);
}

#[test]
fn empty_session_ends_immediately() {
    let mut source = ReplaySource::from_reader(Cursor::new("\n\n"));
    let mut sink = RecordingSink::<SignalGesture>::default();

    let summary = run(&mut SignalPipeline::default(), &mut source, &mut sink, &ManualClock::default(), None);

    assert_eq!(summary.frames, 0);
    assert_eq!(summary.stop, StopReason::EndOfStream);
    assert!(sink.events.is_empty());
}

/// Ends the stream after `quiet` idle polls in a row, once frames have started.
struct UntilQuiet {
    inner:   UdpLandmarkSource,
    quiet:   usize,
    idle:    usize,
    started: bool,
}

impl LandmarkSource for UntilQuiet {
    fn next_frame(&mut self) -> Result<Option<Reading>, SourceError> {
        match self.inner.next_frame()? {
            Some(Reading::Idle) => {
                self.idle += 1;
                if self.started && self.idle >= self.quiet {
                    return Ok(None);
                }
                Ok(Some(Reading::Idle))
            }
            other => {
                self.started = true;
                self.idle = 0;
                Ok(other)
            }
        }
    }
}

#[test]
fn slow_udp_feed_still_drives_arrows() {
    // 50 ms poll against a 12.5 fps estimator: every gap shows up as idle
    // polls between real frames.
    let udp = UdpLandmarkSource::bind("127.0.0.1:0".parse().unwrap(), Some(ms(50))).unwrap();
    let target = udp.local_addr().unwrap();
    let mut source = UntilQuiet { inner: udp, quiet: 10, idle: 0, started: false };

    let payloads: Vec<Vec<u8>> = [0.30, 0.35, 0.40, 0.45, 0.50, 0.55]
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let frame = Frame::new(vec![holding(Handedness::Left, 0.2), pointing(Handedness::Right, x, 0.4)])
                .at(ms(i as u64 * 80));
            serde_json::to_vec(&FrameRecord::from(&frame)).unwrap()
        })
        .collect();
    let sender = thread::spawn(move || {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        for payload in payloads {
            thread::sleep(ms(80));
            socket.send_to(&payload, target).unwrap();
        }
    });

    let mut sink = RecordingSink::default();
    let summary = run(&mut NavigationPipeline::default(), &mut source, &mut sink, &SystemClock::new(), None);
    sender.join().unwrap();

    assert_eq!(summary.frames, 6);
    assert!(summary.idle_polls > 0);
    assert_eq!(sink.events, vec![NavKey::Arrow(Direction::Right); 5]);
}

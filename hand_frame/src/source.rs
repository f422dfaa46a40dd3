//! Landmark sources — anything that can hand the frame loop its next
//! [`Frame`].
//!
//! The loop does not care whether frames come from a live estimator over
//! UDP, a recorded session, or a test script.  A source returns `Ok(None)`
//! when its stream is over; an `Err` from `next_frame` is a broken stream and
//! also ends the loop.  A live source that has nothing yet returns
//! [`Reading::Idle`], which is not a frame: the hands are not known to be
//! gone, they just have not been reported.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::{SocketAddr, UdpSocket};
use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::hand::{Frame, FrameRecord};

// ════════════════════════════════════════════════════════════════════════════
// SourceError
// ════════════════════════════════════════════════════════════════════════════

/// Errors raised while opening or reading a landmark source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be opened at all.
    #[error("landmark source unavailable ({what}): {source}")]
    Unavailable {
        what: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read landmark frame: {0}")]
    Read(#[from] io::Error),

    /// A frame arrived but could not be decoded.  `frame` is the 1-based
    /// line number (replay) or datagram number (UDP).
    #[error("failed to decode landmark frame {frame}: {source}")]
    Decode {
        frame: usize,
        #[source]
        source: serde_json::Error,
    },
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait
// ════════════════════════════════════════════════════════════════════════════

/// One poll of a [`LandmarkSource`].
#[derive(Clone, Debug, PartialEq)]
pub enum Reading {
    /// A frame from the estimator, possibly with no hands in it.
    Frame(Frame),
    /// Nothing arrived within the poll interval.
    Idle,
}

impl Reading {
    pub fn into_frame(self) -> Option<Frame> {
        match self {
            Reading::Frame(f) => Some(f),
            Reading::Idle     => None,
        }
    }
}

/// Delivers one [`Reading`] per call.  May block until a frame is available
/// or the source's poll interval runs out.
pub trait LandmarkSource {
    fn next_frame(&mut self) -> Result<Option<Reading>, SourceError>;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn next_frame(&mut self) -> Result<Option<Reading>, SourceError> {
        (**self).next_frame()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedSource — fixed frame list
// ════════════════════════════════════════════════════════════════════════════

/// Plays back a fixed list of frames, then reports end of stream.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Frame>,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        ScriptedSource { frames: frames.into_iter().collect() }
    }
}

impl LandmarkSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<Reading>, SourceError> {
        Ok(self.frames.pop_front().map(Reading::Frame))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ReplaySource — JSON-lines recording
// ════════════════════════════════════════════════════════════════════════════

/// Reads a recorded session: one [`FrameRecord`] JSON object per line.
/// Blank lines are skipped.
pub struct ReplaySource<R> {
    reader: R,
    line:   usize,
    buf:    String,
}

impl ReplaySource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::Unavailable {
            what: format!("replay file {}", path.display()),
            source,
        })?;
        Ok(ReplaySource::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R) -> Self {
        ReplaySource { reader, line: 0, buf: String::new() }
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn next_frame(&mut self) -> Result<Option<Reading>, SourceError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }
            let record: FrameRecord = serde_json::from_str(text)
                .map_err(|source| SourceError::Decode { frame: self.line, source })?;
            return Ok(Some(Reading::Frame(record.into())));
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// UdpLandmarkSource — live feed from an external estimator
// ════════════════════════════════════════════════════════════════════════════

/// Largest datagram accepted; two full hands encode to well under this.
const MAX_DATAGRAM: usize = 16 * 1024;

/// Receives one JSON [`FrameRecord`] per datagram from a pose estimator
/// running in another process.
///
/// With a read timeout set, a quiet socket yields [`Reading::Idle`] instead
/// of blocking forever, so the frame loop can keep polling its exit key.
pub struct UdpLandmarkSource {
    socket:   UdpSocket,
    buf:      Vec<u8>,
    received: usize,
}

impl UdpLandmarkSource {
    pub fn bind(addr: SocketAddr, read_timeout: Option<Duration>) -> Result<Self, SourceError> {
        let unavailable = |source| SourceError::Unavailable {
            what: format!("udp landmark feed on {}", addr),
            source,
        };
        let socket = UdpSocket::bind(addr).map_err(unavailable)?;
        socket.set_read_timeout(read_timeout).map_err(unavailable)?;
        Ok(UdpLandmarkSource { socket, buf: vec![0; MAX_DATAGRAM], received: 0 })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl LandmarkSource for UdpLandmarkSource {
    fn next_frame(&mut self) -> Result<Option<Reading>, SourceError> {
        let (n, from) = match self.socket.recv_from(&mut self.buf) {
            Ok(r) => r,
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                return Ok(Some(Reading::Idle));
            }
            Err(e) => return Err(SourceError::Read(e)),
        };
        self.received += 1;
        debug!(bytes = n, %from, "landmark datagram");
        let record: FrameRecord = serde_json::from_slice(&self.buf[..n])
            .map_err(|source| SourceError::Decode { frame: self.received, source })?;
        Ok(Some(Reading::Frame(record.into())))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MirroredSource
// ════════════════════════════════════════════════════════════════════════════

/// Wraps a source and flips every frame horizontally.
pub struct MirroredSource<S> {
    inner: S,
}

impl<S: LandmarkSource> MirroredSource<S> {
    pub fn new(inner: S) -> Self {
        MirroredSource { inner }
    }
}

impl<S: LandmarkSource> LandmarkSource for MirroredSource<S> {
    fn next_frame(&mut self) -> Result<Option<Reading>, SourceError> {
        Ok(self.inner.next_frame()?.map(|r| match r {
            Reading::Frame(f) => Reading::Frame(f.mirrored()),
            Reading::Idle     => Reading::Idle,
        }))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{HandObservation, Handedness};
    use crate::landmark::LandmarkPoint;
    use std::io::Cursor;

    fn frame(src: &mut impl LandmarkSource) -> Frame {
        match src.next_frame() {
            Ok(Some(Reading::Frame(f))) => f,
            other => panic!("expected a frame, got {:?}", other),
        }
    }

    fn hand(x: f32) -> HandObservation {
        HandObservation::from_key_points(
            Handedness::Right,
            LandmarkPoint::new(x, 0.8),
            LandmarkPoint::new(x, 0.5),
            LandmarkPoint::new(x, 0.4),
        )
    }

    #[test]
    fn scripted_source_drains_in_order() {
        let mut src = ScriptedSource::new(vec![
            Frame::new(vec![hand(0.1)]),
            Frame::default(),
        ]);
        assert_eq!(frame(&mut src).hands.len(), 1);
        assert!(frame(&mut src).is_empty());
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn replay_skips_blank_lines() {
        let text = "\n{\"t\": 0.0, \"hands\": []}\n\n   \n{\"t\": 0.1, \"hands\": []}\n";
        let mut src = ReplaySource::from_reader(Cursor::new(text));
        assert_eq!(frame(&mut src).timestamp, Some(Duration::ZERO));
        assert_eq!(frame(&mut src).timestamp, Some(Duration::from_millis(100)));
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn replay_reports_bad_line_number() {
        let text = "{\"hands\": []}\nnot json\n";
        let mut src = ReplaySource::from_reader(Cursor::new(text));
        assert!(src.next_frame().unwrap().is_some());
        match src.next_frame() {
            Err(SourceError::Decode { frame, .. }) => assert_eq!(frame, 2),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn replay_open_missing_file_is_unavailable() {
        let err = ReplaySource::open("/definitely/not/here.jsonl").err().unwrap();
        assert!(matches!(err, SourceError::Unavailable { .. }));
    }

    #[test]
    fn mirrored_source_flips_frames() {
        let mut src = MirroredSource::new(ScriptedSource::new(vec![Frame::new(vec![hand(0.2)])]));
        let flipped = frame(&mut src);
        assert!((flipped.hands[0].wrist().unwrap().x - 0.8).abs() < 1e-6);
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn udp_source_decodes_datagrams() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let mut src = UdpLandmarkSource::bind(addr, Some(Duration::from_secs(2))).unwrap();
        let target = src.local_addr().unwrap();

        let record = FrameRecord::from(&Frame::new(vec![hand(0.4)]).at(Duration::from_millis(250)));
        let payload = serde_json::to_vec(&record).unwrap();
        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(&payload, target).unwrap();

        let received = frame(&mut src);
        assert_eq!(received.timestamp, Some(Duration::from_millis(250)));
        assert_eq!(received.hands[0].handedness, Handedness::Right);
    }

    #[test]
    fn udp_timeout_is_idle_not_an_empty_frame() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let mut src = UdpLandmarkSource::bind(addr, Some(Duration::from_millis(20))).unwrap();
        assert_eq!(src.next_frame().unwrap(), Some(Reading::Idle));

        // A real frame with no hands is still a frame.
        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(br#"{"hands": []}"#, src.local_addr().unwrap()).unwrap();
        src.socket.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
        assert!(frame(&mut src).is_empty());
    }

    #[test]
    fn mirrored_source_passes_idle_through() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let udp = UdpLandmarkSource::bind(addr, Some(Duration::from_millis(20))).unwrap();
        let mut src = MirroredSource::new(udp);
        assert_eq!(src.next_frame().unwrap(), Some(Reading::Idle));
    }

    #[test]
    fn udp_source_rejects_garbage() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let mut src = UdpLandmarkSource::bind(addr, Some(Duration::from_secs(2))).unwrap();
        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(b"{oops", src.local_addr().unwrap()).unwrap();
        assert!(matches!(src.next_frame(), Err(SourceError::Decode { frame: 1, .. })));
    }
}

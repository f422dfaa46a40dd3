//! # hand_frame
//!
//! Per-frame hand-landmark observations as produced by an external pose
//! estimator, and the [`LandmarkSource`]s that deliver them.
//!
//! Every coordinate is normalized to the image plane: `x` grows to the right,
//! `y` grows downward, both nominally in `[0, 1]`.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_frame::{Frame, HandObservation, Handedness, LandmarkPoint, LandmarkSource, Reading, ScriptedSource};
//!
//! let hand = HandObservation::from_key_points(
//!     Handedness::Left,
//!     LandmarkPoint::new(0.30, 0.80),   // wrist
//!     LandmarkPoint::new(0.32, 0.50),   // thumb tip
//!     LandmarkPoint::new(0.33, 0.50),   // index tip
//! );
//!
//! let mut source = ScriptedSource::new(vec![Frame::new(vec![hand])]);
//! let frame = source.next_frame().unwrap().and_then(Reading::into_frame).unwrap();
//! assert!(frame.hand(Handedness::Left).is_some());
//! assert!(source.next_frame().unwrap().is_none());
//! ```

pub mod landmark;
pub mod hand;
pub mod source;

pub use landmark::{LandmarkPoint, HAND_CONNECTIONS, LANDMARK_COUNT};
pub use hand::{Frame, FrameRecord, HandObservation, Handedness};
pub use source::{
    LandmarkSource, MirroredSource, Reading, ReplaySource, ScriptedSource, SourceError,
    UdpLandmarkSource,
};

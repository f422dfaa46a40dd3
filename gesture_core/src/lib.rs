//! # gesture_core
//!
//! Turns a noisy stream of hand-landmark [`Frame`](hand_frame::Frame)s into
//! discrete, cooldown-gated gesture events.  Nothing here touches a clock,
//! a keyboard or a socket: every call takes `now` explicitly and returns the
//! events it admitted.
//!
//! ## Gesture → Event mapping
//!
//! | Mode | Gesture | Event |
//! |---|---|---|
//! | Navigation | Left hand pinched, right index moves | Arrow key in the direction of travel |
//! | Navigation | Right hand pinched, left index moves | `h` / `j` / `k` / `l` |
//! | Signal | Fast wrist motion to the left | `left_swipe` |
//! | Signal | Fast wrist motion to the right | `right_swipe` |
//! | Signal | Thumb and index closing fast | `pinch_in` |
//! | Signal | Thumb and index opening fast | `pinch_out` |
//!
//! ## Building blocks
//!
//! * [`PinchDetector`] — thumb/index proximity test.
//! * [`DisplacementTracker`] — frame-to-frame fingertip direction.
//! * [`VelocityGestureDetector`] — fast swipes and pinch-distance changes.
//! * [`EventGate`] — one event per cooldown window.
//! * [`TrackerState`] — the "previous sample" each detector reads and
//!   overwrites, owned by the pipeline.
//!
//! [`NavigationPipeline`] and [`SignalPipeline`] wire these together, one per
//! mode, behind the [`FramePipeline`] trait.

pub mod event;
pub mod state;
pub mod pinch;
pub mod displacement;
pub mod velocity;
pub mod gate;
pub mod pipeline;

pub use event::{Direction, KeySymbol, NavKey, SignalGesture};
pub use state::{Sample, TrackerState};
pub use pinch::{is_pinched, PinchDetector, PINCH_THRESHOLD};
pub use displacement::{classify_displacement, DisplacementTracker, NOISE_THRESHOLD};
pub use velocity::{VelocityGestureDetector, VelocityThresholds, PINCH_SPEED, SWIPE_SPEED};
pub use gate::{EventGate, NAVIGATION_COOLDOWN, SIGNAL_COOLDOWN};
pub use pipeline::{
    FramePipeline, NavigationConfig, NavigationPipeline, SignalConfig, SignalPipeline,
    MIN_DETECTION_CONFIDENCE,
};

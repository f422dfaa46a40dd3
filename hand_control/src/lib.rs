//! # hand_control
//!
//! Hand-gesture controller.  Hand landmarks come in from an external pose
//! estimator, [`gesture_core`] classifies them, and the resulting events go
//! out as key presses or UDP datagrams.
//!
//! ## Modes
//!
//! | Mode | Gesture | Output |
//! |---|---|---|
//! | `nav` | Pinch left hand, move right index finger | Arrow keys |
//! | `nav` | Pinch right hand, move left index finger | `h` / `j` / `k` / `l` |
//! | `signal` | Fast wrist swipe | `left_swipe` / `right_swipe` datagram |
//! | `signal` | Fast thumb–index close / open | `pinch_in` / `pinch_out` datagram |
//!
//! Signal datagrams go to `127.0.0.1:5005` unless `--target` says otherwise.
//!
//! ## Landmark sources
//!
//! * `udp` (default) — the estimator pushes one JSON frame per datagram to
//!   `--listen` (default `127.0.0.1:5006`).
//! * `replay` — a recorded JSON-lines session (`--replay PATH`).
//! * `leap` — a LeapMotion controller (build with `--features leap`).
//!
//! ## Preview
//!
//! `--preview` opens a window showing each hand's skeleton.  Press `Escape`
//! to quit.

pub mod error;
pub mod clock;
pub mod sink;
pub mod preview;
pub mod config;
pub mod app;
#[cfg(feature = "leap")]
pub mod leap;

pub use error::AppError;
pub use app::{launch, run, RunSummary, StopReason};
pub use config::{AppConfig, Cli, Mode, SourceKind};

//! Per-mode frame pipelines: detectors, their tracker state and the mode's
//! gate, driven one frame at a time.

use std::fmt;
use std::time::Duration;

use hand_frame::{Frame, Handedness, LandmarkPoint};
use tracing::debug;

use crate::displacement::{DisplacementTracker, NOISE_THRESHOLD};
use crate::event::{NavKey, SignalGesture};
use crate::gate::{EventGate, NAVIGATION_COOLDOWN, SIGNAL_COOLDOWN};
use crate::pinch::{PinchDetector, PINCH_THRESHOLD};
use crate::state::TrackerState;
use crate::velocity::{VelocityGestureDetector, VelocityThresholds};

/// Hands detected with a lower score are ignored.
pub const MIN_DETECTION_CONFIDENCE: f32 = 0.7;

// ════════════════════════════════════════════════════════════════════════════
// FramePipeline trait
// ════════════════════════════════════════════════════════════════════════════

/// Classifies one frame at a time and returns the events its gate admitted,
/// in emission order.
pub trait FramePipeline {
    type Event: Copy + fmt::Debug + fmt::Display;

    fn process(&mut self, frame: &Frame, now: Duration) -> Vec<Self::Event>;

    /// Forget all tracker state and reopen the gate.
    fn reset(&mut self);
}

// ════════════════════════════════════════════════════════════════════════════
// NavigationPipeline
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationConfig {
    pub pinch_threshold: f32,
    pub noise_threshold: f32,
    pub cooldown:        Duration,
    pub min_confidence:  f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            pinch_threshold: PINCH_THRESHOLD,
            noise_threshold: NOISE_THRESHOLD,
            cooldown:        NAVIGATION_COOLDOWN,
            min_confidence:  MIN_DETECTION_CONFIDENCE,
        }
    }
}

/// Cross-hand navigation:
///
/// * left hand pinched → right index tip drives the arrow keys;
/// * right hand pinched → left index tip drives `h`/`j`/`k`/`l`.
///
/// The arrow side is evaluated first; both sides share one gate.
#[derive(Debug)]
pub struct NavigationPipeline {
    pinch:          PinchDetector,
    tracker:        DisplacementTracker,
    min_confidence: f32,
    /// Right index tip, gated by the left-hand pinch.
    arrow:          TrackerState<LandmarkPoint>,
    /// Left index tip, gated by the right-hand pinch.
    vi:             TrackerState<LandmarkPoint>,
    gate:           EventGate,
}

impl Default for NavigationPipeline {
    fn default() -> Self {
        NavigationPipeline::new(NavigationConfig::default())
    }
}

impl NavigationPipeline {
    pub fn new(cfg: NavigationConfig) -> Self {
        NavigationPipeline {
            pinch:          PinchDetector::new(cfg.pinch_threshold),
            tracker:        DisplacementTracker::new(cfg.noise_threshold),
            min_confidence: cfg.min_confidence,
            arrow:          TrackerState::empty(),
            vi:             TrackerState::empty(),
            gate:           EventGate::new(cfg.cooldown),
        }
    }

    pub fn arrow_state(&self) -> &TrackerState<LandmarkPoint> { &self.arrow }
    pub fn vi_state(&self)    -> &TrackerState<LandmarkPoint> { &self.vi }
    pub fn gate(&self)        -> &EventGate                   { &self.gate }
}

impl FramePipeline for NavigationPipeline {
    type Event = NavKey;

    fn process(&mut self, frame: &Frame, now: Duration) -> Vec<NavKey> {
        let left  = frame.confident_hand(Handedness::Left,  self.min_confidence);
        let right = frame.confident_hand(Handedness::Right, self.min_confidence);

        let left_pinched  = left.map_or(false,  |h| self.pinch.observe(h));
        let right_pinched = right.map_or(false, |h| self.pinch.observe(h));
        let left_tip      = left.and_then(|h| h.index_tip());
        let right_tip     = right.and_then(|h| h.index_tip());

        let mut events = Vec::new();

        if let Some(d) = self.tracker.update(&mut self.arrow, left_pinched, right_tip, now) {
            match self.gate.admit(NavKey::Arrow(d), now) {
                Some(key) => events.push(key),
                None      => debug!(direction = d.name(), "arrow suppressed by cooldown"),
            }
        }

        if let Some(d) = self.tracker.update(&mut self.vi, right_pinched, left_tip, now) {
            match self.gate.admit(NavKey::Vi(d), now) {
                Some(key) => events.push(key),
                None      => debug!(direction = d.name(), "vi key suppressed by cooldown"),
            }
        }

        events
    }

    fn reset(&mut self) {
        self.arrow.reset();
        self.vi.reset();
        self.gate.reset();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SignalPipeline
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalConfig {
    pub velocity:       VelocityThresholds,
    pub cooldown:       Duration,
    pub min_confidence: f32,
}

impl Default for SignalConfig {
    fn default() -> Self {
        SignalConfig {
            velocity:       VelocityThresholds::default(),
            cooldown:       SIGNAL_COOLDOWN,
            min_confidence: MIN_DETECTION_CONFIDENCE,
        }
    }
}

/// Motion history of one hand.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct HandMotion {
    wrist_x: TrackerState<f32>,
    pinch:   TrackerState<f32>,
}

fn slot(handedness: Handedness) -> usize {
    match handedness {
        Handedness::Left    => 0,
        Handedness::Right   => 1,
        Handedness::Unknown => 2,
    }
}

/// Swipe and pinch-distance labels.  Each handedness slot (left, right,
/// unknown) keeps its own motion history; within a hand the swipe is checked
/// before the pinch; one gate covers everything.
#[derive(Debug)]
pub struct SignalPipeline {
    detector:       VelocityGestureDetector,
    min_confidence: f32,
    motion:         [HandMotion; 3],
    gate:           EventGate,
}

impl Default for SignalPipeline {
    fn default() -> Self {
        SignalPipeline::new(SignalConfig::default())
    }
}

impl SignalPipeline {
    pub fn new(cfg: SignalConfig) -> Self {
        SignalPipeline {
            detector:       VelocityGestureDetector::new(cfg.velocity),
            min_confidence: cfg.min_confidence,
            motion:         [HandMotion::default(); 3],
            gate:           EventGate::new(cfg.cooldown),
        }
    }

    pub fn gate(&self) -> &EventGate { &self.gate }

    /// Last wrist-x sample for a hand.
    pub fn wrist_state(&self, handedness: Handedness) -> &TrackerState<f32> {
        &self.motion[slot(handedness)].wrist_x
    }

    /// Last thumb–index distance sample for a hand.
    pub fn pinch_state(&self, handedness: Handedness) -> &TrackerState<f32> {
        &self.motion[slot(handedness)].pinch
    }
}

impl FramePipeline for SignalPipeline {
    type Event = SignalGesture;

    fn process(&mut self, frame: &Frame, now: Duration) -> Vec<SignalGesture> {
        let min_score  = self.min_confidence;
        let mut seen   = [false; 3];
        let mut events = Vec::new();

        for hand in frame.hands.iter().filter(|h| h.score >= min_score) {
            let i = slot(hand.handedness);
            if seen[i] { continue; }
            seen[i] = true;

            let motion = &mut self.motion[i];
            let swipe = hand
                .wrist()
                .and_then(|w| self.detector.swipe(&mut motion.wrist_x, w.x, now));
            let pinch = hand
                .pinch_distance()
                .and_then(|d| self.detector.pinch(&mut motion.pinch, d, now));

            for candidate in [swipe, pinch].into_iter().flatten() {
                match self.gate.admit(candidate, now) {
                    Some(g) => events.push(g),
                    None    => debug!(gesture = %candidate, hand = hand.handedness.name(),
                                      "gesture suppressed by cooldown"),
                }
            }
        }

        events
    }

    fn reset(&mut self) {
        self.motion = [HandMotion::default(); 3];
        self.gate.reset();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

//! Hand observations and frames.
//!
//! A [`Frame`] is everything the pose estimator saw in one capture step.
//! Frames carry no identity across time beyond each hand's [`Handedness`]
//! tag; anything that needs history (trackers, gates) keeps it elsewhere.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::landmark::{self, LandmarkPoint, LANDMARK_COUNT};

// ════════════════════════════════════════════════════════════════════════════
// Handedness
// ════════════════════════════════════════════════════════════════════════════

/// Which hand an observation belongs to, when the estimator can tell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    pub fn name(self) -> &'static str {
        match self {
            Handedness::Left    => "left",
            Handedness::Right   => "right",
            Handedness::Unknown => "unknown",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandObservation
// ════════════════════════════════════════════════════════════════════════════

fn full_confidence() -> f32 { 1.0 }

/// One detected hand: a handedness tag, a detection score and its landmarks
/// ordered by landmark id.
///
/// Estimators may deliver fewer than [`LANDMARK_COUNT`] points; missing ids
/// read back as `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    #[serde(default)]
    pub handedness: Handedness,
    /// Detection confidence, 0.0–1.0.
    #[serde(default = "full_confidence")]
    pub score:      f32,
    pub landmarks:  Vec<LandmarkPoint>,
}

impl HandObservation {
    pub fn new(handedness: Handedness, landmarks: Vec<LandmarkPoint>) -> Self {
        HandObservation { handedness, score: 1.0, landmarks }
    }

    /// Build a complete 21-point hand from the three points the gesture
    /// logic reads.  Thumb and index joints are laid out evenly between the
    /// wrist and their tips; the remaining fingers collapse onto the wrist.
    pub fn from_key_points(
        handedness: Handedness,
        wrist:      LandmarkPoint,
        thumb_tip:  LandmarkPoint,
        index_tip:  LandmarkPoint,
    ) -> Self {
        let lerp = |to: LandmarkPoint, t: f32| LandmarkPoint::new(
            wrist.x + (to.x - wrist.x) * t,
            wrist.y + (to.y - wrist.y) * t,
        );
        let mut landmarks = vec![wrist; LANDMARK_COUNT];
        for step in 1..4 {
            let t = step as f32 / 4.0;
            landmarks[landmark::WRIST + step]     = lerp(thumb_tip, t);
            landmarks[landmark::THUMB_TIP + step] = lerp(index_tip, t);
        }
        landmarks[landmark::THUMB_TIP] = thumb_tip;
        landmarks[landmark::INDEX_TIP] = index_tip;
        HandObservation::new(handedness, landmarks)
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    pub fn landmark(&self, id: usize) -> Option<LandmarkPoint> {
        self.landmarks.get(id).copied()
    }

    pub fn wrist(&self)     -> Option<LandmarkPoint> { self.landmark(landmark::WRIST) }
    pub fn thumb_tip(&self) -> Option<LandmarkPoint> { self.landmark(landmark::THUMB_TIP) }
    pub fn index_tip(&self) -> Option<LandmarkPoint> { self.landmark(landmark::INDEX_TIP) }

    /// Thumb-tip to index-tip distance, if both are present.
    pub fn pinch_distance(&self) -> Option<f32> {
        Some(self.thumb_tip()?.distance(self.index_tip()?))
    }

    pub fn mirrored(&self) -> Self {
        HandObservation {
            handedness: self.handedness,
            score:      self.score,
            landmarks:  self.landmarks.iter().map(|p| p.mirrored()).collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// All hands observed in one capture step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Capture time relative to the start of the stream, when the source
    /// knows it.  Without one the frame loop stamps the frame on arrival.
    pub timestamp: Option<Duration>,
    pub hands:     Vec<HandObservation>,
}

impl Frame {
    pub fn new(hands: Vec<HandObservation>) -> Self {
        Frame { timestamp: None, hands }
    }

    pub fn at(mut self, timestamp: Duration) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn is_empty(&self) -> bool { self.hands.is_empty() }

    /// First hand tagged `handedness`.
    pub fn hand(&self, handedness: Handedness) -> Option<&HandObservation> {
        self.hands.iter().find(|h| h.handedness == handedness)
    }

    /// First hand tagged `handedness` whose score reaches `min_score`.
    pub fn confident_hand(&self, handedness: Handedness, min_score: f32) -> Option<&HandObservation> {
        self.hands
            .iter()
            .find(|h| h.handedness == handedness && h.score >= min_score)
    }

    /// Horizontally flipped copy, as seen in a selfie view.  Handedness tags
    /// are kept as the estimator reported them.
    pub fn mirrored(&self) -> Self {
        Frame {
            timestamp: self.timestamp,
            hands:     self.hands.iter().map(HandObservation::mirrored).collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameRecord — JSON wire form
// ════════════════════════════════════════════════════════════════════════════

/// Serialized form of a [`Frame`], one per replay line or UDP datagram:
///
/// ```json
/// {"t": 0.033, "hands": [{"handedness": "left", "score": 0.93,
///   "landmarks": [{"x": 0.41, "y": 0.72}, ...]}]}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Capture time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t:     Option<f64>,
    #[serde(default)]
    pub hands: Vec<HandObservation>,
}

impl From<FrameRecord> for Frame {
    fn from(record: FrameRecord) -> Self {
        // Negative, non-finite or out-of-range times are dropped.
        let timestamp = record.t.and_then(|t| Duration::try_from_secs_f64(t).ok());
        Frame { timestamp, hands: record.hands }
    }
}

impl From<&Frame> for FrameRecord {
    fn from(frame: &Frame) -> Self {
        FrameRecord {
            t:     frame.timestamp.map(|t| t.as_secs_f64()),
            hands: frame.hands.clone(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

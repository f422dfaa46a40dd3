//! Debug preview using `minifb`: every hand's skeleton drawn on a dark
//! background, pinched hands highlighted, the latest event in the title bar.
//!
//! ```text
//! ┌──────────────── Hand Gesture Control — arrow right ───────────────┐
//! │                                                                   │
//! │        o─o─o─●             ●─o─o─o                                 │
//! │       /       left        right     \                              │
//! │      o                                o                            │
//! └───────────────────────────────────────────────────────────────────┘
//! ```

use gesture_core::PinchDetector;
use hand_frame::{Frame, HandObservation, Handedness, LandmarkPoint, HAND_CONNECTIONS};
use minifb::{Key, Window, WindowOptions};
use tracing::warn;

use crate::error::AppError;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:     usize = 640;
pub const WIN_H:     usize = 480;
const TITLE:         &str  = "Hand Gesture Control";
const BG_COLOR:      u32   = 0xFF1A1A2E;
const LEFT_COLOR:    u32   = 0xFFAADDFF;
const RIGHT_COLOR:   u32   = 0xFFFFBBAA;
const UNKNOWN_COLOR: u32   = 0xFFCCCCCC;
const PINCH_COLOR:   u32   = 0xFFFFD700;  // gold
const JOINT_RADIUS:  usize = 2;
const TARGET_FPS:    usize = 1000;

// ════════════════════════════════════════════════════════════════════════════
// Monitor trait
// ════════════════════════════════════════════════════════════════════════════

/// Something that watches the frame loop and can ask it to stop.
pub trait Monitor {
    /// Show `frame` (and the latest event, if any).  Returns `false` when the
    /// user asked to exit.  Must not block.
    fn present(&mut self, frame: &Frame, last_event: Option<&str>) -> bool;
}

// ════════════════════════════════════════════════════════════════════════════
// Canvas — pixel buffer and drawing primitives
// ════════════════════════════════════════════════════════════════════════════

/// ARGB framebuffer with just enough drawing to show a hand skeleton.
pub struct Canvas {
    pub width:  usize,
    pub height: usize,
    pub buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, buf: vec![BG_COLOR; width * height] }
    }

    pub fn clear(&mut self) {
        self.buf.fill(BG_COLOR);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    /// Pixel position of a normalized landmark; `None` for non-finite input.
    fn to_pixel(&self, p: LandmarkPoint) -> Option<(isize, isize)> {
        if !p.is_finite() {
            return None;
        }
        let x = (p.x.clamp(0.0, 1.0) * (self.width  - 1) as f32).round() as isize;
        let y = (p.y.clamp(0.0, 1.0) * (self.height - 1) as f32).round() as isize;
        Some((x, y))
    }

    fn fill_square(&mut self, cx: isize, cy: isize, r: usize, color: u32) {
        let r = r as isize;
        for y in cy - r..=cy + r {
            for x in cx - r..=cx + r {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Bresenham line.
    fn draw_line(&mut self, (x0, y0): (isize, isize), (x1, y1): (isize, isize), color: u32) {
        let dx =  (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Draw one hand: bones, joints, and a gold marker between thumb and
    /// index tips when pinched.
    pub fn draw_hand(&mut self, hand: &HandObservation, pinched: bool) {
        let color = match hand.handedness {
            Handedness::Left    => LEFT_COLOR,
            Handedness::Right   => RIGHT_COLOR,
            Handedness::Unknown => UNKNOWN_COLOR,
        };

        for &(a, b) in HAND_CONNECTIONS.iter() {
            let ends = hand.landmark(a).zip(hand.landmark(b));
            if let Some((pa, pb)) = ends.and_then(|(pa, pb)| self.to_pixel(pa).zip(self.to_pixel(pb))) {
                self.draw_line(pa, pb, color);
            }
        }
        for p in hand.landmarks.iter() {
            if let Some((x, y)) = self.to_pixel(*p) {
                self.fill_square(x, y, JOINT_RADIUS, color);
            }
        }

        if pinched {
            if let (Some(t), Some(i)) = (hand.thumb_tip(), hand.index_tip()) {
                let mid = LandmarkPoint::new((t.x + i.x) / 2.0, (t.y + i.y) / 2.0);
                if let Some((x, y)) = self.to_pixel(mid) {
                    self.fill_square(x, y, JOINT_RADIUS * 2, PINCH_COLOR);
                }
            }
        }
    }

    pub fn draw_frame(&mut self, frame: &Frame, pinch: &PinchDetector) {
        self.clear();
        for hand in &frame.hands {
            self.draw_hand(hand, pinch.observe(hand));
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PreviewWindow
// ════════════════════════════════════════════════════════════════════════════

pub struct PreviewWindow {
    window: Window,
    canvas: Canvas,
    pinch:  PinchDetector,
    title:  String,
}

impl PreviewWindow {
    pub fn new(pinch: PinchDetector) -> Result<Self, AppError> {
        let mut window = Window::new(
            TITLE,
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Preview(e.to_string()))?;

        // Input is polled on every update; keep the wait short so the
        // landmark source sets the pace.
        window.set_target_fps(TARGET_FPS);

        Ok(PreviewWindow {
            window,
            canvas: Canvas::new(WIN_W, WIN_H),
            pinch,
            title:  TITLE.to_string(),
        })
    }
}

impl Monitor for PreviewWindow {
    fn present(&mut self, frame: &Frame, last_event: Option<&str>) -> bool {
        if !self.window.is_open() {
            return false;
        }

        self.canvas.draw_frame(frame, &self.pinch);

        let title = match last_event {
            Some(e) => format!("{} — {}", TITLE, e),
            None    => TITLE.to_string(),
        };
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }

        if let Err(e) = self.window.update_with_buffer(&self.canvas.buf, WIN_W, WIN_H) {
            warn!(error = %e, "preview update failed");
            return false;
        }

        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

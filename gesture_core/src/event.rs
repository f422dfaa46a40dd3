//! Gesture events, one closed enumeration per mode.

use std::fmt;

// ════════════════════════════════════════════════════════════════════════════
// Direction
// ════════════════════════════════════════════════════════════════════════════

/// Cardinal direction in image space (`Down` is increasing `y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up    => "up",
            Direction::Down  => "down",
            Direction::Left  => "left",
            Direction::Right => "right",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// NavKey — navigation mode
// ════════════════════════════════════════════════════════════════════════════

/// A key the navigation mode presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// Arrow key, driven by the right index finger.
    Arrow(Direction),
    /// vi motion key (`h`/`j`/`k`/`l`), driven by the left index finger.
    Vi(Direction),
}

/// Keyboard symbol a [`NavKey`] maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySymbol {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
}

impl NavKey {
    pub fn direction(self) -> Direction {
        match self {
            NavKey::Arrow(d) | NavKey::Vi(d) => d,
        }
    }

    pub fn symbol(self) -> KeySymbol {
        match self {
            NavKey::Arrow(Direction::Up)    => KeySymbol::ArrowUp,
            NavKey::Arrow(Direction::Down)  => KeySymbol::ArrowDown,
            NavKey::Arrow(Direction::Left)  => KeySymbol::ArrowLeft,
            NavKey::Arrow(Direction::Right) => KeySymbol::ArrowRight,
            NavKey::Vi(Direction::Left)     => KeySymbol::Char('h'),
            NavKey::Vi(Direction::Down)     => KeySymbol::Char('j'),
            NavKey::Vi(Direction::Up)       => KeySymbol::Char('k'),
            NavKey::Vi(Direction::Right)    => KeySymbol::Char('l'),
        }
    }
}

impl fmt::Display for NavKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.symbol()) {
            (NavKey::Arrow(d), _)           => write!(f, "arrow {}", d.name()),
            (NavKey::Vi(d), KeySymbol::Char(c)) => write!(f, "key {} ({})", c, d.name()),
            (NavKey::Vi(d), _)              => write!(f, "vi {}", d.name()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SignalGesture — signal mode
// ════════════════════════════════════════════════════════════════════════════

/// A semantic gesture label sent by the signal mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalGesture {
    LeftSwipe,
    RightSwipe,
    PinchIn,
    PinchOut,
}

impl SignalGesture {
    pub const ALL: [SignalGesture; 4] = [
        SignalGesture::LeftSwipe,
        SignalGesture::RightSwipe,
        SignalGesture::PinchIn,
        SignalGesture::PinchOut,
    ];

    /// Wire label, as sent to the receiving process.
    pub fn label(self) -> &'static str {
        match self {
            SignalGesture::LeftSwipe  => "left_swipe",
            SignalGesture::RightSwipe => "right_swipe",
            SignalGesture::PinchIn    => "pinch_in",
            SignalGesture::PinchOut   => "pinch_out",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        SignalGesture::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for SignalGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vi_keys_follow_hjkl() {
        let chars: Vec<_> = [Direction::Left, Direction::Down, Direction::Up, Direction::Right]
            .into_iter()
            .map(|d| NavKey::Vi(d).symbol())
            .collect();
        assert_eq!(
            chars,
            [KeySymbol::Char('h'), KeySymbol::Char('j'), KeySymbol::Char('k'), KeySymbol::Char('l')]
        );
    }

    #[test]
    fn arrow_keys_never_map_to_chars() {
        for d in Direction::ALL {
            assert!(!matches!(NavKey::Arrow(d).symbol(), KeySymbol::Char(_)));
            assert_eq!(NavKey::Arrow(d).direction(), d);
        }
    }

    #[test]
    fn labels_round_trip() {
        for g in SignalGesture::ALL {
            assert_eq!(SignalGesture::from_label(g.label()), Some(g));
        }
        assert_eq!(SignalGesture::from_label("wave"), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(NavKey::Arrow(Direction::Right).to_string(), "arrow right");
        assert_eq!(NavKey::Vi(Direction::Left).to_string(), "key h (left)");
        assert_eq!(SignalGesture::PinchOut.to_string(), "pinch_out");
    }
}

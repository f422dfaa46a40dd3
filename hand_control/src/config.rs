//! Application configuration and its command-line form.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use gesture_core::{NavigationConfig, SignalConfig};

use crate::error::AppError;

/// Where the external pose estimator pushes landmark frames by default.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:5006";

/// How long the UDP source waits for a datagram before handing the loop an
/// empty frame, so the preview keeps responding while no hands arrive.
pub const SOURCE_POLL: Duration = Duration::from_millis(50);

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Pinch-gated fingertip motion → arrow and vi keys.
    Navigation,
    /// Swipe / pinch velocity → UDP labels.
    Signal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Udp,
    Replay(PathBuf),
    #[cfg(feature = "leap")]
    Leap,
}

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub mode:        Mode,
    pub source:      SourceKind,
    /// Address the UDP landmark source binds to.
    pub listen:      SocketAddr,
    /// Where signal-mode labels are sent.
    pub target:      SocketAddr,
    pub navigation:  NavigationConfig,
    pub signal:      SignalConfig,
    pub source_poll: Duration,
    /// Flip frames horizontally before classification.
    pub mirror:      bool,
    pub preview:     bool,
    /// Log events instead of pressing keys / sending datagrams.
    pub dry_run:     bool,
    /// Deliver events from a background thread.
    pub queued_sink: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            mode:        Mode::Navigation,
            source:      SourceKind::Udp,
            listen:      SocketAddr::from(([127, 0, 0, 1], 5006)),
            target:      SocketAddr::from(([127, 0, 0, 1], 5005)),
            navigation:  NavigationConfig::default(),
            signal:      SignalConfig::default(),
            source_poll: SOURCE_POLL,
            mirror:      false,
            preview:     false,
            dry_run:     false,
            queued_sink: false,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Cli
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Arrow / hjkl key presses
    Nav,
    /// Swipe and pinch labels over UDP
    Signal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Udp,
    Replay,
    #[cfg(feature = "leap")]
    Leap,
}

/// Hand-gesture controller.
#[derive(Parser, Debug)]
#[command(name = "hand_control", version, about = "Turn hand landmarks into key presses or gesture datagrams")]
pub struct Cli {
    /// Which front end to run.
    #[arg(value_enum)]
    pub mode: ModeArg,

    /// Where landmark frames come from.
    #[arg(long, value_enum, default_value_t = SourceArg::Udp)]
    pub source: SourceArg,

    /// Address to receive landmark frames on (udp source).
    #[arg(long, default_value = DEFAULT_LISTEN)]
    pub listen: SocketAddr,

    /// Recorded JSON-lines session to play (replay source).
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Where to send gesture labels (signal mode).
    #[arg(long, default_value = crate::sink::DEFAULT_SIGNAL_TARGET)]
    pub target: SocketAddr,

    /// Minimum time between events, in milliseconds.  Defaults: 10 (nav), 1000 (signal).
    #[arg(long)]
    pub cooldown_ms: Option<u64>,

    /// Thumb–index distance below which a hand is pinched (nav).
    #[arg(long)]
    pub pinch_threshold: Option<f32>,

    /// Fingertip step that counts as movement (nav).
    #[arg(long)]
    pub noise_threshold: Option<f32>,

    /// Wrist speed for a swipe, normalized units per second (signal).
    #[arg(long)]
    pub swipe_speed: Option<f32>,

    /// Thumb–index distance rate for a pinch, per second (signal).
    #[arg(long)]
    pub pinch_speed: Option<f32>,

    /// Ignore hands detected with a lower score.
    #[arg(long)]
    pub min_confidence: Option<f32>,

    /// Flip frames horizontally (selfie view).
    #[arg(long)]
    pub mirror: bool,

    /// Open the debug preview window (Escape quits).
    #[arg(long)]
    pub preview: bool,

    /// Log events instead of acting on them.
    #[arg(long)]
    pub dry_run: bool,

    /// Deliver events on a background thread.
    #[arg(long)]
    pub queued_sink: bool,
}

fn check_positive(name: &str, value: Option<f32>) -> Result<(), AppError> {
    match value {
        Some(v) if !(v.is_finite() && v > 0.0) => {
            Err(AppError::Config(format!("--{} must be a positive number, got {}", name, v)))
        }
        _ => Ok(()),
    }
}

impl Cli {
    pub fn into_config(self) -> Result<AppConfig, AppError> {
        check_positive("pinch-threshold", self.pinch_threshold)?;
        check_positive("noise-threshold", self.noise_threshold)?;
        check_positive("swipe-speed",     self.swipe_speed)?;
        check_positive("pinch-speed",     self.pinch_speed)?;
        if let Some(c) = self.min_confidence {
            if !(0.0..=1.0).contains(&c) {
                return Err(AppError::Config(format!("--min-confidence must be within 0–1, got {}", c)));
            }
        }

        let source = match self.source {
            SourceArg::Udp    => SourceKind::Udp,
            SourceArg::Replay => match self.replay {
                Some(path) => SourceKind::Replay(path),
                None => return Err(AppError::Config("--source replay needs --replay PATH".into())),
            },
            #[cfg(feature = "leap")]
            SourceArg::Leap   => SourceKind::Leap,
        };

        let mut cfg = AppConfig {
            mode: match self.mode {
                ModeArg::Nav    => Mode::Navigation,
                ModeArg::Signal => Mode::Signal,
            },
            source,
            listen:      self.listen,
            target:      self.target,
            mirror:      self.mirror,
            preview:     self.preview,
            dry_run:     self.dry_run,
            queued_sink: self.queued_sink,
            ..AppConfig::default()
        };

        let nav = &mut cfg.navigation;
        if let Some(v) = self.pinch_threshold { nav.pinch_threshold = v; }
        if let Some(v) = self.noise_threshold { nav.noise_threshold = v; }

        let sig = &mut cfg.signal;
        if let Some(v) = self.swipe_speed { sig.velocity.swipe_speed = v; }
        if let Some(v) = self.pinch_speed { sig.velocity.pinch_speed = v; }

        if let Some(ms) = self.cooldown_ms {
            cfg.navigation.cooldown = Duration::from_millis(ms);
            cfg.signal.cooldown     = Duration::from_millis(ms);
        }
        if let Some(c) = self.min_confidence {
            cfg.navigation.min_confidence = c;
            cfg.signal.min_confidence     = c;
        }

        Ok(cfg)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_core::{NAVIGATION_COOLDOWN, SIGNAL_COOLDOWN};

    fn parse(args: &[&str]) -> Result<AppConfig, AppError> {
        let mut argv = vec!["hand_control"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)
            .map_err(|e| AppError::Config(e.to_string()))?
            .into_config()
    }

    #[test]
    fn defaults_match_documented_constants() {
        let cfg = parse(&["nav"]).unwrap();
        assert_eq!(cfg.mode, Mode::Navigation);
        assert_eq!(cfg.source, SourceKind::Udp);
        assert_eq!(cfg.listen, "127.0.0.1:5006".parse().unwrap());
        assert_eq!(cfg.target, "127.0.0.1:5005".parse().unwrap());
        assert_eq!(cfg.navigation.cooldown, NAVIGATION_COOLDOWN);
        assert_eq!(cfg.signal.cooldown, SIGNAL_COOLDOWN);
        assert!(!cfg.preview && !cfg.dry_run && !cfg.mirror);
    }

    #[test]
    fn overrides_reach_detectors() {
        let cfg = parse(&[
            "signal", "--swipe-speed", "2.5", "--pinch-speed", "0.8",
            "--cooldown-ms", "250", "--min-confidence", "0.5", "--dry-run",
        ]).unwrap();
        assert_eq!(cfg.mode, Mode::Signal);
        assert_eq!(cfg.signal.velocity.swipe_speed, 2.5);
        assert_eq!(cfg.signal.velocity.pinch_speed, 0.8);
        assert_eq!(cfg.signal.cooldown, Duration::from_millis(250));
        assert_eq!(cfg.signal.min_confidence, 0.5);
        assert!(cfg.dry_run);
    }

    #[test]
    fn replay_requires_path() {
        assert!(matches!(parse(&["nav", "--source", "replay"]), Err(AppError::Config(_))));
        let cfg = parse(&["nav", "--source", "replay", "--replay", "session.jsonl"]).unwrap();
        assert_eq!(cfg.source, SourceKind::Replay(PathBuf::from("session.jsonl")));
    }

    #[test]
    fn bad_thresholds_are_rejected() {
        assert!(parse(&["nav", "--pinch-threshold", "0"]).is_err());
        assert!(parse(&["nav", "--noise-threshold=-0.1"]).is_err());
        assert!(parse(&["nav", "--min-confidence", "1.5"]).is_err());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(parse(&["wave"]).is_err());
    }
}

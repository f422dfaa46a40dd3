//! hand_control — command-line entry point.

use clap::Parser;
use hand_control::{launch, Cli, Mode, SourceKind};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = match Cli::parse().into_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Hand Control — landmark gesture driver            ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    match cfg.mode {
        Mode::Navigation => println!("  Mode: navigation  (pinch one hand, point with the other)"),
        Mode::Signal     => println!("  Mode: signal      (swipe / pinch → {})", cfg.target),
    }
    match &cfg.source {
        SourceKind::Udp          => println!("  Source: udp {}", cfg.listen),
        SourceKind::Replay(path) => println!("  Source: replay {}", path.display()),
        #[cfg(feature = "leap")]
        SourceKind::Leap         => println!("  Source: LeapMotion hardware"),
    }
    if cfg.dry_run {
        println!("  Dry run: events are logged only");
    }
    println!();

    if let Err(e) = launch(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

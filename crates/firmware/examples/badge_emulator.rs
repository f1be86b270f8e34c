//! Badge emulator
//!
//! Runs the badge firmware on the desktop: the profile is read from a JSON
//! file, images from a directory, and each refreshed frame is written out as
//! a PNG (or printed as an ASCII preview).
//!
//! Keys `a`, `b`, `c` stand in for the face buttons; `u` / `d` for the rocker.
//! Every key typed is a separate press, so `ba` then Enter advances detail 1
//! and then the company.
//!
//! ```bash
//! # Scripted: one tick per key, then exit
//! cargo run -p firmware --example badge_emulator --features emulator -- \
//!     --profile demos/badge_data.json --root demos --out target/badge-frames --events abcc
//!
//! # Interactive: type keys + Enter, Ctrl-D to quit
//! cargo run -p firmware --example badge_emulator --features emulator
//! ```

#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use std::{
    io::Read,
    path::PathBuf,
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::Context;
use clap::Parser;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant};
use firmware::{
    app::{AppConfig, BadgeApp, Tick},
    input::{
        key_event, try_send_event, try_send_event_at, EventQueue, QueuedInput, SIMULTANEOUS_WINDOW,
    },
    profile_store::load_profile,
    FramebufferDisplay, FsImages, MonoLadder, UsbPower,
};
use platform::config;
use tracing_subscriber::EnvFilter;

static EVENTS: EventQueue = Channel::new();
static STDIN_CLOSED: AtomicBool = AtomicBool::new(false);

#[derive(Parser)]
#[command(name = "badge_emulator")]
#[command(about = "Ink Badge desktop emulator", long_about = None)]
#[command(version)]
struct Args {
    /// Badge profile (JSON)
    #[arg(long, default_value = "demos/badge_data.json")]
    profile: PathBuf,
    /// Directory that profile image paths are resolved against
    #[arg(long, default_value = "demos")]
    root: PathBuf,
    /// Write each refreshed frame here as frame-NNNN.png; without it frames
    /// are printed as ASCII
    #[arg(long)]
    out: Option<PathBuf>,
    /// Key presses to replay, one tick each (e.g. "abcc"); reads stdin when absent
    #[arg(long)]
    events: Option<String>,
    /// How long a tick waits for a key before going idle
    #[arg(long, default_value_t = config::DEFAULT_IDLE_TIMEOUT_MS)]
    idle_timeout_ms: u64,
    /// Make refreshes take as long as on the real panel
    #[arg(long)]
    realtime: bool,
}

type Emulator<'q> = BadgeApp<FramebufferDisplay, QueuedInput<'q>, UsbPower, MonoLadder, FsImages>;

fn show(app: &Emulator<'_>, print_ascii: bool) {
    if print_ascii {
        println!("{}", app.display().ascii_preview(2));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    tracing::info!(version = config::APP_VERSION, "{}", config::dev_banner());

    let profile = load_profile(&args.profile)
        .with_context(|| format!("loading profile {}", args.profile.display()))?;

    let mut display = FramebufferDisplay::badge().with_simulated_timing(args.realtime);
    if let Some(out) = &args.out {
        display = display.with_snapshots(out);
    }
    let print_ascii = args.out.is_none();

    let app_config = AppConfig {
        idle_timeout: embassy_time::Duration::from_millis(args.idle_timeout_ms),
        ..AppConfig::default()
    };
    let mut app = BadgeApp::new(
        display,
        QueuedInput::new(&EVENTS),
        UsbPower,
        MonoLadder,
        FsImages::new(&args.root),
        profile,
        app_config,
    );

    app.start().await.context("drawing first frame")?;
    show(&app, print_ascii);

    if let Some(script) = &args.events {
        for key in script.chars() {
            let Some(event) = key_event(key) else {
                tracing::warn!(%key, "no button for key, skipped");
                continue;
            };
            try_send_event(&EVENTS, event);
            if let Tick::Redrawn(_) = app.tick().await.context("replaying events")? {
                show(&app, print_ascii);
            }
        }
        return Ok(());
    }

    std::thread::spawn(|| {
        // A line arrives all at once; space the stamps so each key stays its own press
        let spacing = SIMULTANEOUS_WINDOW + Duration::from_millis(1);
        let mut last: Option<Instant> = None;
        for byte in std::io::stdin().bytes() {
            let Ok(byte) = byte else { break };
            if let Some(event) = key_event(char::from(byte)) {
                let now = Instant::now();
                let at = last.map_or(now, |prev| now.max(prev + spacing));
                try_send_event_at(&EVENTS, event, at);
                last = Some(at);
            }
        }
        STDIN_CLOSED.store(true, Ordering::Release);
    });

    println!("{}: press a / b / c then Enter, Ctrl-D to quit", config::APP_NAME);
    loop {
        match app.tick().await {
            Ok(Tick::Redrawn(_)) => show(&app, print_ascii),
            Ok(Tick::Idle) if STDIN_CLOSED.load(Ordering::Acquire) => break,
            Ok(Tick::Idle | Tick::Ignored) => {}
            Err(e) => tracing::error!(error = %e, "frame failed"),
        }
    }

    tracing::info!(frames = app.display().frames(), "emulator stopped");
    Ok(())
}

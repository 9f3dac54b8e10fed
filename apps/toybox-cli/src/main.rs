use clap::{Parser, Subcommand};
use glam::Vec2;
use serde::Serialize;
use std::time::Duration;
use toybox_common::{PALETTE, PerspectiveCamera};
use toybox_input::{InputEvent, InputRouter, Key};
use toybox_kernel::effects::{BOUNCE_DURATION, BURST_COUNT, FLASH_DURATION};
use toybox_kernel::playground::INITIAL_OBJECTS;
use toybox_kernel::{Playground, VisualObject};
use toybox_render::{DebugTextRenderer, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "toybox-cli", about = "Headless runner for the toybox scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and scene constants
    Info,
    /// Run the scene without a window, driving it with scripted input
    Simulate {
        /// RNG seed for the whole session
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Loop clock advance per frame, in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: u64,
        /// Press `b` every N frames
        #[arg(long)]
        burst_every: Option<u64>,
        /// Press `c` every N frames
        #[arg(long)]
        flash_every: Option<u64>,
        /// Press space on these frames
        #[arg(long, value_delimiter = ',')]
        bounce_at: Vec<u64>,
        /// Click at pixel X,Y of an 1280x720 viewport before the first frame
        #[arg(long, value_parser = parse_pixel)]
        click: Option<Vec2>,
        /// Print the final scene as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct SceneReport<'a> {
    frame: u64,
    clock_ms: u128,
    pending_timers: usize,
    objects: &'a [VisualObject],
}

/// A windowless session: scripted input goes through the same router the
/// desktop app uses.
struct Session {
    playground: Playground,
    router: InputRouter,
    camera: PerspectiveCamera,
}

impl Session {
    fn new(seed: u64) -> Self {
        Self {
            playground: Playground::new(seed),
            router: InputRouter::new(seed),
            camera: PerspectiveCamera::default(),
        }
    }

    fn send(&mut self, event: InputEvent, now: Duration) {
        for effect in self.router.route(event, &mut self.camera) {
            self.playground.apply(effect, now);
        }
    }
}

fn parse_pixel(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{s}`"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad X: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad Y: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn every(n: Option<u64>, frame: u64) -> bool {
    n.is_some_and(|n| n > 0 && frame % n == 0)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("toybox-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("initial objects: {INITIAL_OBJECTS}");
            println!("burst size: {BURST_COUNT}");
            println!("flash: {}ms", FLASH_DURATION.as_millis());
            println!("bounce: {}ms", BOUNCE_DURATION.as_millis());
            let palette: Vec<String> = PALETTE.iter().map(|c| c.to_string()).collect();
            println!("palette: {}", palette.join(" "));
        }
        Commands::Simulate {
            seed,
            frames,
            frame_ms,
            burst_every,
            flash_every,
            bounce_at,
            click,
            json,
        } => {
            tracing::info!(seed, frames, frame_ms, "simulating");
            let mut session = Session::new(seed);

            if let Some(pixel) = click {
                session.send(InputEvent::Click(pixel), Duration::ZERO);
            }

            for frame in 0..frames {
                let now = Duration::from_millis(frame * frame_ms);
                if every(burst_every, frame) {
                    session.send(InputEvent::KeyDown(Key::Character('b')), now);
                }
                if every(flash_every, frame) {
                    session.send(InputEvent::KeyDown(Key::Character('c')), now);
                }
                if bounce_at.contains(&frame) {
                    session.send(InputEvent::KeyDown(Key::Space), now);
                }
                session.playground.frame(now);
            }

            tracing::info!(
                objects = session.playground.scene().len(),
                pending_timers = session.playground.pending_timers(),
                "simulation finished"
            );
            let Session {
                playground, camera, ..
            } = session;
            if json {
                let report = SceneReport {
                    frame: playground.frame_count(),
                    clock_ms: playground.clock().as_millis(),
                    pending_timers: playground.pending_timers(),
                    objects: playground.scene().objects(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", DebugTextRenderer::new().render(&playground, &camera));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pixel_accepts_pairs() {
        assert_eq!(parse_pixel("400,300"), Ok(Vec2::new(400.0, 300.0)));
        assert_eq!(parse_pixel(" 1.5 , 2 "), Ok(Vec2::new(1.5, 2.0)));
        assert!(parse_pixel("400").is_err());
        assert!(parse_pixel("a,b").is_err());
    }

    #[test]
    fn every_handles_zero_and_none() {
        assert!(every(Some(10), 0));
        assert!(every(Some(10), 20));
        assert!(!every(Some(10), 5));
        assert!(!every(Some(0), 0));
        assert!(!every(None, 0));
    }

    #[test]
    fn scripted_click_bursts_and_flashes() {
        let mut session = Session::new(9);
        session.send(InputEvent::Click(Vec2::new(640.0, 360.0)), Duration::ZERO);
        assert_eq!(session.playground.scene().len(), INITIAL_OBJECTS + BURST_COUNT);
        assert_eq!(
            session.playground.pending_timers(),
            INITIAL_OBJECTS + BURST_COUNT
        );
    }

    #[test]
    fn report_serializes_objects() {
        let playground = Playground::new(1);
        let report = SceneReport {
            frame: 0,
            clock_ms: 0,
            pending_timers: 0,
            objects: playground.scene().objects(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["objects"].as_array().unwrap().len(), INITIAL_OBJECTS);
    }
}

//! Brickforge - headless build runner
//!
//! Runs one generation from a recorded response (or loads a saved build),
//! autosaves it to the gallery, optionally plays the explode animation and
//! writes the exports.
//!
//! Usage:
//!   brickforge --response fixture.json --prompt "a red heart" --out exports
//!   brickforge --load 1718000000000 --explode-frames 120

use std::path::PathBuf;
use std::time::Duration;

use brickforge::core::{logging, time::FrameTimer, Config, Error, Result};
use brickforge::gallery::GalleryStore;
use brickforge::generation::{
    Density, GenerationDispatcher, GenerationRequest, ImagePayload, ReplayGenerator,
};
use brickforge::session::{BuildSession, GenerationResolution};

const DEFAULT_CONFIG: &str = "brickforge.json";
const FRAME: Duration = Duration::from_micros(16_667);

const USAGE: &str = "Usage: brickforge [--config <file>] \
(--response <fixture.json> [--prompt <text>] [--image <file>] [--density low|medium|high] | --load <id>) \
[--explode-frames <n>] [--out <dir>]";

/// Value following `name` on the command line
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let config = match flag(&args, "--config") {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(DEFAULT_CONFIG)?,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(&args, config))
}

async fn run(args: &[String], config: Config) -> Result<()> {
    let mut session = BuildSession::new(config.scene.clone());
    let mut gallery = GalleryStore::open(&config.gallery);

    if let Some(id) = flag(args, "--load") {
        let project = gallery
            .get(id)
            .ok_or_else(|| Error::Storage(format!("no saved build with id {}", id)))?;
        session.load_project(project);
    } else if let Some(response) = flag(args, "--response") {
        let density = match flag(args, "--density") {
            Some(s) => s.parse::<Density>()?,
            None => config.generation.density,
        };
        let image = match flag(args, "--image") {
            Some(path) => Some(ImagePayload::from_bytes(std::fs::read(path)?)?),
            None => None,
        };
        let request = GenerationRequest {
            prompt: flag(args, "--prompt").map(str::to_string),
            image,
            density,
        };

        let generator = ReplayGenerator::from_config(response, &config.generation);
        let mut dispatcher = GenerationDispatcher::with_current_runtime(generator);
        let ticket = session.begin_generation(&request)?;
        dispatcher.dispatch(ticket, request);

        while session.is_generating() {
            let outcome = dispatcher
                .next()
                .await
                .ok_or_else(|| Error::Generation("generator channel closed".to_string()))?;
            if let GenerationResolution::Applied { project: Some(project) } = session.resolve(outcome)? {
                gallery.add(project);
            }
        }
    } else {
        log::info!("{}", USAGE);
        return Ok(());
    }

    let frames: u32 = flag(args, "--explode-frames")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    if frames > 0 {
        animate(&mut session, frames);
    }

    if let Some(dir) = flag(args, "--out") {
        let (obj, instructions) = session.write_exports(PathBuf::from(dir))?;
        log::info!("Wrote {} and {}", obj.display(), instructions.display());
        log::info!("Share: {}", session.share_link()?);
    }

    log::info!(
        "Build {:?}: {} blocks, {} layers, gallery holds {} builds",
        session.build_name(),
        session.current().len(),
        session.current().layers().len(),
        gallery.len()
    );
    Ok(())
}

/// Explode for `frames` frames, then rebuild for as many
fn animate(session: &mut BuildSession, frames: u32) {
    let mut timer = FrameTimer::new();

    for exploded in [true, false] {
        session.set_exploded(exploded);
        for _ in 0..frames {
            timer.advance(FRAME);
            session.tick(timer.delta_secs(), timer.elapsed_secs());
        }

        let spread = session
            .render_instances()
            .map(|i| i.transform.offset_from(i.position))
            .fold(0.0f32, f32::max);
        log::info!(
            "{} after {} frames: max offset from lattice {:.2}",
            if exploded { "Exploded" } else { "Rebuilt" },
            frames,
            spread
        );
    }
}

//! Headless sea mode session
//!
//! Loads the sea assets, then drives the submarine through a scripted ten
//! second run at 60 Hz against a recording render backend. Pass a `.ron` or
//! `.toml` config path as the first argument to override tuning.
//!
//! With the `rodio` feature the ambient loop plays on the default output
//! device; otherwise the mixer is pulled once per frame in-process.

use sea_engine::audio::{AudioSystem, ListenerLock};
use sea_engine::config::Config;
use sea_engine::foundation::logging;
use sea_engine::foundation::math::UVec2;
use sea_engine::input::{KeyCode, KeyboardState};
use sea_engine::mode::{AppEvent, FrameDriver};
use sea_engine::render::RecordingBackend;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use submarine::{SeaAssets, SeaMode, SeaModeConfig};

const FRAME_RATE: u32 = 60;
const SESSION_SECONDS: u32 = 10;
const WINDOW: (u32, u32) = (1280, 720);

/// Keys held during each two-second leg of the session
const SCRIPT: [&[KeyCode]; 5] = [
    &[KeyCode::W],
    &[KeyCode::W, KeyCode::A],
    &[KeyCode::Q],
    &[KeyCode::S, KeyCode::D],
    &[],
];

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("sea_demo failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => SeaModeConfig::load_from_file(PathBuf::from(path))?,
        None => SeaModeConfig::default(),
    };

    let asset_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let mut backend = RecordingBackend::new();
    let assets = load_assets(&asset_dir, &config, &mut backend)?;

    let audio = Arc::new(AudioSystem::default());
    #[cfg(feature = "rodio")]
    let _output = match sea_engine::audio::RodioOutput::start(Arc::clone(&audio)) {
        Ok(output) => Some(output),
        Err(e) => {
            log::warn!("Continuing without audio output: {e}");
            None
        }
    };

    let mode = SeaMode::new(&assets, Arc::clone(&audio), config)?;
    let mut driver = FrameDriver::new(Box::new(mode));

    let size = UVec2::new(WINDOW.0, WINDOW.1);
    let elapsed = 1.0 / FRAME_RATE as f32;
    let frames_per_leg = (FRAME_RATE * SESSION_SECONDS) as usize / SCRIPT.len();
    let mut mix_buffer = vec![0.0; (audio.config().sample_rate() / FRAME_RATE) as usize * 2];
    let mut peak = 0.0f32;
    let mut draws = 0usize;

    for (frame, leg) in (0..frames_per_leg * SCRIPT.len()).map(|f| (f, f / frames_per_leg)) {
        let keyboard = KeyboardState::from_pressed(SCRIPT[leg].iter().copied());
        let events = if frame == 0 {
            vec![AppEvent::WindowResized {
                width: WINDOW.0,
                height: WINDOW.1,
            }]
        } else {
            Vec::new()
        };

        driver.frame(&events, &keyboard, elapsed, size, &mut backend);
        draws += backend.draws().count();
        backend.take_commands();

        if cfg!(not(feature = "rodio")) {
            audio.mix(&mut mix_buffer);
            peak = mix_buffer.iter().fold(peak, |acc, v| acc.max(v.abs()));
        }

        if (frame + 1) % FRAME_RATE as usize == 0 {
            let camera = audio.listener().snapshot();
            log::info!(
                "t={:>4.1}s keys={:?} camera=({:.2}, {:.2}, {:.2}) draws={}",
                (frame + 1) as f32 * elapsed,
                SCRIPT[leg],
                camera.position.x,
                camera.position.y,
                camera.position.z,
                draws
            );
        }
    }

    log::info!(
        "Session done: {} frames, {} draws, {} unhandled events, mixer peak {:.3}",
        driver.frames(),
        draws,
        driver.unhandled_events(),
        peak
    );
    Ok(())
}

fn load_assets(
    dir: &Path,
    config: &SeaModeConfig,
    backend: &mut RecordingBackend,
) -> Result<SeaAssets, Box<dyn std::error::Error>> {
    let assets = SeaAssets::load(dir, backend)?;
    match &config.audio.ambient_sample {
        #[cfg(feature = "rodio")]
        Some(file) => {
            let sample = sea_engine::audio::Sample::load(dir.join(file))?;
            Ok(assets.with_ambient(sample))
        }
        #[cfg(not(feature = "rodio"))]
        Some(file) => {
            log::warn!("Ignoring ambient sample {file}: built without the rodio feature");
            Ok(assets)
        }
        None => Ok(assets),
    }
}

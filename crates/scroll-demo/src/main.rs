use std::process::ExitCode;

use log::{error, info};
use scroll_demo::ShipLevel;
use scroll_engine::platform::Clock;
use scroll_engine::{key, Game, GameConfig, GameError, HeadlessPlatform, InputEvent};

/// Frames to simulate before the scripted quit.
const DEMO_FRAMES: u64 = 600;

fn load_config() -> Result<GameConfig, GameError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| GameError::Load(format!("{}: {}", path, e)))?;
            info!("using config {}", path);
            GameConfig::from_json(&json)
        }
        None => Ok(GameConfig::default()),
    }
}

/// Thrust for two seconds, fire a burst, turn clockwise, then let go.
fn script(platform: &mut HeadlessPlatform) {
    platform.schedule(0, InputEvent::KeyDown { scancode: key::W });
    platform.schedule(60, InputEvent::KeyDown { scancode: key::SPACE });
    platform.schedule(120, InputEvent::KeyUp { scancode: key::W });
    platform.schedule(120, InputEvent::KeyDown { scancode: key::D });
    platform.schedule(180, InputEvent::KeyUp { scancode: key::SPACE });
    platform.schedule(240, InputEvent::KeyUp { scancode: key::D });
}

fn run() -> Result<(), GameError> {
    let config = load_config()?;
    let mut platform = HeadlessPlatform::new().quit_after_frames(DEMO_FRAMES);
    script(&mut platform);

    let mut game = Game::new(platform, config);
    game.initialize(&mut ShipLevel)?;
    game.run_loop()?;

    info!(
        "simulated {} frames, {} ms, {} actors alive",
        game.frame_count(),
        game.platform_mut().now_millis(),
        game.actor_count()
    );
    game.shutdown();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

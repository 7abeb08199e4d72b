use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use claw_controller::engine::game_loop::FixedStep;
use claw_controller::engine::physics::MovementPhase;
use claw_controller::game::characters::{
    CharacterAction, CharacterBuilder, Direction, Session, BASE_CONFIG,
};
use claw_controller::game::components::DamageType;
use claw_controller::game::events::{GameEvent, GameEventBus};

/// Simulated frame time of the demo (~60 FPS)
const FRAME_TIME: Duration = Duration::from_micros(16_667);
const DEMO_FRAMES: u32 = 900;

/// Scripted input, keyed by frame number
fn scripted_input(frame: u32) -> &'static [CharacterAction] {
    match frame {
        10 => &[CharacterAction::Run],
        40 => &[CharacterAction::ChangeDirection(Direction::Left)],
        70 => &[CharacterAction::StopMoving],
        80 => &[CharacterAction::Attack],
        120 => &[CharacterAction::Fire { out_of_ammo: false }],
        160 => &[CharacterAction::Duck],
        170 => &[CharacterAction::Fire { out_of_ammo: false }],
        200 => &[CharacterAction::Stand],
        230 => &[CharacterAction::StartJump],
        260 => &[CharacterAction::StartFalling],
        265 => &[CharacterAction::Attack],
        300 => &[CharacterAction::LandOnGround],
        _ => &[],
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting character controller demo...");

    let bus = GameEventBus::new();
    let listener = bus.subscribe_all();

    let mut claw = CharacterBuilder::with_standard_components(1, bus.clone())
        .config(BASE_CONFIG.active())
        .session(Session::default())
        .position(Vec2::new(320.0, 240.0))
        .rng(StdRng::seed_from_u64(2024))
        .build()?;

    let mut clock = FixedStep::default();

    for frame in 0..DEMO_FRAMES {
        for &action in scripted_input(frame) {
            claw.dispatch(action);
        }

        // Keep the body in sync with the scripted jump
        match frame {
            230 => claw.physics.set_phase(MovementPhase::Jumping),
            260 => claw.physics.set_phase(MovementPhase::Falling),
            300 => claw.physics.set_phase(MovementPhase::OnGround),
            _ => {}
        }

        match frame {
            400 => {
                bus.trigger(GameEvent::BossFightStarted);
            }
            450 => {
                claw.apply_damage(25, DamageType::Projectile, claw.position)?;
            }
            700 => {
                claw.apply_damage(1000, DamageType::Explosion, claw.position)?;
            }
            _ => {}
        }

        for _ in 0..clock.advance(FRAME_TIME) {
            claw.update(clock.step_ms());
        }

        bus.dispatch_queued();
        for event in bus.drain(listener) {
            info!("[frame {:>3}] {:?}", frame, event);
        }
    }

    info!(
        "Demo finished after {:?} simulated, character state {:?}",
        clock.simulated(),
        claw.state()
    );

    Ok(())
}

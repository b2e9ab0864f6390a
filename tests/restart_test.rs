//! Integration test: restart goes back to the exact starting conditions.

use dino_link::assets::Assets;
use dino_link::core::constants::{BASE_SPEED, INITIAL_CLOUDS};
use dino_link::core::{GameLoop, GameState, SurfaceSize};
use dino_link::input::{HeldKeys, KeyId};
use dino_link::player::{ControlBindings, Player};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SURFACE: Option<SurfaceSize> = Some(SurfaceSize {
    width: 120,
    height: 40,
});

fn new_loop(seed: u64) -> GameLoop<ChaCha8Rng> {
    GameLoop::new(
        Assets::builtin().0,
        ControlBindings::defaults(),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

/// Play until game over (nobody jumps).
fn play_to_game_over(game: &mut GameLoop<ChaCha8Rng>) {
    let keys: HeldKeys = [KeyId::ArrowDown].into_iter().collect();
    for i in 0..20_000 {
        if game.frame(i as f64 * 17.0, &keys).is_none() {
            return;
        }
    }
    panic!("game never ended");
}

/// Fields that do not depend on the random stream.
fn assert_initial_conditions(state: &GameState) {
    assert_eq!(state.players, Player::lineup(&ControlBindings::defaults()));
    assert!(state.obstacles.is_empty());
    assert_eq!(state.clouds.len(), INITIAL_CLOUDS);
    assert_eq!(state.score, 0);
    assert_eq!(state.frame_counter, 0);
    assert_eq!(state.speed, BASE_SPEED);
    assert_eq!(state.floor.x, 0.0);
    assert_eq!(state.obstacle_timer, 0.0);
    assert_eq!(state.cloud_timer, 0.0);
    assert!(state.next_obstacle_time > 0.0);
    assert!(!state.gradient.is_transitioning());
    assert_eq!(state.gradient.current(), 0);
    assert!(!state.game_over);
}

#[test]
fn test_fresh_start_conditions() {
    let mut game = new_loop(1);
    game.start(SURFACE).unwrap();
    assert_initial_conditions(game.state());
}

#[test]
fn test_restart_after_game_over_matches_fresh_start() {
    let mut game = new_loop(2);
    game.start(SURFACE).unwrap();
    play_to_game_over(&mut game);

    assert!(game.state().game_over);
    assert!(game.state().score > 0);

    game.restart(SURFACE).unwrap();
    assert!(game.is_running());
    assert_initial_conditions(game.state());
}

#[test]
fn test_restart_mid_run_matches_fresh_start() {
    let mut game = new_loop(3);
    game.start(SURFACE).unwrap();
    let keys = HeldKeys::new();
    for i in 0..120 {
        game.frame(i as f64 * 17.0, &keys);
    }

    game.restart(SURFACE).unwrap();
    assert_initial_conditions(game.state());
}

#[test]
fn test_restart_resets_clock() {
    let mut game = new_loop(4);
    game.start(SURFACE).unwrap();
    let keys = HeldKeys::new();
    game.frame(0.0, &keys);
    game.frame(17.0, &keys);

    game.restart(SURFACE).unwrap();

    // A late timestamp right after restart is the new zero point
    let report = game.frame(90_000.0, &keys).unwrap();
    assert_eq!(report.fixed_steps, 0);
    assert_eq!(game.state().delta, 0.0);
}

#[test]
fn test_refused_restart_keeps_previous_session() {
    let mut game = new_loop(5);
    game.start(SURFACE).unwrap();
    let keys = HeldKeys::new();
    for i in 0..30 {
        game.frame(i as f64 * 17.0, &keys);
    }
    let before = game.state().clone();

    assert!(game.restart(None).is_err());
    assert_eq!(game.state(), &before);
    assert!(game.is_running());
}

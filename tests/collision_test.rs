//! Integration test: hitbox geometry and the collision detector.

use dino_link::collision::{detect_collisions, obstacle_hitbox, player_hitbox, Hitbox};
use dino_link::core::constants::GROUND_Y;
use dino_link::player::{ControlBindings, Player, PlayerState};
use dino_link::world::{Obstacle, ObstacleKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_box(rng: &mut ChaCha8Rng) -> Hitbox {
    Hitbox::new(
        rng.gen_range(0..100) as f64,
        rng.gen_range(0..100) as f64,
        rng.gen_range(1..40) as f64,
        rng.gen_range(1..40) as f64,
    )
}

#[test]
fn test_overlap_is_symmetric() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut hits = 0;
    for _ in 0..2_000 {
        let a = random_box(&mut rng);
        let b = random_box(&mut rng);
        assert_eq!(a.overlaps(&b), b.overlaps(&a), "{:?} vs {:?}", a, b);
        if a.overlaps(&b) {
            hits += 1;
        }
    }
    assert!(hits > 0);
}

#[test]
fn test_touching_then_one_unit_in() {
    let a = Hitbox::new(0.0, 0.0, 20.0, 20.0);
    for (dx, dy) in [(20.0, 0.0), (-20.0, 0.0), (0.0, 20.0), (0.0, -20.0)] {
        let touching = Hitbox::new(dx, dy, 20.0, 20.0);
        assert!(!a.overlaps(&touching));

        let step = |v: f64| if v > 0.0 { v - 1.0 } else if v < 0.0 { v + 1.0 } else { 0.0 };
        let inside = Hitbox::new(step(dx), step(dy), 20.0, 20.0);
        assert!(a.overlaps(&inside));
    }
}

#[test]
fn test_cactus_sliding_through_both_players() {
    let mut players = Player::lineup(&ControlBindings::defaults());
    let height = 50.0;
    let mut cactus = Obstacle::new(
        ObstacleKind::Cactus { variant: 2 },
        400.0,
        GROUND_Y - height,
        25.0,
        height,
    );

    let mut deaths = Vec::new();
    while cactus.x + cactus.width > 0.0 {
        let died = detect_collisions(&mut players, std::slice::from_ref(&cactus));
        if died > 0 {
            deaths.push(cactus.x);
        }
        cactus.x -= 7.0;
    }

    // Player two (further right) dies first, then player one
    assert_eq!(deaths.len(), 2);
    assert!(deaths[0] > deaths[1]);
    assert!(players.iter().all(|p| p.state() == PlayerState::Dead));
}

#[test]
fn test_high_pterodactyl_passes_over_standing_player() {
    let mut players = Player::lineup(&ControlBindings::defaults());
    let ptero = Obstacle::new(
        ObstacleKind::Pterodactyl { frame: 0 },
        players[0].x,
        170.0,
        60.0,
        30.0,
    );

    let p = player_hitbox(&players[0]);
    let o = obstacle_hitbox(&ptero);
    assert!(o.y + o.height <= p.y);
    assert_eq!(detect_collisions(&mut players, &[ptero]), 0);
}

#[test]
fn test_pterodactyl_wing_margin_is_forgiving() {
    let mut players = Player::lineup(&ControlBindings::defaults());
    let p = player_hitbox(&players[0]);

    // Sprite box overlaps the player's hitbox by 10 units, but the outer 15%
    // of a 100-wide pterodactyl is not solid.
    let ptero = Obstacle::new(
        ObstacleKind::Pterodactyl { frame: 1 },
        p.x + p.width - 10.0,
        p.y,
        100.0,
        40.0,
    );
    assert_eq!(detect_collisions(&mut players, &[ptero]), 0);
    assert!(!players[0].is_dead);
}

#[test]
fn test_dead_player_not_recounted() {
    let mut players = Player::lineup(&ControlBindings::defaults());
    let cactus = Obstacle::new(
        ObstacleKind::Cactus { variant: 0 },
        players[0].x,
        GROUND_Y - 50.0,
        30.0,
        50.0,
    );

    assert_eq!(detect_collisions(&mut players, &[cactus.clone()]), 1);
    for _ in 0..10 {
        assert_eq!(detect_collisions(&mut players, &[cactus.clone()]), 0);
    }
}

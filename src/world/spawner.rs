//! Entity spawner: obstacles on a speed-scaled random timer, clouds on a
//! fixed timer.

use super::types::{Cloud, Obstacle, ObstacleKind};
use crate::assets::{Assets, SpriteId};
use crate::core::constants::*;
use crate::core::game_state::GameState;
use rand::Rng;

/// Result of a spawner tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// Timer has not fired.
    Waiting,
    Spawned,
    /// Timer fired but the sprite is not loaded; spawn skipped.
    NotReady(SpriteId),
}

/// Where a new cloud enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudPlacement {
    /// Just past the right edge.
    OffRightEdge,
    /// Anywhere across the width (initial sky).
    Scattered,
}

/// Frames until the next obstacle: `floor((60 + r*60) * 5 / speed)`.
/// Faster worlds spawn more often.
pub fn next_obstacle_interval<R: Rng>(rng: &mut R, speed: f64) -> f64 {
    let base = OBSTACLE_INTERVAL_MIN + rng.gen::<f64>() * OBSTACLE_INTERVAL_RANGE;
    (base * (OBSTACLE_INTERVAL_SPEED_FACTOR / speed)).floor()
}

/// Spawn one obstacle at the right edge: 25% pterodactyl, otherwise one of
/// six cacti standing on the ground line.
pub fn spawn_obstacle<R: Rng>(
    obstacles: &mut Vec<Obstacle>,
    assets: &Assets,
    rng: &mut R,
) -> SpawnOutcome {
    let obstacle = if rng.gen::<f64>() < PTERODACTYL_CHANCE {
        let Some(aspect) = assets.aspect_ratio(SpriteId::Pterodactyl(0)) else {
            return SpawnOutcome::NotReady(SpriteId::Pterodactyl(0));
        };
        let height = PTERODACTYL_HEIGHT_MIN + rng.gen::<f64>() * PTERODACTYL_HEIGHT_RANGE;
        let y = PTERODACTYL_Y_MIN + rng.gen::<f64>() * PTERODACTYL_Y_RANGE;
        Obstacle::new(
            ObstacleKind::Pterodactyl { frame: 0 },
            CANVAS_WIDTH,
            y,
            height * aspect,
            height,
        )
    } else {
        let variant = rng.gen_range(0..CACTUS_VARIANTS);
        let Some(aspect) = assets.aspect_ratio(SpriteId::Cactus(variant)) else {
            return SpawnOutcome::NotReady(SpriteId::Cactus(variant));
        };
        let height = CACTUS_HEIGHT_MIN + rng.gen::<f64>() * CACTUS_HEIGHT_RANGE;
        Obstacle::new(
            ObstacleKind::Cactus { variant },
            CANVAS_WIDTH,
            GROUND_Y - height,
            height * aspect,
            height,
        )
    };

    obstacles.push(obstacle);
    SpawnOutcome::Spawned
}

/// Advance the obstacle timer by the frame delta and spawn when it fires.
pub fn tick_obstacle_spawner<R: Rng>(
    state: &mut GameState,
    assets: &Assets,
    rng: &mut R,
) -> SpawnOutcome {
    state.obstacle_timer += state.delta;
    if state.obstacle_timer < state.next_obstacle_time {
        return SpawnOutcome::Waiting;
    }

    state.obstacle_timer = 0.0;
    state.next_obstacle_time = next_obstacle_interval(rng, state.speed);
    spawn_obstacle(&mut state.obstacles, assets, rng)
}

/// Spawn one cloud moving at 30-50% of `speed`.
pub fn spawn_cloud<R: Rng>(
    clouds: &mut Vec<Cloud>,
    assets: &Assets,
    speed: f64,
    placement: CloudPlacement,
    rng: &mut R,
) -> SpawnOutcome {
    let Some(aspect) = assets.aspect_ratio(SpriteId::Cloud) else {
        return SpawnOutcome::NotReady(SpriteId::Cloud);
    };

    let height = CLOUD_HEIGHT_MIN + rng.gen::<f64>() * CLOUD_HEIGHT_RANGE;
    let x = match placement {
        CloudPlacement::OffRightEdge => CANVAS_WIDTH,
        CloudPlacement::Scattered => rng.gen::<f64>() * CANVAS_WIDTH,
    };
    let y = CLOUD_Y_MIN + rng.gen::<f64>() * CLOUD_Y_RANGE;
    let speed = speed * (CLOUD_SPEED_FACTOR_MIN + rng.gen::<f64>() * CLOUD_SPEED_FACTOR_RANGE);

    clouds.push(Cloud {
        x,
        y,
        width: height * aspect,
        height,
        speed,
    });
    SpawnOutcome::Spawned
}

/// Advance the cloud timer; spawns every 150 delta units regardless of speed.
pub fn tick_cloud_spawner<R: Rng>(
    state: &mut GameState,
    assets: &Assets,
    rng: &mut R,
) -> SpawnOutcome {
    state.cloud_timer += state.delta;
    if state.cloud_timer < CLOUD_SPAWN_INTERVAL {
        return SpawnOutcome::Waiting;
    }

    state.cloud_timer = 0.0;
    spawn_cloud(
        &mut state.clouds,
        assets,
        state.speed,
        CloudPlacement::OffRightEdge,
        rng,
    )
}

/// Scatter the opening clouds across the sky.
pub fn populate_initial_clouds<R: Rng>(
    state: &mut GameState,
    assets: &Assets,
    rng: &mut R,
) -> SpawnOutcome {
    state.clouds.clear();
    for _ in 0..INITIAL_CLOUDS {
        let outcome = spawn_cloud(
            &mut state.clouds,
            assets,
            state.speed,
            CloudPlacement::Scattered,
            rng,
        );
        if outcome != SpawnOutcome::Spawned {
            return outcome;
        }
    }
    SpawnOutcome::Spawned
}

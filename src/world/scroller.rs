//! World scroller: moves floor, obstacles and clouds left and drops what
//! has fully left the screen.

use super::types::{Cloud, Floor, Obstacle, ObstacleKind};
use crate::core::constants::{CANVAS_WIDTH, FRAMES_PER_FLAP, PTERODACTYL_FLAP_FRAMES};
use crate::core::game_state::GameState;

/// Flap frame shared by every pterodactyl, driven by the fixed-step counter.
pub fn flap_frame(frame_counter: u64) -> usize {
    (frame_counter / FRAMES_PER_FLAP) as usize % PTERODACTYL_FLAP_FRAMES
}

/// Slide the floor strip, wrapping after one full canvas width.
pub fn scroll_floor(floor: &mut Floor, movement: f64) {
    floor.x -= movement;
    if floor.x <= -CANVAS_WIDTH {
        floor.x = 0.0;
    }
}

/// Move obstacles by `movement`, update pterodactyl flaps, and remove
/// obstacles with `x + width <= 0` in place.
pub fn scroll_obstacles(obstacles: &mut Vec<Obstacle>, movement: f64, frame_counter: u64) {
    let flap = flap_frame(frame_counter);
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= movement;
        if let ObstacleKind::Pterodactyl { frame } = &mut obstacle.kind {
            *frame = flap;
            obstacle.sprite = obstacle.kind.sprite();
        }
    }
    obstacles.retain(|o| !o.is_off_screen());
}

/// Move clouds by their own speed.
pub fn scroll_clouds(clouds: &mut Vec<Cloud>, delta: f64) {
    for cloud in clouds.iter_mut() {
        cloud.x -= cloud.speed * delta;
    }
    clouds.retain(|c| !c.is_off_screen());
}

/// Foreground scroll for one frame. Returns the distance moved; nothing
/// moves once the game is over.
pub fn scroll_world(state: &mut GameState) -> f64 {
    if !state.is_active() {
        return 0.0;
    }

    let movement = state.speed * state.delta;
    scroll_floor(&mut state.floor, movement);
    scroll_obstacles(&mut state.obstacles, movement, state.frame_counter);
    movement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteId;
    use crate::player::ControlBindings;

    fn cactus(x: f64, width: f64) -> Obstacle {
        Obstacle::new(ObstacleKind::Cactus { variant: 0 }, x, 200.0, width, 50.0)
    }

    #[test]
    fn test_floor_wraps_after_full_width() {
        let mut floor = Floor::default();
        scroll_floor(&mut floor, 900.0);
        assert_eq!(floor.x, -900.0);

        scroll_floor(&mut floor, 20.0);
        assert_eq!(floor.x, 0.0);
    }

    #[test]
    fn test_obstacle_removed_exactly_when_fully_past() {
        let mut obstacles = vec![cactus(5.0, 10.0)];

        scroll_obstacles(&mut obstacles, 14.0, 0);
        assert_eq!(obstacles.len(), 1, "still partly visible at x = -9");

        scroll_obstacles(&mut obstacles, 1.0, 0);
        assert!(obstacles.is_empty(), "x + width == 0 is gone");
    }

    #[test]
    fn test_x_decreases_monotonically() {
        let mut obstacles = vec![cactus(900.0, 20.0)];
        let mut last = obstacles[0].x;
        for _ in 0..50 {
            scroll_obstacles(&mut obstacles, 7.0, 0);
            assert!(obstacles[0].x < last);
            last = obstacles[0].x;
        }
    }

    #[test]
    fn test_pterodactyl_flap_follows_frame_counter() {
        let mut obstacles = vec![Obstacle::new(
            ObstacleKind::Pterodactyl { frame: 0 },
            500.0,
            180.0,
            60.0,
            40.0,
        )];

        scroll_obstacles(&mut obstacles, 1.0, 9);
        assert_eq!(obstacles[0].sprite, SpriteId::Pterodactyl(0));

        scroll_obstacles(&mut obstacles, 1.0, 10);
        assert_eq!(obstacles[0].kind, ObstacleKind::Pterodactyl { frame: 1 });
        assert_eq!(obstacles[0].sprite, SpriteId::Pterodactyl(1));

        scroll_obstacles(&mut obstacles, 1.0, 20);
        assert_eq!(obstacles[0].sprite, SpriteId::Pterodactyl(0));
    }

    #[test]
    fn test_clouds_use_own_speed() {
        let mut clouds = vec![Cloud {
            x: 100.0,
            y: 40.0,
            width: 50.0,
            height: 20.0,
            speed: 3.0,
        }];
        scroll_clouds(&mut clouds, 2.0);
        assert_eq!(clouds[0].x, 94.0);

        // 94 - 60: partly visible, kept
        scroll_clouds(&mut clouds, 20.0);
        assert_eq!(clouds.len(), 1);
        assert_eq!(clouds[0].x, 34.0);

        // 34 - 84 = -50: right edge reaches 0
        scroll_clouds(&mut clouds, 28.0);
        assert!(clouds.is_empty());
    }

    #[test]
    fn test_scroll_world_frozen_when_game_over() {
        let mut state = GameState::new(&ControlBindings::defaults());
        state.obstacles.push(cactus(400.0, 20.0));
        state.delta = 1.0;

        assert_eq!(scroll_world(&mut state), 7.0);
        assert_eq!(state.obstacles[0].x, 393.0);
        assert_eq!(state.floor.x, -7.0);

        state.game_over = true;
        assert_eq!(scroll_world(&mut state), 0.0);
        assert_eq!(state.obstacles[0].x, 393.0);
    }
}

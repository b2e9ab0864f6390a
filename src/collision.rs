//! Collision detection between players and obstacles.
//!
//! Both sides use hitboxes smaller than their sprite boxes. Players lose 6
//! units on every side. Obstacles lose 4 units top and bottom. Cacti also
//! lose 4 units left and right, while pterodactyls keep only the central 70%
//! of their width because of the wings' transparent margin.

use crate::core::constants::{
    OBSTACLE_HITBOX_INSET, PLAYER_HITBOX_INSET, PTERODACTYL_HITBOX_WIDTH_FRACTION,
};
use crate::player::Player;
use crate::world::{Obstacle, ObstacleKind};

/// Axis-aligned rectangle in canvas units, `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Hitbox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink by `dx` on the left and right and by `dy` on the top and bottom.
    pub fn inset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - 2.0 * dx,
            height: self.height - 2.0 * dy,
        }
    }

    /// Strict overlap. Boxes that only touch do not collide.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

pub fn player_hitbox(player: &Player) -> Hitbox {
    Hitbox::new(player.x, player.y, player.width, player.height)
        .inset(PLAYER_HITBOX_INSET, PLAYER_HITBOX_INSET)
}

pub fn obstacle_hitbox(obstacle: &Obstacle) -> Hitbox {
    let sprite_box = Hitbox::new(obstacle.x, obstacle.y, obstacle.width, obstacle.height);
    match obstacle.kind {
        ObstacleKind::Cactus { .. } => sprite_box.inset(OBSTACLE_HITBOX_INSET, OBSTACLE_HITBOX_INSET),
        ObstacleKind::Pterodactyl { .. } => {
            let margin = obstacle.width * (1.0 - PTERODACTYL_HITBOX_WIDTH_FRACTION) / 2.0;
            sprite_box.inset(margin, OBSTACLE_HITBOX_INSET)
        }
    }
}

/// Kill every living player whose hitbox overlaps any obstacle. Returns how
/// many players died this call. Dead players are skipped, and obstacles
/// stay where they are.
pub fn detect_collisions(players: &mut [Player], obstacles: &[Obstacle]) -> usize {
    let mut deaths = 0;
    for player in players.iter_mut().filter(|p| !p.is_dead) {
        let hitbox = player_hitbox(player);
        if obstacles
            .iter()
            .any(|obstacle| hitbox.overlaps(&obstacle_hitbox(obstacle)))
        {
            player.kill();
            deaths += 1;
        }
    }
    deaths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteId;
    use crate::player::ControlBindings;

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let b = Hitbox::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let below = Hitbox::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_one_unit_overlap_detected() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let b = Hitbox::new(9.0, 9.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_player_hitbox_inset() {
        let player = Player::new(100.0, ControlBindings::player_one());
        let hitbox = player_hitbox(&player);
        assert_eq!(hitbox.x, 106.0);
        assert_eq!(hitbox.y, player.y + 6.0);
        assert_eq!(hitbox.width, 38.0);
        assert_eq!(hitbox.height, 38.0);
    }

    #[test]
    fn test_cactus_hitbox_inset() {
        let cactus = Obstacle::new(ObstacleKind::Cactus { variant: 0 }, 300.0, 200.0, 30.0, 50.0);
        assert_eq!(obstacle_hitbox(&cactus), Hitbox::new(304.0, 204.0, 22.0, 42.0));
    }

    #[test]
    fn test_pterodactyl_hitbox_central_band() {
        let ptero = Obstacle::new(
            ObstacleKind::Pterodactyl { frame: 0 },
            300.0,
            180.0,
            100.0,
            40.0,
        );
        let hitbox = obstacle_hitbox(&ptero);
        assert!((hitbox.x - 315.0).abs() < 1e-9);
        assert!((hitbox.width - 70.0).abs() < 1e-9);
        assert_eq!(hitbox.y, 184.0);
        assert_eq!(hitbox.height, 32.0);
    }

    #[test]
    fn test_detect_kills_only_overlapping_player() {
        let mut players = Player::lineup(&ControlBindings::defaults());
        let y = players[0].y;
        let obstacles = vec![Obstacle::new(
            ObstacleKind::Cactus { variant: 0 },
            players[0].x,
            y,
            40.0,
            50.0,
        )];

        assert_eq!(detect_collisions(&mut players, &obstacles), 1);
        assert!(players[0].is_dead);
        assert_eq!(players[0].sprite, SpriteId::PlayerDeath);
        assert!(!players[1].is_dead);
        assert_eq!(obstacles.len(), 1);

        // Sticky: no second death for the same overlap
        assert_eq!(detect_collisions(&mut players, &obstacles), 0);
    }

    #[test]
    fn test_jumping_player_clears_cactus() {
        let mut players = Player::lineup(&ControlBindings::defaults());
        players[0].jump_height = 70.0;
        players[0].y -= 70.0;
        let obstacles = vec![Obstacle::new(
            ObstacleKind::Cactus { variant: 0 },
            players[0].x,
            crate::core::constants::GROUND_Y - 40.0,
            30.0,
            40.0,
        )];

        assert_eq!(detect_collisions(&mut players, &obstacles), 0);
        assert!(!players[0].is_dead);
    }
}

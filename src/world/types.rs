//! World entity data structures.

use crate::assets::SpriteId;
use crate::core::constants::CANVAS_WIDTH;

/// Obstacle variants. Only pterodactyls animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Ground obstacle; `variant` picks one of the six cactus sprites.
    Cactus { variant: usize },
    /// Airborne obstacle with a two-frame flap.
    Pterodactyl { frame: usize },
}

impl ObstacleKind {
    pub fn is_flying(&self) -> bool {
        matches!(self, Self::Pterodactyl { .. })
    }

    pub fn sprite(&self) -> SpriteId {
        match *self {
            Self::Cactus { variant } => SpriteId::Cactus(variant),
            Self::Pterodactyl { frame } => SpriteId::Pterodactyl(frame),
        }
    }
}

/// A single obstacle in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub sprite: SpriteId,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
            sprite: kind.sprite(),
        }
    }

    /// Fully past the left edge.
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width <= 0.0
    }
}

/// A decorative cloud drifting slower than the foreground.
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Pixels per normalized frame.
    pub speed: f64,
}

impl Cloud {
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width <= 0.0
    }
}

/// Two back-to-back floor tiles scrolled as one strip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Floor {
    /// Left edge of the first tile, in `(-CANVAS_WIDTH, 0]`.
    pub x: f64,
}

impl Floor {
    /// Left edges of both tiles.
    pub fn tile_offsets(&self) -> [f64; 2] {
        [self.x, self.x + CANVAS_WIDTH]
    }
}

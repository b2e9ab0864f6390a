//! Sprite catalogue.
//!
//! Sprites are 1-bit bitmaps parsed from a text sheet embedded at compile
//! time. The simulation only needs each sprite's intrinsic aspect ratio;
//! the renderer scales the bitmap into whatever box the entity occupies.
//! A sprite that failed to parse is simply absent, and callers check
//! [`Assets::is_ready`] before using it.

use crate::core::constants::{CACTUS_VARIANTS, PTERODACTYL_FLAP_FRAMES, RUN_ANIM_FRAMES};
use std::collections::HashMap;
use std::fmt;

const BUILTIN_SHEET: &str = include_str!("../assets/sprites.txt");

/// Identifies one drawable image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    PlayerRun(usize),
    PlayerDown(usize),
    PlayerIdle,
    PlayerDeath,
    Cactus(usize),
    Pterodactyl(usize),
    Floor,
    Cloud,
}

impl SpriteId {
    /// Every sprite the game draws.
    pub fn all() -> Vec<SpriteId> {
        let mut ids = Vec::new();
        ids.extend((0..RUN_ANIM_FRAMES).map(SpriteId::PlayerRun));
        ids.extend((0..RUN_ANIM_FRAMES).map(SpriteId::PlayerDown));
        ids.push(SpriteId::PlayerIdle);
        ids.push(SpriteId::PlayerDeath);
        ids.extend((0..CACTUS_VARIANTS).map(SpriteId::Cactus));
        ids.extend((0..PTERODACTYL_FLAP_FRAMES).map(SpriteId::Pterodactyl));
        ids.push(SpriteId::Floor);
        ids.push(SpriteId::Cloud);
        ids
    }

    /// Parse a sheet section name (`run1`, `cactus6`, `cloud`, ...).
    /// Numbered names are 1-based in the sheet.
    pub fn from_name(name: &str) -> Option<Self> {
        let numbered = |prefix: &str, count: usize| -> Option<usize> {
            let n: usize = name.strip_prefix(prefix)?.parse().ok()?;
            (1..=count).contains(&n).then(|| n - 1)
        };

        match name {
            "idle" => Some(Self::PlayerIdle),
            "death" => Some(Self::PlayerDeath),
            "floor" => Some(Self::Floor),
            "cloud" => Some(Self::Cloud),
            _ => numbered("run", RUN_ANIM_FRAMES)
                .map(Self::PlayerRun)
                .or_else(|| numbered("down", RUN_ANIM_FRAMES).map(Self::PlayerDown))
                .or_else(|| numbered("cactus", CACTUS_VARIANTS).map(Self::Cactus))
                .or_else(|| {
                    numbered("pterodactyl", PTERODACTYL_FLAP_FRAMES).map(Self::Pterodactyl)
                }),
        }
    }
}

/// A 1-bit bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Sprite {
    /// Build from rows of `#` (ink) and `.` (empty). Returns `None` for an
    /// empty or ragged bitmap.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let width = rows.first()?.as_ref().chars().count();
        if width == 0 {
            return None;
        }

        let mut pixels = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            if row.chars().count() != width {
                return None;
            }
            pixels.extend(row.chars().map(|c| c == '#'));
        }

        Some(Self {
            width,
            height: rows.len(),
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Intrinsic width / height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn is_set(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.pixels[row * self.width + col]
    }
}

/// A problem found while reading a sprite sheet. Non-fatal: the sprite is
/// left out and dependent features skip themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    UnknownSprite { name: String, line: usize },
    InvalidRow { line: usize },
    Malformed { name: String },
    Missing(SpriteId),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSprite { name, line } => {
                write!(f, "line {}: unknown sprite [{}]", line, name)
            }
            Self::InvalidRow { line } => write!(f, "line {}: row outside of a sprite section", line),
            Self::Malformed { name } => write!(f, "sprite [{}] is empty or ragged", name),
            Self::Missing(id) => write!(f, "sprite {:?} not present in sheet", id),
        }
    }
}

impl std::error::Error for AssetError {}

/// Loaded sprites, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    sprites: HashMap<SpriteId, Sprite>,
}

impl Assets {
    /// No sprites loaded yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the sheet compiled into the binary.
    pub fn builtin() -> (Self, Vec<AssetError>) {
        Self::parse(BUILTIN_SHEET)
    }

    /// Parse a sprite sheet. Every expected sprite that did not load is
    /// reported as `Missing`.
    pub fn parse(sheet: &str) -> (Self, Vec<AssetError>) {
        let mut assets = Self::empty();
        let mut errors = Vec::new();
        let mut current: Option<(String, usize, Vec<&str>)> = None;

        let finish = |section: Option<(String, usize, Vec<&str>)>,
                          assets: &mut Assets,
                          errors: &mut Vec<AssetError>| {
            let Some((name, line, rows)) = section else {
                return;
            };
            match SpriteId::from_name(&name) {
                None => errors.push(AssetError::UnknownSprite { name, line }),
                Some(id) => match Sprite::from_rows(&rows) {
                    Some(sprite) => assets.insert(id, sprite),
                    None => errors.push(AssetError::Malformed { name }),
                },
            }
        };

        for (index, raw) in sheet.lines().enumerate() {
            let line = raw.trim();
            let line_no = index + 1;

            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                finish(current.take(), &mut assets, &mut errors);
                current = Some((name.trim().to_string(), line_no, Vec::new()));
                continue;
            }

            if line.chars().all(|c| c == '#' || c == '.') {
                match current.as_mut() {
                    Some((_, _, rows)) => rows.push(line),
                    None => errors.push(AssetError::InvalidRow { line: line_no }),
                }
                continue;
            }

            if line.starts_with('#') {
                continue; // comment
            }

            errors.push(AssetError::InvalidRow { line: line_no });
        }
        finish(current.take(), &mut assets, &mut errors);

        for id in SpriteId::all() {
            if !assets.is_ready(id) {
                errors.push(AssetError::Missing(id));
            }
        }

        (assets, errors)
    }

    pub fn insert(&mut self, id: SpriteId, sprite: Sprite) {
        self.sprites.insert(id, sprite);
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    pub fn is_ready(&self, id: SpriteId) -> bool {
        self.sprites.contains_key(&id)
    }

    pub fn aspect_ratio(&self, id: SpriteId) -> Option<f64> {
        self.get(id).map(Sprite::aspect_ratio)
    }
}

// Drawing surface (logical pixels)
pub const CANVAS_WIDTH: f64 = 920.0;
pub const CANVAS_HEIGHT: f64 = 280.0;

// Tick and timing
pub const TARGET_FPS: f64 = 60.0;
pub const FRAME_TIME_MS: f64 = 1000.0 / TARGET_FPS;
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
pub const MAX_STEPS_PER_FRAME: u32 = 3;
pub const FRAMES_PER_SCORE_POINT: u64 = 5;

// Scroll speed (logical pixels per normalized frame)
pub const BASE_SPEED: f64 = 7.0;
pub const MAX_SPEED: f64 = 12.0;
pub const SCORE_PER_SPEED_TIER: u64 = 60;

// Players
pub const PLAYER_COUNT: usize = 2;
pub const PLAYER_START_X: [f64; PLAYER_COUNT] = [100.0, 200.0];
pub const PLAYER_WIDTH: f64 = 50.0;
pub const STANDING_HEIGHT: f64 = 50.0;
pub const CROUCHING_HEIGHT: f64 = 30.0;
/// Top of a standing, grounded player.
pub const PLAYER_BASELINE_Y: f64 = CANVAS_HEIGHT - 75.0;
pub const JUMP_PERIOD: f64 = 33.0;
pub const JUMP_PEAK: f64 = 78.0;
pub const FAST_FALL_RATE: f64 = 2.0;
pub const ANIM_TICKS_PER_FRAME: f64 = 10.0;
pub const RUN_ANIM_FRAMES: usize = 2;

// Obstacles
/// Line the cacti stand on (also the players' feet).
pub const GROUND_Y: f64 = CANVAS_HEIGHT - 25.0;
pub const PTERODACTYL_CHANCE: f64 = 0.25;
pub const CACTUS_VARIANTS: usize = 6;
pub const CACTUS_HEIGHT_MIN: f64 = 40.0;
pub const CACTUS_HEIGHT_RANGE: f64 = 20.0;
pub const PTERODACTYL_HEIGHT_MIN: f64 = 30.0;
pub const PTERODACTYL_HEIGHT_RANGE: f64 = 20.0;
pub const PTERODACTYL_Y_MIN: f64 = 170.0;
pub const PTERODACTYL_Y_RANGE: f64 = 40.0;
pub const PTERODACTYL_FLAP_FRAMES: usize = 2;
pub const FRAMES_PER_FLAP: u64 = 10;
pub const OBSTACLE_INTERVAL_MIN: f64 = 60.0;
pub const OBSTACLE_INTERVAL_RANGE: f64 = 60.0;
pub const OBSTACLE_INTERVAL_SPEED_FACTOR: f64 = 5.0;

// Hitboxes
pub const PLAYER_HITBOX_INSET: f64 = 6.0;
pub const OBSTACLE_HITBOX_INSET: f64 = 4.0;
pub const PTERODACTYL_HITBOX_WIDTH_FRACTION: f64 = 0.7;

// Clouds
pub const CLOUD_SPAWN_INTERVAL: f64 = 150.0;
pub const INITIAL_CLOUDS: usize = 3;
pub const CLOUD_HEIGHT_MIN: f64 = 30.0;
pub const CLOUD_HEIGHT_RANGE: f64 = 20.0;
pub const CLOUD_Y_MIN: f64 = 20.0;
pub const CLOUD_Y_RANGE: f64 = 100.0;
pub const CLOUD_SPEED_FACTOR_MIN: f64 = 0.3;
pub const CLOUD_SPEED_FACTOR_RANGE: f64 = 0.2;

// Floor
pub const FLOOR_Y: f64 = CANVAS_HEIGHT - 40.0;
pub const FLOOR_HEIGHT: f64 = 40.0;

// Background gradient
pub const SCORE_PER_GRADIENT_TIER: u64 = 30;
pub const GRADIENT_STEP: f64 = 0.02;
pub const GRADIENT_STEP_MS: f64 = 16.0;

// Drawing surface minimum (terminal cells)
pub const MIN_SURFACE_WIDTH: u16 = 46;
pub const MIN_SURFACE_HEIGHT: u16 = 14;

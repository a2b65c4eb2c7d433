//! Gameplay tuning.  All distances are world units; the playfield is a
//! portrait 1080×2200 area regardless of the terminal it is drawn on.

// ── World ─────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 1080.0;
pub const WORLD_HEIGHT: f32 = 2200.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_LEFT: f32 = 400.0;
pub const PLAYER_TOP: f32 = 2000.0;
pub const PLAYER_WIDTH: f32 = 100.0;
pub const PLAYER_HEIGHT: f32 = 20.0;
pub const PLAYER_SPEED: f32 = 10.0;
pub const STARTING_LIVES: u32 = 3;

// ── Formation ─────────────────────────────────────────────────────────────────

pub const ENEMY_ROWS: usize = 5;
pub const ENEMY_COLS: usize = 10;
pub const ENEMY_SIZE: f32 = 50.0;
/// Distance between the top-left corners of neighbouring cells.
pub const ENEMY_SPACING: f32 = 60.0;
pub const FORMATION_LEFT: f32 = 80.0;
pub const FORMATION_TOP: f32 = 400.0;
/// Vertical step applied to the whole formation on every direction flip.
pub const FORMATION_STEP_DOWN: f32 = 40.0;

pub const BASE_ENEMY_SPEED: f32 = 2.0;
/// Each level adds 150% of the base speed.
pub const ENEMY_SPEED_MULTIPLIER: f32 = 1.5;
pub const MAX_LEVEL: u32 = 3;

pub const ENEMY_POINTS: u32 = 10;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: f32 = 10.0;
pub const BULLET_HEIGHT: f32 = 20.0;
pub const BULLET_SPEED: f32 = 20.0;

// ── Obstacles ─────────────────────────────────────────────────────────────────

pub const OBSTACLE_COUNT: usize = 4;
pub const OBSTACLE_WIDTH: f32 = 120.0;
pub const OBSTACLE_HEIGHT: f32 = 40.0;
pub const OBSTACLE_TOP: f32 = 1750.0;
pub const OBSTACLE_HEALTH: i32 = 3;

// ── Mystery enemy ─────────────────────────────────────────────────────────────

pub const MYSTERY_WIDTH: f32 = 80.0;
pub const MYSTERY_HEIGHT: f32 = 40.0;
pub const MYSTERY_TOP: f32 = 250.0;
pub const MYSTERY_SPEED: f32 = 5.0;
/// Chance per tick that an absent mystery enemy appears.
pub const MYSTERY_SPAWN_CHANCE: f64 = 0.01;
pub const MYSTERY_POINTS: u32 = 50;

// ── Enemy fire ────────────────────────────────────────────────────────────────

/// Inclusive bounds, in milliseconds, of the delay between enemy shots.
pub const ENEMY_FIRE_MIN_DELAY_MS: u64 = 1000;
pub const ENEMY_FIRE_MAX_DELAY_MS: u64 = 3000;

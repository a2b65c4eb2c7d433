//! All game entity types — plain data plus a little rectangle geometry.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Build a rectangle from its top-left corner and size.
    pub fn from_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn offset(&mut self, dx: f32, dy: f32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Move so the top-left corner lands on (`left`, `top`), keeping the size.
    pub fn offset_to(&mut self, left: f32, top: f32) {
        let (w, h) = (self.width(), self.height());
        *self = Self::from_size(left, top, w, h);
    }

    /// Strict overlap test: rectangles that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Title screen, waiting for the first tap.
    Start,
    Playing,
    GameOver,
    /// "Play Again" prompt shown after acknowledging game over.
    PlayAgain,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// A pointer gesture, carrying the horizontal world coordinate where relevant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Press { x: f32 },
    Drag { x: f32 },
    /// Pointer lifted: fires while playing, otherwise advances the state machine.
    Release,
    /// Gesture abandoned: clears movement intent without firing.
    Cancel,
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    /// Held movement intent: -1 left, 0 stationary, 1 right.
    pub direction: i32,
    pub lives: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Signed vertical speed: negative travels up (player), positive down (enemy).
    pub speed: f32,
}

impl Bullet {
    pub fn is_upward(&self) -> bool {
        self.speed < 0.0
    }

    pub fn is_downward(&self) -> bool {
        self.speed > 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    pub health: i32,
}

impl Obstacle {
    /// Destroyed obstacles stay in the list but no longer block or render.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MysteryEnemy {
    pub rect: Rect,
    /// -1 travelling left, 1 travelling right.
    pub direction: i32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Owned by the frame loop and mutated in place by
/// the functions in `compute`.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Formation in grid order (row-major at spawn time).
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub obstacles: Vec<Obstacle>,
    pub mystery: Option<MysteryEnemy>,
    /// Formation heading: -1 left, 1 right.
    pub enemy_direction: i32,
    pub enemy_speed: f32,
    pub level: u32,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

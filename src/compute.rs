//! Game-logic functions.
//!
//! Every public function takes the single owned `GameState` by exclusive
//! reference (and, where needed, an RNG handle) and updates it in place.
//! Side effects beyond the state are limited to the injected RNG.

use rand::Rng;

use crate::entities::{
    Bullet, Enemy, GameState, GameStatus, InputEvent, MysteryEnemy, Obstacle, Player, Rect,
};
use crate::tuning::*;

/// What happened during one call to [`advance_tick`].  The frame loop uses it
/// for logging and for persisting a beaten high score.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub enemies_destroyed: u32,
    pub mystery_destroyed: bool,
    pub obstacle_hits: u32,
    pub lives_lost: u32,
    /// The formation touched the player and was put back on its start grid.
    pub formation_reset: bool,
    pub level_up: bool,
    pub game_over: bool,
    /// Set when the score overtook the high score this tick.
    pub new_high_score: Option<u32>,
}

// ── Difficulty ────────────────────────────────────────────────────────────────

pub fn enemy_speed_for_level(level: u32) -> f32 {
    BASE_ENEMY_SPEED * (1.0 + level.saturating_sub(1) as f32 * ENEMY_SPEED_MULTIPLIER)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// The full 5×10 grid at its start position, row-major.
pub fn spawn_formation() -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(ENEMY_ROWS * ENEMY_COLS);
    for row in 0..ENEMY_ROWS {
        for col in 0..ENEMY_COLS {
            enemies.push(Enemy {
                rect: Rect::from_size(
                    FORMATION_LEFT + col as f32 * ENEMY_SPACING,
                    FORMATION_TOP + row as f32 * ENEMY_SPACING,
                    ENEMY_SIZE,
                    ENEMY_SIZE,
                ),
            });
        }
    }
    enemies
}

/// Full-health obstacles spread evenly across the world width.
pub fn spawn_obstacles(width: f32) -> Vec<Obstacle> {
    let gap = (width - OBSTACLE_COUNT as f32 * OBSTACLE_WIDTH) / (OBSTACLE_COUNT as f32 + 1.0);
    (0..OBSTACLE_COUNT)
        .map(|i| Obstacle {
            rect: Rect::from_size(
                gap + i as f32 * (OBSTACLE_WIDTH + gap),
                OBSTACLE_TOP,
                OBSTACLE_WIDTH,
                OBSTACLE_HEIGHT,
            ),
            health: OBSTACLE_HEALTH,
        })
        .collect()
}

/// Build the title-screen state for a playfield of the given size.
pub fn init_state(width: f32, height: f32, high_score: u32) -> GameState {
    GameState {
        player: Player {
            rect: Rect::from_size(PLAYER_LEFT, PLAYER_TOP, PLAYER_WIDTH, PLAYER_HEIGHT),
            direction: 0,
            lives: STARTING_LIVES,
        },
        enemies: spawn_formation(),
        bullets: Vec::new(),
        obstacles: spawn_obstacles(width),
        mystery: None,
        enemy_direction: 1,
        enemy_speed: enemy_speed_for_level(1),
        level: 1,
        score: 0,
        high_score,
        status: GameStatus::Start,
        frame: 0,
        width,
        height,
    }
}

// ── Input-driven state transitions ───────────────────────────────────────────

/// Apply one pointer event.  Returns the new status when the event caused a
/// state-machine transition.
pub fn apply_input(state: &mut GameState, event: InputEvent) -> Option<GameStatus> {
    match (state.status, event) {
        (GameStatus::Playing, InputEvent::Press { x } | InputEvent::Drag { x }) => {
            state.player.direction = if x > state.width / 2.0 { 1 } else { -1 };
            None
        }
        (GameStatus::Playing, InputEvent::Release) => {
            state.player.direction = 0;
            player_shoot(state);
            None
        }
        (GameStatus::Playing, InputEvent::Cancel) => {
            state.player.direction = 0;
            None
        }
        (GameStatus::Start, InputEvent::Release) => {
            state.status = GameStatus::Playing;
            Some(GameStatus::Playing)
        }
        (GameStatus::GameOver, InputEvent::Release) => {
            state.status = GameStatus::PlayAgain;
            Some(GameStatus::PlayAgain)
        }
        (GameStatus::PlayAgain, InputEvent::Release) => {
            restart(state);
            Some(GameStatus::Playing)
        }
        _ => None,
    }
}

/// Fire one bullet upward from the top-centre of the player.
pub fn player_shoot(state: &mut GameState) {
    let cx = state.player.rect.center_x();
    let top = state.player.rect.top;
    state.bullets.push(Bullet {
        rect: Rect::new(cx - BULLET_WIDTH / 2.0, top - BULLET_HEIGHT, cx + BULLET_WIDTH / 2.0, top),
        speed: -BULLET_SPEED,
    });
}

/// Spawn a downward bullet under a uniformly chosen enemy.  Returns `false`
/// when there is nobody left to shoot.
pub fn apply_enemy_fire(state: &mut GameState, rng: &mut impl Rng) -> bool {
    if state.enemies.is_empty() {
        return false;
    }
    let shooter = state.enemies[rng.gen_range(0..state.enemies.len())].rect;
    let cx = shooter.center_x();
    state.bullets.push(Bullet {
        rect: Rect::new(
            cx - BULLET_WIDTH / 2.0,
            shooter.bottom,
            cx + BULLET_WIDTH / 2.0,
            shooter.bottom + BULLET_HEIGHT,
        ),
        speed: BULLET_SPEED,
    });
    true
}

/// Reset score, level, lives, formation and obstacles, then resume play.
pub fn restart(state: &mut GameState) {
    state.level = 1;
    state.enemy_speed = enemy_speed_for_level(1);
    state.enemy_direction = 1;
    state.enemies = spawn_formation();
    state.obstacles = spawn_obstacles(state.width);
    state.bullets.clear();
    state.mystery = None;
    state.player.lives = STARTING_LIVES;
    state.player.direction = 0;
    state.score = 0;
    state.status = GameStatus::Playing;
}

/// Advance to the next level, or end the game once the last level is cleared.
pub fn next_level(state: &mut GameState, outcome: &mut TickOutcome) {
    if state.level < MAX_LEVEL {
        state.level += 1;
        state.enemy_speed = enemy_speed_for_level(state.level);
        state.enemy_direction = 1;
        state.enemies = spawn_formation();
        state.obstacles = spawn_obstacles(state.width);
        outcome.level_up = true;
    } else {
        state.status = GameStatus::GameOver;
        outcome.game_over = true;
    }
}

// ── Per-frame tick (RNG is injected) ─────────────────────────────────────────

/// Advance the simulation by one frame.  Does nothing unless playing.
pub fn advance_tick(state: &mut GameState, rng: &mut impl Rng) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.status != GameStatus::Playing {
        return outcome;
    }
    state.frame += 1;

    move_player(state);
    move_formation(state);
    move_mystery(state, rng);
    move_bullets(state);

    resolve_player_bullets(state, &mut outcome);
    resolve_enemy_bullets(state, &mut outcome);
    resolve_formation_contact(state, &mut outcome);

    if state.score > state.high_score {
        state.high_score = state.score;
        outcome.new_high_score = Some(state.score);
    }

    if state.player.lives == 0 {
        state.status = GameStatus::GameOver;
        outcome.game_over = true;
    } else if state.enemies.is_empty() {
        next_level(state, &mut outcome);
    }

    outcome
}

// ── 1. Movement ──────────────────────────────────────────────────────────────

fn move_player(state: &mut GameState) {
    let rect = &mut state.player.rect;
    rect.offset(state.player.direction as f32 * PLAYER_SPEED, 0.0);
    if rect.left < 0.0 {
        rect.offset_to(0.0, rect.top);
    }
    if rect.right > state.width {
        rect.offset_to(state.width - rect.width(), rect.top);
    }
}

/// Slide the formation sideways; if anyone crossed an edge, the whole
/// formation turns around and steps down in the same tick.
fn move_formation(state: &mut GameState) {
    let dx = state.enemy_direction as f32 * state.enemy_speed;
    for enemy in &mut state.enemies {
        enemy.rect.offset(dx, 0.0);
    }

    let width = state.width;
    let min_left = state
        .enemies
        .iter()
        .map(|e| e.rect.left)
        .fold(f32::INFINITY, f32::min);
    let max_right = state
        .enemies
        .iter()
        .map(|e| e.rect.right)
        .fold(f32::NEG_INFINITY, f32::max);
    // Pull the whole formation back by the overshoot so it ends the tick in bounds.
    let overshoot = if min_left < 0.0 {
        -min_left
    } else if max_right > width {
        width - max_right
    } else {
        return;
    };

    state.enemy_direction = -state.enemy_direction;
    for enemy in &mut state.enemies {
        enemy.rect.offset(overshoot, FORMATION_STEP_DOWN);
    }
}

fn move_mystery(state: &mut GameState, rng: &mut impl Rng) {
    match state.mystery.as_mut() {
        None => {
            if rng.gen_bool(MYSTERY_SPAWN_CHANCE) {
                let (left, direction) = if rng.gen_bool(0.5) {
                    (0.0, 1)
                } else {
                    (state.width - MYSTERY_WIDTH, -1)
                };
                state.mystery = Some(MysteryEnemy {
                    rect: Rect::from_size(left, MYSTERY_TOP, MYSTERY_WIDTH, MYSTERY_HEIGHT),
                    direction,
                });
            }
        }
        Some(mystery) => {
            mystery.rect.offset(mystery.direction as f32 * MYSTERY_SPEED, 0.0);
            let exited = (mystery.direction < 0 && mystery.rect.left < 0.0)
                || (mystery.direction > 0 && mystery.rect.right > state.width);
            if exited {
                state.mystery = None;
            }
        }
    }
}

/// Move every bullet along its speed and drop the ones that left the screen.
fn move_bullets(state: &mut GameState) {
    let height = state.height;
    state.bullets.retain_mut(|b| {
        b.rect.offset(0.0, b.speed);
        b.rect.top >= 0.0 && b.rect.bottom <= height
    });
}

// ── 2. Collisions ────────────────────────────────────────────────────────────

/// Player bullets ↔ formation (first enemy in grid order wins), then ↔ mystery.
fn resolve_player_bullets(state: &mut GameState, outcome: &mut TickOutcome) {
    let enemies = &mut state.enemies;
    let mystery = &mut state.mystery;
    let mut gained = 0;

    state.bullets.retain(|b| {
        if !b.is_upward() {
            return true;
        }
        if let Some(i) = enemies.iter().position(|e| e.rect.intersects(&b.rect)) {
            enemies.remove(i);
            outcome.enemies_destroyed += 1;
            gained += ENEMY_POINTS;
            return false;
        }
        if mystery.as_ref().is_some_and(|m| m.rect.intersects(&b.rect)) {
            *mystery = None;
            outcome.mystery_destroyed = true;
            gained += MYSTERY_POINTS;
            return false;
        }
        true
    });

    state.score += gained;
}

/// Enemy bullets ↔ obstacles, then ↔ player (one hit per tick at most).
fn resolve_enemy_bullets(state: &mut GameState, outcome: &mut TickOutcome) {
    let obstacles = &mut state.obstacles;
    state.bullets.retain(|b| {
        if !b.is_downward() {
            return true;
        }
        match obstacles
            .iter_mut()
            .find(|o| o.is_alive() && o.rect.intersects(&b.rect))
        {
            Some(obstacle) => {
                obstacle.health -= 1;
                outcome.obstacle_hits += 1;
                false
            }
            None => true,
        }
    });

    let player = state.player.rect;
    if let Some(i) = state
        .bullets
        .iter()
        .position(|b| b.is_downward() && b.rect.intersects(&player))
    {
        state.bullets.remove(i);
        lose_life(state, outcome);
    }
}

/// An enemy touching the player costs a life and sends the formation home.
fn resolve_formation_contact(state: &mut GameState, outcome: &mut TickOutcome) {
    let player = state.player.rect;
    if state.enemies.iter().any(|e| e.rect.intersects(&player)) {
        lose_life(state, outcome);
        state.enemies = spawn_formation();
        outcome.formation_reset = true;
    }
}

fn lose_life(state: &mut GameState, outcome: &mut TickOutcome) {
    if state.player.lives > 0 {
        state.player.lives -= 1;
        outcome.lives_lost += 1;
    }
}

//! Render boundary.
//!
//! `snapshot` copies what a renderer needs out of the `GameState` so the
//! shared lock can be released before any terminal I/O happens.

use crate::entities::{GameState, GameStatus, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
    /// Carries remaining health so renderers can show damage.
    Obstacle { health: i32 },
    Mystery,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    pub lives: u32,
    pub level: u32,
    pub score: u32,
    pub high_score: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Banner {
    Title,
    GameOver,
    PlayAgain,
}

impl Banner {
    pub fn text(&self) -> &'static str {
        match self {
            Banner::Title => "Space Invaders",
            Banner::GameOver => "Game Over",
            Banner::PlayAgain => "Play Again",
        }
    }

    /// Second line shown under the banner.
    pub fn hint(&self) -> &'static str {
        match self {
            Banner::Title => "Press SPACE to start",
            Banner::GameOver => "Press SPACE to continue",
            Banner::PlayAgain => "Press SPACE to play again",
        }
    }
}

/// Everything drawn for one frame, in world units.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameView {
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
    pub banner: Option<Banner>,
    pub width: f32,
    pub height: f32,
}

pub fn snapshot(state: &GameState) -> FrameView {
    let mut sprites = Vec::with_capacity(
        1 + state.enemies.len() + state.bullets.len() + state.obstacles.len() + 1,
    );

    sprites.push(Sprite { kind: SpriteKind::Player, rect: state.player.rect });
    sprites.extend(
        state
            .enemies
            .iter()
            .map(|e| Sprite { kind: SpriteKind::Enemy, rect: e.rect }),
    );
    sprites.extend(state.obstacles.iter().filter(|o| o.is_alive()).map(|o| Sprite {
        kind: SpriteKind::Obstacle { health: o.health },
        rect: o.rect,
    }));
    if let Some(mystery) = &state.mystery {
        sprites.push(Sprite { kind: SpriteKind::Mystery, rect: mystery.rect });
    }
    sprites.extend(state.bullets.iter().map(|b| Sprite {
        kind: if b.is_upward() {
            SpriteKind::PlayerBullet
        } else {
            SpriteKind::EnemyBullet
        },
        rect: b.rect,
    }));

    let banner = match state.status {
        GameStatus::Start => Some(Banner::Title),
        GameStatus::GameOver => Some(Banner::GameOver),
        GameStatus::PlayAgain => Some(Banner::PlayAgain),
        GameStatus::Playing => None,
    };

    FrameView {
        sprites,
        hud: Hud {
            lives: state.player.lives,
            level: state.level,
            score: state.score,
            high_score: state.high_score,
        },
        banner,
        width: state.width,
        height: state.height,
    }
}

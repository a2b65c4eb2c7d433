use space_invaders::compute::init_state;
use space_invaders::entities::*;
use space_invaders::view::*;

fn count(view: &FrameView, kind: SpriteKind) -> usize {
    view.sprites.iter().filter(|s| s.kind == kind).count()
}

#[test]
fn title_frame_shows_everything_and_the_title() {
    let state = init_state(1080.0, 2200.0, 40);
    let view = snapshot(&state);

    assert_eq!(view.banner, Some(Banner::Title));
    assert_eq!(view.sprites.len(), 1 + 50 + 4);
    assert_eq!(count(&view, SpriteKind::Player), 1);
    assert_eq!(count(&view, SpriteKind::Enemy), 50);
    assert_eq!(count(&view, SpriteKind::Obstacle { health: 3 }), 4);
    assert_eq!(
        view.hud,
        Hud { lives: 3, level: 1, score: 0, high_score: 40 }
    );
    assert_eq!((view.width, view.height), (1080.0, 2200.0));
}

#[test]
fn banner_follows_status() {
    let mut state = init_state(1080.0, 2200.0, 0);
    for (status, banner) in [
        (GameStatus::Playing, None),
        (GameStatus::GameOver, Some(Banner::GameOver)),
        (GameStatus::PlayAgain, Some(Banner::PlayAgain)),
    ] {
        state.status = status;
        assert_eq!(snapshot(&state).banner, banner);
    }
    assert_eq!(Banner::GameOver.text(), "Game Over");
    assert_eq!(Banner::PlayAgain.text(), "Play Again");
}

#[test]
fn destroyed_obstacles_are_not_drawn() {
    let mut state = init_state(1080.0, 2200.0, 0);
    state.obstacles[0].health = 0;
    state.obstacles[1].health = 2;
    let view = snapshot(&state);
    assert_eq!(count(&view, SpriteKind::Obstacle { health: 3 }), 2);
    assert_eq!(count(&view, SpriteKind::Obstacle { health: 2 }), 1);
    assert_eq!(view.sprites.len(), 1 + 50 + 3);
}

#[test]
fn bullets_and_mystery_are_classified() {
    let mut state = init_state(1080.0, 2200.0, 0);
    let rect = Rect::new(100.0, 100.0, 110.0, 120.0);
    state.bullets.push(Bullet { rect, speed: -20.0 });
    state.bullets.push(Bullet { rect, speed: 20.0 });
    state.bullets.push(Bullet { rect, speed: 20.0 });
    state.mystery = Some(MysteryEnemy {
        rect: Rect::from_size(0.0, 250.0, 80.0, 40.0),
        direction: 1,
    });

    let view = snapshot(&state);
    assert_eq!(count(&view, SpriteKind::PlayerBullet), 1);
    assert_eq!(count(&view, SpriteKind::EnemyBullet), 2);
    assert_eq!(count(&view, SpriteKind::Mystery), 1);
}

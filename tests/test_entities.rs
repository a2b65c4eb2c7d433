use space_invaders::compute::init_state;
use space_invaders::entities::*;

#[test]
fn rect_geometry() {
    let r = Rect::from_size(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r, Rect::new(10.0, 20.0, 110.0, 70.0));
    assert_eq!(r.width(), 100.0);
    assert_eq!(r.height(), 50.0);
    assert_eq!(r.center_x(), 60.0);
}

#[test]
fn rect_offset_and_offset_to_keep_size() {
    let mut r = Rect::from_size(10.0, 20.0, 100.0, 50.0);
    r.offset(-15.0, 40.0);
    assert_eq!(r, Rect::new(-5.0, 60.0, 95.0, 110.0));

    r.offset_to(0.0, r.top);
    assert_eq!(r, Rect::new(0.0, 60.0, 100.0, 110.0));
}

#[test]
fn rect_intersection_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&Rect::new(5.0, 5.0, 15.0, 15.0)));
    assert!(a.intersects(&Rect::new(2.0, 2.0, 3.0, 3.0))); // contained
    // Shared edges do not count
    assert!(!a.intersects(&Rect::new(10.0, 0.0, 20.0, 10.0)));
    assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 20.0)));
    assert!(!a.intersects(&Rect::new(30.0, 30.0, 40.0, 40.0)));
}

#[test]
fn bullet_direction_follows_speed_sign() {
    let rect = Rect::new(0.0, 0.0, 10.0, 20.0);
    let up = Bullet { rect, speed: -20.0 };
    let down = Bullet { rect, speed: 20.0 };
    assert!(up.is_upward() && !up.is_downward());
    assert!(down.is_downward() && !down.is_upward());
}

#[test]
fn obstacle_alive_until_health_runs_out() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(Obstacle { rect, health: 1 }.is_alive());
    assert!(!Obstacle { rect, health: 0 }.is_alive());
    assert!(!Obstacle { rect, health: -1 }.is_alive());
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(1080.0, 2200.0, 0);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.offset(99.0, 0.0);
    cloned.score = 999;
    cloned.enemies.clear();
    cloned.status = GameStatus::Playing;

    assert_eq!(original.player.rect.left, 400.0);
    assert_eq!(original.score, 0);
    assert_eq!(original.enemies.len(), 50);
    assert_eq!(original.status, GameStatus::Start);
}

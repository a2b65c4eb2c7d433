use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use space_invaders::compute::init_state;
use space_invaders::entities::*;
use space_invaders::scheduler::FireScheduler;

fn shared_state(status: GameStatus) -> Arc<Mutex<GameState>> {
    let mut state = init_state(1080.0, 2200.0, 0);
    state.status = status;
    Arc::new(Mutex::new(state))
}

fn fast(shared: &Arc<Mutex<GameState>>) -> FireScheduler {
    FireScheduler::start_with_delays(Arc::clone(shared), StdRng::seed_from_u64(3), 1..=2)
}

/// Poll `cond` for up to two seconds.
fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}

fn bullet_count(shared: &Arc<Mutex<GameState>>) -> usize {
    shared.lock().unwrap().bullets.len()
}

#[test]
fn fires_downward_bullets_while_playing() {
    let shared = shared_state(GameStatus::Playing);
    let scheduler = fast(&shared);

    assert!(wait_for(|| bullet_count(&shared) >= 3));
    scheduler.stop();

    let state = shared.lock().unwrap();
    assert!(state.bullets.iter().all(Bullet::is_downward));
}

#[test]
fn holds_fire_on_title_screen() {
    let shared = shared_state(GameStatus::Start);
    let scheduler = fast(&shared);
    thread::sleep(Duration::from_millis(50));

    assert!(scheduler.is_running());
    scheduler.stop();
    assert_eq!(bullet_count(&shared), 0);
}

#[test]
fn keeps_running_with_an_empty_formation() {
    let shared = shared_state(GameStatus::Playing);
    shared.lock().unwrap().enemies.clear();
    let scheduler = fast(&shared);
    thread::sleep(Duration::from_millis(50));

    assert!(scheduler.is_running());
    scheduler.stop();
    assert_eq!(bullet_count(&shared), 0);
}

#[test]
fn retires_itself_at_game_over() {
    let shared = shared_state(GameStatus::Playing);
    let scheduler = fast(&shared);
    assert!(wait_for(|| bullet_count(&shared) >= 1));

    shared.lock().unwrap().status = GameStatus::GameOver;
    assert!(wait_for(|| !scheduler.is_running()));

    let fired = bullet_count(&shared);
    thread::sleep(Duration::from_millis(30));
    assert_eq!(bullet_count(&shared), fired);
}

#[test]
fn nothing_fires_after_stop() {
    let shared = shared_state(GameStatus::Playing);
    let scheduler = fast(&shared);
    assert!(wait_for(|| bullet_count(&shared) >= 1));

    scheduler.stop();
    let fired = bullet_count(&shared);
    thread::sleep(Duration::from_millis(30));
    assert_eq!(bullet_count(&shared), fired);
}

#[test]
fn stop_interrupts_a_long_wait() {
    let shared = shared_state(GameStatus::Playing);
    let scheduler = FireScheduler::start_with_delays(
        Arc::clone(&shared),
        StdRng::seed_from_u64(3),
        10_000..=10_000,
    );

    // The opening shot lands before the long wait begins.
    assert!(wait_for(|| bullet_count(&shared) == 1));

    let started = Instant::now();
    scheduler.stop();
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(bullet_count(&shared), 1);
}

#[test]
fn fires_immediately_when_started_mid_game() {
    let shared = shared_state(GameStatus::Playing);
    let scheduler = FireScheduler::start_with_delays(
        Arc::clone(&shared),
        StdRng::seed_from_u64(3),
        10_000..=10_000,
    );

    assert!(wait_for(|| bullet_count(&shared) == 1));
    scheduler.stop();
    assert!(shared.lock().unwrap().bullets[0].is_downward());
}

#[test]
fn dropping_the_handle_stops_it() {
    let shared = shared_state(GameStatus::Playing);
    {
        let _scheduler = fast(&shared);
        assert!(wait_for(|| bullet_count(&shared) >= 1));
    }
    let fired = bullet_count(&shared);
    thread::sleep(Duration::from_millis(30));
    assert_eq!(bullet_count(&shared), fired);
}

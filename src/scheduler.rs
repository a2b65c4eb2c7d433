//! Enemy fire scheduler.
//!
//! Runs on its own thread, independent of the frame loop.  Each cycle it
//! makes one enemy shoot (under the shared lock), then waits a random delay.
//! A fresh scheduler therefore fires straight away.
//! The wait doubles as the cancellation point: `stop` wakes it immediately,
//! and it is consulted before every re-arm, so nothing fires after a stop.
//! The scheduler also retires itself once the game is over.

use std::ops::RangeInclusive;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info};

use crate::compute::apply_enemy_fire;
use crate::entities::{GameState, GameStatus};
use crate::tuning::{ENEMY_FIRE_MAX_DELAY_MS, ENEMY_FIRE_MIN_DELAY_MS};

pub struct FireScheduler {
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl FireScheduler {
    /// Start with the standard 1–3 second cadence.
    pub fn start(state: Arc<Mutex<GameState>>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::start_with_delays(
            state,
            rng,
            ENEMY_FIRE_MIN_DELAY_MS..=ENEMY_FIRE_MAX_DELAY_MS,
        )
    }

    /// Start with an explicit delay range in milliseconds.
    pub fn start_with_delays(
        state: Arc<Mutex<GameState>>,
        rng: StdRng,
        delays_ms: RangeInclusive<u64>,
    ) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || run(state, rng, delays_ms, stop_rx));
        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// `false` once the thread has exited, whether stopped or retired at game over.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // The thread may already be gone; that is fine.
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("enemy fire scheduler thread panicked");
            }
        }
    }
}

impl Drop for FireScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(
    state: Arc<Mutex<GameState>>,
    mut rng: StdRng,
    delays_ms: RangeInclusive<u64>,
    stop_rx: mpsc::Receiver<()>,
) {
    info!("enemy fire scheduler started");
    loop {
        {
            let mut state = match state.lock() {
                Ok(guard) => guard,
                Err(_) => {
                    error!("game state lock poisoned, stopping enemy fire");
                    return;
                }
            };

            match state.status {
                GameStatus::GameOver | GameStatus::PlayAgain => {
                    info!(score = state.score, "game over, enemy fire scheduler stopping");
                    return;
                }
                GameStatus::Playing => {
                    if apply_enemy_fire(&mut state, &mut rng) {
                        debug!(bullets = state.bullets.len(), "enemy fired");
                    }
                }
                // Title screen: keep the cadence, hold fire.
                GameStatus::Start => {}
            }
        }

        // Re-arm only if nobody asked us to stop during the wait.
        let delay = Duration::from_millis(rng.gen_range(delays_ms.clone()));
        match stop_rx.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                info!("enemy fire scheduler cancelled");
                return;
            }
        }
    }
}

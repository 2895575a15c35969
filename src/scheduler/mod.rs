//! Cooperative step scheduler
//!
//! Playback suspends only inside [`Scheduler::delay`]. While paused, the
//! scheduler polls the pause flag every `poll_interval` before starting the
//! countdown, so a pause takes effect within one poll interval without losing
//! the playback position.
//!
//! Every run holds a [`RunToken`] minted from the scheduler's generation
//! counter. Resetting or starting a new run bumps the generation, which turns
//! every older token stale: their delays resolve to [`Cancelled`] and their
//! commits are refused.

use crate::engine::errors::Cancelled;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Capability to act on behalf of one generation
#[derive(Debug, Clone)]
pub struct RunToken {
    generation: u64,
    current: Rc<Cell<u64>>,
}

impl RunToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.current.get() == self.generation
    }

    /// `Err(Cancelled)` once superseded
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_current() {
            Ok(())
        } else {
            Err(Cancelled)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    paused: Rc<Cell<bool>>,
    generation: Rc<Cell<u64>>,
    poll_interval: Duration,
}

impl Scheduler {
    pub fn new(poll_interval: Duration) -> Self {
        Scheduler {
            paused: Rc::new(Cell::new(false)),
            generation: Rc::new(Cell::new(0)),
            poll_interval,
        }
    }

    /// Invalidate all outstanding tokens and mint one for the new generation
    pub fn begin(&self) -> RunToken {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        RunToken {
            generation,
            current: Rc::clone(&self.generation),
        }
    }

    /// Invalidate all outstanding tokens
    pub fn cancel(&self) {
        self.generation.set(self.generation.get() + 1);
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.set(paused);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Wait out any pause, then sleep for `duration`
    pub async fn delay(&self, token: &RunToken, duration: Duration) -> Result<(), Cancelled> {
        token.check()?;
        while self.paused.get() {
            tokio::time::sleep(self.poll_interval).await;
            token.check()?;
        }
        tokio::time::sleep(duration).await;
        token.check()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_begin_invalidates_older_tokens() {
        let scheduler = Scheduler::default();
        let first = scheduler.begin();
        assert!(first.is_current());
        let second = scheduler.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        scheduler.cancel();
        assert_eq!(second.check(), Err(Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_waits_for_duration() {
        let scheduler = Scheduler::default();
        let token = scheduler.begin();
        let started = Instant::now();
        scheduler
            .delay(&token, Duration::from_millis(250))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_holds_while_paused() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let scheduler = Scheduler::default();
                scheduler.set_paused(true);
                let token = scheduler.begin();

                let resume = scheduler.clone();
                tokio::task::spawn_local(async move {
                    tokio::time::sleep(Duration::from_millis(1000)).await;
                    resume.set_paused(false);
                });

                let started = Instant::now();
                scheduler
                    .delay(&token, Duration::from_millis(50))
                    .await
                    .unwrap();
                // resumes on the first poll after the flag clears
                assert!(started.elapsed() >= Duration::from_millis(1050));
                assert!(started.elapsed() <= Duration::from_millis(1150));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_token_is_cancelled_after_sleep() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let scheduler = Scheduler::default();
                let token = scheduler.begin();

                let other = scheduler.clone();
                tokio::task::spawn_local(async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    other.cancel();
                });

                let result = scheduler.delay(&token, Duration::from_millis(100)).await;
                assert_eq!(result, Err(Cancelled));
            })
            .await;
    }
}

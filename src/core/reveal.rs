//! Progressive point-by-point reveal, advanced one step per host timer tick.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    /// Dataset assigned, waiting for the first tick. Nothing is revealed.
    Idle,
    /// At least one tick applied, more points to reveal.
    Running,
    /// Every point is revealed; no further ticks are expected.
    Complete,
}

/// Snapshot of reveal progress for hosts driving progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    pub revealed_count: usize,
    pub elapsed_seconds: f64,
    pub running: bool,
}

/// Timer request handed to the host when a reveal run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSchedule {
    pub generation: u64,
    pub interval: Duration,
}

/// Outcome of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTick {
    Advanced { revealed_count: usize },
    Completed { revealed_count: usize },
    /// Tick scheduled for an earlier run; nothing changed.
    Stale { current: u64, received: u64 },
    /// Tick for the current run after it already completed; nothing changed.
    AlreadyComplete,
}

impl RevealTick {
    #[must_use]
    pub fn changed(self) -> bool {
        matches!(self, Self::Advanced { .. } | Self::Completed { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealAnimator {
    phase: RevealPhase,
    revealed_count: usize,
    total: usize,
    elapsed_seconds: f64,
    interval_seconds: f64,
    generation: u64,
}

impl Default for RevealAnimator {
    fn default() -> Self {
        Self {
            phase: RevealPhase::Complete,
            revealed_count: 0,
            total: 0,
            elapsed_seconds: 0.0,
            interval_seconds: 0.0,
            generation: 0,
        }
    }
}

impl RevealAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new run for `total` points and invalidates every earlier tick.
    ///
    /// With animation on (and something to reveal) the animator enters
    /// `Idle` and returns the timer the host must start. Otherwise every
    /// point is revealed at once and no timer is needed.
    pub fn reset(
        &mut self,
        total: usize,
        animate: bool,
        interval_seconds: f64,
    ) -> Option<RevealSchedule> {
        self.generation = self.generation.wrapping_add(1);
        self.total = total;
        self.elapsed_seconds = 0.0;
        self.interval_seconds = interval_seconds;

        let interval = Duration::try_from_secs_f64(interval_seconds)
            .ok()
            .filter(|interval| !interval.is_zero());
        match interval {
            Some(interval) if animate && total > 0 => {
                self.phase = RevealPhase::Idle;
                self.revealed_count = 0;
                Some(RevealSchedule {
                    generation: self.generation,
                    interval,
                })
            }
            _ => {
                self.phase = RevealPhase::Complete;
                self.revealed_count = total;
                None
            }
        }
    }

    /// Applies one timer tick tagged with the generation it was scheduled for.
    pub fn tick(&mut self, generation: u64) -> RevealTick {
        if generation != self.generation {
            return RevealTick::Stale {
                current: self.generation,
                received: generation,
            };
        }
        if self.phase == RevealPhase::Complete {
            return RevealTick::AlreadyComplete;
        }

        self.revealed_count = (self.revealed_count + 1).min(self.total);
        self.elapsed_seconds += self.interval_seconds;
        trace!(
            generation,
            revealed = self.revealed_count,
            total = self.total,
            "reveal tick"
        );

        if self.revealed_count == self.total {
            self.phase = RevealPhase::Complete;
            RevealTick::Completed {
                revealed_count: self.revealed_count,
            }
        } else {
            self.phase = RevealPhase::Running;
            RevealTick::Advanced {
                revealed_count: self.revealed_count,
            }
        }
    }

    /// Reveals everything immediately and invalidates pending ticks.
    ///
    /// Returns `true` when a run was still in progress.
    pub fn finish(&mut self) -> bool {
        let was_pending = self.phase != RevealPhase::Complete;
        if was_pending {
            self.generation = self.generation.wrapping_add(1);
        }
        self.phase = RevealPhase::Complete;
        self.revealed_count = self.total;
        was_pending
    }

    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        index < self.revealed_count
    }

    #[must_use]
    pub fn state(&self) -> AnimationState {
        AnimationState {
            revealed_count: self.revealed_count,
            elapsed_seconds: self.elapsed_seconds,
            running: self.phase != RevealPhase::Complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_ticks_complete_the_run() {
        let mut animator = RevealAnimator::new();
        let schedule = animator.reset(3, true, 0.25).expect("timer requested");
        assert_eq!(animator.phase(), RevealPhase::Idle);
        assert_eq!(schedule.interval, Duration::from_millis(250));

        assert_eq!(
            animator.tick(schedule.generation),
            RevealTick::Advanced { revealed_count: 1 }
        );
        assert_eq!(animator.phase(), RevealPhase::Running);
        animator.tick(schedule.generation);
        assert_eq!(
            animator.tick(schedule.generation),
            RevealTick::Completed { revealed_count: 3 }
        );
        assert_eq!(animator.phase(), RevealPhase::Complete);
        assert_eq!(animator.tick(schedule.generation), RevealTick::AlreadyComplete);
        assert!((animator.state().elapsed_seconds - 0.75).abs() < 1e-12);
    }

    #[test]
    fn disabled_animation_reveals_everything() {
        let mut animator = RevealAnimator::new();
        assert!(animator.reset(4, false, 0.1).is_none());
        assert_eq!(animator.revealed_count(), 4);
        assert_eq!(animator.phase(), RevealPhase::Complete);
        assert!(!animator.state().running);
    }

    #[test]
    fn reset_discards_ticks_from_previous_run() {
        let mut animator = RevealAnimator::new();
        let first = animator.reset(5, true, 0.1).unwrap();
        animator.tick(first.generation);
        animator.tick(first.generation);

        let second = animator.reset(5, true, 0.1).unwrap();
        assert_eq!(animator.revealed_count(), 0);
        assert!(matches!(
            animator.tick(first.generation),
            RevealTick::Stale { .. }
        ));
        assert_eq!(animator.revealed_count(), 0);
        assert!(animator.tick(second.generation).changed());
    }

    #[test]
    fn finish_jumps_to_complete_and_invalidates_timer() {
        let mut animator = RevealAnimator::new();
        let schedule = animator.reset(5, true, 0.1).unwrap();
        animator.tick(schedule.generation);
        assert!(animator.finish());
        assert_eq!(animator.revealed_count(), 5);
        assert!(matches!(
            animator.tick(schedule.generation),
            RevealTick::Stale { .. }
        ));
        assert!(!animator.finish());
    }

    #[test]
    fn empty_run_is_immediately_complete() {
        let mut animator = RevealAnimator::new();
        assert!(animator.reset(0, true, 0.1).is_none());
        assert_eq!(animator.phase(), RevealPhase::Complete);
        assert!(!animator.is_revealed(0));
    }
}

use tracing::debug;

use crate::core::{RevealPhase, RevealTick};

use super::{ChartEngine, ChartHost};

impl<H: ChartHost> ChartEngine<H> {
    /// Delivers one host timer tick.
    ///
    /// Ticks from an earlier run are ignored. The timer is stopped once the
    /// last point is revealed.
    pub fn on_reveal_tick(&mut self, generation: u64) -> RevealTick {
        let tick = self.animator.tick(generation);
        match tick {
            RevealTick::Advanced { .. } => self.request_redraw(),
            RevealTick::Completed { revealed_count } => {
                debug!(revealed_count, "reveal complete");
                self.host.stop_repeating_timer();
                self.request_redraw();
            }
            RevealTick::Stale { current, received } => {
                debug!(current, received, "discarding stale reveal tick");
            }
            RevealTick::AlreadyComplete => {}
        }
        tick
    }

    /// Turning animation off mid-run reveals everything at once. Turning it
    /// on applies from the next dataset or [`Self::restart_reveal`].
    pub fn set_animation_enabled(&mut self, enabled: bool) {
        self.config.animate_reveal = enabled;
        if !enabled && self.animator.finish() {
            self.host.stop_repeating_timer();
            self.request_redraw();
        }
    }

    /// Replays the reveal on the current dataset.
    pub fn restart_reveal(&mut self) {
        self.stop_pending_reveal();
        self.touch = None;
        self.start_reveal();
        self.request_redraw();
    }

    pub(super) fn start_reveal(&mut self) {
        let schedule = self.animator.reset(
            self.points.len(),
            self.config.animate_reveal,
            self.config.reveal_interval_seconds,
        );
        if let Some(schedule) = schedule {
            debug!(
                generation = schedule.generation,
                interval = ?schedule.interval,
                total = self.points.len(),
                "starting reveal"
            );
            self.host
                .start_repeating_timer(schedule.interval, schedule.generation);
        }
    }

    pub(super) fn stop_pending_reveal(&mut self) {
        if self.animator.phase() != RevealPhase::Complete {
            self.host.stop_repeating_timer();
        }
    }
}

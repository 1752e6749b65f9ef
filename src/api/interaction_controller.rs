use tracing::{trace, warn};

use crate::core::ScreenPoint;
use crate::interaction::{HitTestContext, TouchState};

use super::{ChartEngine, ChartHost};

impl<H: ChartHost> ChartEngine<H> {
    /// Starts a gesture and returns the index under the pointer.
    pub fn on_pointer_down(&mut self, point: ScreenPoint) -> Option<usize> {
        warn_non_finite(point);
        let transform = self.transform();
        let state = self.hit_tester.pointer_down(
            HitTestContext {
                transform: &transform,
                points: &self.points,
                visible_count: self.animator.revealed_count(),
                chart_type: self.config.chart_type,
            },
            point,
        );
        self.update_touch(Some(state))
    }

    /// Re-resolves during a drag. Without an active gesture this is a no-op.
    pub fn on_pointer_move(&mut self, point: ScreenPoint) -> Option<usize> {
        warn_non_finite(point);
        self.touch?;
        let transform = self.transform();
        let state = self.hit_tester.pointer_move(
            HitTestContext {
                transform: &transform,
                points: &self.points,
                visible_count: self.animator.revealed_count(),
                chart_type: self.config.chart_type,
            },
            self.touch,
            point,
        );
        self.update_touch(state)
    }

    /// Ends the gesture. Returns the index still highlighted, which is always
    /// `None` unless the release behavior persists the highlight.
    pub fn on_pointer_up(&mut self, point: ScreenPoint) -> Option<usize> {
        let state = self.hit_tester.pointer_up(self.touch, point);
        self.update_touch(state)
    }

    fn update_touch(&mut self, state: Option<TouchState>) -> Option<usize> {
        let previous = self.touch.and_then(|touch| touch.active_point_index);
        self.touch = state;
        let active = state.and_then(|touch| touch.active_point_index);
        trace!(?previous, ?active, "touch updated");
        if active != previous {
            self.request_redraw();
        }
        active
    }
}

fn warn_non_finite(point: ScreenPoint) {
    if !point.is_finite() {
        warn!(?point, "ignoring non-finite pointer position");
    }
}

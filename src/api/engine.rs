use std::cell::RefCell;

use tracing::debug;

use crate::core::{
    AnimationState, AxisRange, CoordinateTransform, DataPoint, Geometry, RevealAnimator,
    RevealPhase, Viewport, compute_range_tuned,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HitTester, TouchState};
use crate::render::Color;

use super::chart_config::validate_color;
use super::label_cache::{LabelCacheStats, YLabelCache};
use super::{ChartConfiguration, ChartHost, LabelFormatter, LineStyle};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the dataset, its configuration and every piece of
/// derived state, and talks to the view only through the [`ChartHost`]
/// collaborator.
pub struct ChartEngine<H: ChartHost> {
    pub(super) host: H,
    pub(super) viewport: Viewport,
    pub(super) config: ChartConfiguration,
    pub(super) points: Vec<DataPoint>,
    pub(super) range: AxisRange,
    pub(super) geometry: Geometry,
    pub(super) formatter: LabelFormatter,
    pub(super) animator: RevealAnimator,
    pub(super) hit_tester: HitTester,
    pub(super) touch: Option<TouchState>,
    pub(super) redraw_pending: bool,
    pub(super) label_cache: RefCell<YLabelCache>,
}

impl<H: ChartHost> ChartEngine<H> {
    /// Creates an engine with no data and the default configuration.
    pub fn new(host: H, viewport: Viewport) -> ChartResult<Self> {
        validate_viewport(viewport)?;
        let config = ChartConfiguration::default();
        let geometry = Geometry::resolve(viewport, config.margins, 0);
        Ok(Self {
            host,
            viewport,
            formatter: LabelFormatter::from_config(&config),
            hit_tester: HitTester::new(config.hit_tolerance, config.release_behavior),
            config,
            points: Vec::new(),
            range: AxisRange::default(),
            geometry,
            animator: RevealAnimator::new(),
            touch: None,
            redraw_pending: false,
            label_cache: RefCell::new(YLabelCache::default()),
        })
    }

    /// Replaces dataset and configuration together.
    ///
    /// On error nothing changes. An empty dataset is not an error: the host
    /// is asked to show the configured empty-state message instead.
    pub fn set_data(
        &mut self,
        points: Vec<DataPoint>,
        config: ChartConfiguration,
    ) -> ChartResult<()> {
        config.validate()?;

        let divider = config.value_divider;
        let points: Vec<DataPoint> = if divider == 1.0 {
            points
        } else {
            points
                .into_iter()
                .map(|point| DataPoint {
                    y: point.y / divider,
                    ..point
                })
                .collect()
        };

        self.stop_pending_reveal();
        self.range = compute_range_tuned(&points, config.x_axis_mode, config.scale_tuning);
        self.formatter = LabelFormatter::from_config(&config);
        self.hit_tester = HitTester::new(config.hit_tolerance, config.release_behavior);
        self.label_cache.borrow_mut().clear();
        self.points = points;
        self.config = config;
        self.refresh_geometry();
        self.touch = None;
        debug!(
            count = self.points.len(),
            chart_type = %self.config.chart_type,
            x_axis_mode = %self.config.x_axis_mode,
            range = ?self.range,
            "dataset replaced"
        );

        self.start_reveal();
        self.host.hide();
        if self.points.is_empty() {
            self.host.show_message(&self.config.empty_message);
        }
        self.request_redraw();
        Ok(())
    }

    /// Resizes the view. Animation progress and touch state are kept.
    pub fn layout(&mut self, width: u32, height: u32) -> ChartResult<()> {
        let viewport = Viewport::new(width, height);
        validate_viewport(viewport)?;
        if viewport == self.viewport {
            return Ok(());
        }
        self.viewport = viewport;
        self.refresh_geometry();
        debug!(width, height, geometry = ?self.geometry, "layout updated");
        self.request_redraw();
        Ok(())
    }

    pub fn set_colors(&mut self, base: Color, lower_gradient: Color) -> ChartResult<()> {
        validate_color("base_color", base)?;
        validate_color("lower_gradient_color", lower_gradient)?;
        self.config.base_color = base;
        self.config.lower_gradient_color = lower_gradient;
        self.request_redraw();
        Ok(())
    }

    /// Toggles gridlines and their labels; the left margin follows.
    pub fn set_grid_lines(&mut self, on: bool) {
        if self.config.grid_lines_on == on {
            return;
        }
        self.config.grid_lines_on = on;
        self.refresh_geometry();
        self.request_redraw();
    }

    pub fn set_line_style(&mut self, style: LineStyle) {
        self.config.line_style = style;
        self.request_redraw();
    }

    pub fn set_gradient_fill(&mut self, on: bool) {
        self.config.gradient_fill = on;
        self.request_redraw();
    }

    pub fn show_loading(&mut self) {
        self.host.show();
    }

    pub fn hide_loading(&mut self) {
        self.host.hide();
    }

    pub fn show_message(&mut self, text: &str) {
        self.host.show_message(text);
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfiguration {
        &self.config
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn axis_range(&self) -> AxisRange {
        self.range
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.animator.revealed_count()
    }

    #[must_use]
    pub fn animation_state(&self) -> AnimationState {
        self.animator.state()
    }

    #[must_use]
    pub fn reveal_phase(&self) -> RevealPhase {
        self.animator.phase()
    }

    /// Generation the host's reveal ticks must carry.
    #[must_use]
    pub fn reveal_generation(&self) -> u64 {
        self.animator.generation()
    }

    #[must_use]
    pub fn touch_state(&self) -> Option<TouchState> {
        self.touch
    }

    /// `"(x, y)"` label of the highlighted point, if any.
    #[must_use]
    pub fn active_label(&self) -> Option<String> {
        let index = self.touch?.active_point_index?;
        let label = self.formatter.format_pair(&self.points, index);
        (!label.is_empty()).then_some(label)
    }

    #[must_use]
    pub fn formatter(&self) -> &LabelFormatter {
        &self.formatter
    }

    #[must_use]
    pub fn label_cache_stats(&self) -> LabelCacheStats {
        self.label_cache.borrow().stats()
    }

    #[must_use]
    pub fn has_pending_redraw(&self) -> bool {
        self.redraw_pending
    }

    /// Mapping used by both drawing and hit-testing for the current state.
    #[must_use]
    pub fn transform(&self) -> CoordinateTransform {
        CoordinateTransform::for_chart(
            self.geometry,
            self.range,
            self.config.x_axis_mode,
            &self.points,
            self.config.chart_type,
            self.config.margins,
        )
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    /// Forwards at most one redraw request between two draw passes.
    pub(super) fn request_redraw(&mut self) {
        if !self.redraw_pending {
            self.redraw_pending = true;
            self.host.request_redraw();
        }
    }

    /// Formatted y label, cached until the next dataset.
    pub(super) fn y_label(&self, value: f64) -> String {
        self.label_cache
            .borrow_mut()
            .get_or_insert_with(value, |value| self.formatter.format_y(value))
    }

    fn refresh_geometry(&mut self) {
        let widest = if self.config.grid_lines_on && !self.points.is_empty() {
            self.range
                .horizontal_gridlines()
                .iter()
                .map(|value| self.y_label(*value).chars().count())
                .max()
                .unwrap_or(0)
        } else {
            0
        };
        self.geometry = Geometry::resolve(self.viewport, self.config.margins, widest);
    }
}

fn validate_viewport(viewport: Viewport) -> ChartResult<()> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

//! Public engine facade: configuration, label formatting, host collaborators
//! and the [`ChartEngine`] orchestrator.

mod chart_config;
mod engine;
mod host;
mod interaction_controller;
mod label_cache;
mod label_format;
mod render_frame_builder;
mod reveal_controller;
mod series_renderer;

pub use crate::core::{ChartType, XAxisMode};
pub use chart_config::{ChartConfiguration, LineStyle};
pub use engine::ChartEngine;
pub use host::{ChartHost, HostEvent, HostScheduler, LoadingIndicator, RecordingHost};
pub use label_cache::LabelCacheStats;
pub use label_format::{LabelFormatter, format_number, format_y, validate_date_format};

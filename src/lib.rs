//! plotchart: a self-contained bar/line/scatter charting engine.
//!
//! The engine computes axis ranges, maps data to screen space, emits draw
//! commands onto an abstract [`render::DrawingSurface`], animates a
//! point-by-point reveal and resolves pointer input to data indices. Hosts
//! supply timers, redraw scheduling and a loading indicator through
//! [`api::ChartHost`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartConfiguration, ChartEngine};
pub use error::{ChartError, ChartResult};

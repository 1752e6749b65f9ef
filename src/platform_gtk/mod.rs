//! GTK4 host for [`ChartEngine`]: a `DrawingArea` painted through Cairo,
//! drag gestures for point labeling, a glib timer for the reveal animation
//! and a spinner/label overlay as loading indicator.

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use tracing::{trace, warn};

use crate::api::{ChartConfiguration, ChartEngine, HostScheduler, LoadingIndicator};
use crate::core::{DataPoint, ScreenPoint, Viewport};
use crate::error::ChartResult;
use crate::render::CairoSurface;

pub type UiEngine = Rc<RefCell<ChartEngine<GtkHost>>>;

type EngineSlot = Rc<OnceCell<Weak<RefCell<ChartEngine<GtkHost>>>>>;

/// [`crate::api::ChartHost`] backed by GTK widgets and the glib main loop.
pub struct GtkHost {
    area: glib::WeakRef<gtk::DrawingArea>,
    spinner: gtk::Spinner,
    message: gtk::Label,
    timer: Option<glib::SourceId>,
    engine: EngineSlot,
}

impl HostScheduler for GtkHost {
    fn start_repeating_timer(&mut self, interval: Duration, generation: u64) {
        self.stop_repeating_timer();
        let engine = self.engine.get().cloned();
        self.timer = Some(glib::timeout_add_local(interval, move || {
            let Some(engine) = engine.as_ref().and_then(Weak::upgrade) else {
                return glib::ControlFlow::Break;
            };
            if let Ok(mut chart) = engine.try_borrow_mut() {
                let tick = chart.on_reveal_tick(generation);
                trace!(?tick, "gtk reveal tick");
            }
            glib::ControlFlow::Continue
        }));
    }

    fn stop_repeating_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.remove();
        }
    }

    fn request_redraw(&mut self) {
        if let Some(area) = self.area.upgrade() {
            area.queue_draw();
        }
    }
}

impl LoadingIndicator for GtkHost {
    fn show(&mut self) {
        self.message.set_visible(false);
        self.spinner.set_visible(true);
        self.spinner.start();
    }

    fn hide(&mut self) {
        self.spinner.stop();
        self.spinner.set_visible(false);
        self.message.set_visible(false);
    }

    fn show_message(&mut self, text: &str) {
        self.message.set_text(text);
        self.message.set_visible(true);
    }
}

/// Widget tree plus the engine it drives.
pub struct GtkChartAdapter {
    root: gtk::Overlay,
    area: gtk::DrawingArea,
    engine: UiEngine,
}

impl GtkChartAdapter {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        let area = gtk::DrawingArea::new();
        area.set_content_width(i32::try_from(width).unwrap_or(i32::MAX));
        area.set_content_height(i32::try_from(height).unwrap_or(i32::MAX));
        area.set_hexpand(true);
        area.set_vexpand(true);

        let spinner = gtk::Spinner::new();
        let message = gtk::Label::new(None);
        for widget in [spinner.upcast_ref::<gtk::Widget>(), message.upcast_ref()] {
            widget.set_halign(gtk::Align::Center);
            widget.set_valign(gtk::Align::Center);
            widget.set_visible(false);
        }

        let root = gtk::Overlay::new();
        root.set_child(Some(&area));
        root.add_overlay(&spinner);
        root.add_overlay(&message);

        let slot: EngineSlot = Rc::new(OnceCell::new());
        let host = GtkHost {
            area: area.downgrade(),
            spinner,
            message,
            timer: None,
            engine: Rc::clone(&slot),
        };
        let engine = Rc::new(RefCell::new(ChartEngine::new(
            host,
            Viewport::new(width, height),
        )?));
        let _ = slot.set(Rc::downgrade(&engine));

        attach_draw(&area, Rc::clone(&engine));
        attach_drag(&area, Rc::clone(&engine));
        Ok(Self { root, area, engine })
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::Overlay {
        &self.root
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.area
    }

    #[must_use]
    pub fn engine(&self) -> UiEngine {
        Rc::clone(&self.engine)
    }

    pub fn set_data(&self, points: Vec<DataPoint>, config: ChartConfiguration) -> ChartResult<()> {
        self.engine.borrow_mut().set_data(points, config)
    }
}

fn attach_draw(area: &gtk::DrawingArea, engine: UiEngine) {
    area.set_draw_func(move |_, context, width, height| {
        let Ok(mut chart) = engine.try_borrow_mut() else {
            return;
        };
        if let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) {
            if let Err(err) = chart.layout(width, height) {
                warn!(%err, "skipping layout for draw pass");
            }
        }
        let mut surface = CairoSurface::new(context);
        let stats = chart.draw(&mut surface);
        trace!(drawn = stats.drawn, skipped = stats.skipped, "gtk draw pass");
    });
}

fn attach_drag(area: &gtk::DrawingArea, engine: UiEngine) {
    let drag = gtk::GestureDrag::new();

    {
        let engine = Rc::clone(&engine);
        drag.connect_drag_begin(move |_, x, y| {
            if let Ok(mut chart) = engine.try_borrow_mut() {
                chart.on_pointer_down(ScreenPoint::new(x, y));
            }
        });
    }

    {
        let engine = Rc::clone(&engine);
        drag.connect_drag_update(move |gesture, dx, dy| {
            let Some((x, y)) = gesture.start_point() else {
                return;
            };
            if let Ok(mut chart) = engine.try_borrow_mut() {
                chart.on_pointer_move(ScreenPoint::new(x + dx, y + dy));
            }
        });
    }

    drag.connect_drag_end(move |gesture, dx, dy| {
        let Some((x, y)) = gesture.start_point() else {
            return;
        };
        if let Ok(mut chart) = engine.try_borrow_mut() {
            chart.on_pointer_up(ScreenPoint::new(x + dx, y + dy));
        }
    });

    area.add_controller(drag);
}

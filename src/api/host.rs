use std::time::Duration;

/// Timer and redraw primitives the host event loop provides.
///
/// Every tick the host delivers must carry the `generation` it was started
/// with; the engine ignores ticks from earlier runs.
pub trait HostScheduler {
    fn start_repeating_timer(&mut self, interval: Duration, generation: u64);
    fn stop_repeating_timer(&mut self);
    fn request_redraw(&mut self);
}

/// Platform loading spinner with a message slot.
pub trait LoadingIndicator {
    fn show(&mut self);
    fn hide(&mut self);
    fn show_message(&mut self, text: &str);
}

/// Everything the engine needs from the view hosting it.
pub trait ChartHost: HostScheduler + LoadingIndicator {}

impl<T: HostScheduler + LoadingIndicator> ChartHost for T {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    TimerStarted { interval: Duration, generation: u64 },
    TimerStopped,
    RedrawRequested,
    LoadingShown,
    LoadingHidden,
    MessageShown(String),
}

/// Host that records every call, for tests and headless use.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: Vec<HostEvent>,
    timer: Option<(Duration, u64)>,
}

impl RecordingHost {
    #[must_use]
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Interval and generation of the running timer, if any.
    #[must_use]
    pub fn active_timer(&self) -> Option<(Duration, u64)> {
        self.timer
    }

    #[must_use]
    pub fn redraw_requests(&self) -> usize {
        self.count(|event| matches!(event, HostEvent::RedrawRequested))
    }

    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::MessageShown(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn count(&self, predicate: impl Fn(&HostEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl HostScheduler for RecordingHost {
    fn start_repeating_timer(&mut self, interval: Duration, generation: u64) {
        self.timer = Some((interval, generation));
        self.events.push(HostEvent::TimerStarted {
            interval,
            generation,
        });
    }

    fn stop_repeating_timer(&mut self) {
        self.timer = None;
        self.events.push(HostEvent::TimerStopped);
    }

    fn request_redraw(&mut self) {
        self.events.push(HostEvent::RedrawRequested);
    }
}

impl LoadingIndicator for RecordingHost {
    fn show(&mut self) {
        self.events.push(HostEvent::LoadingShown);
    }

    fn hide(&mut self) {
        self.events.push(HostEvent::LoadingHidden);
    }

    fn show_message(&mut self, text: &str) {
        self.events.push(HostEvent::MessageShown(text.to_owned()));
    }
}

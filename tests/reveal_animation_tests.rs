use plotchart::api::{ChartConfiguration, ChartEngine, HostEvent, RecordingHost};
use plotchart::core::{DataPoint, RevealPhase, RevealTick, ScreenPoint, Viewport};
use plotchart::render::{CanvasLayerKind, RecordingSurface};

fn animated_engine(count: usize) -> ChartEngine<RecordingHost> {
    let mut chart =
        ChartEngine::new(RecordingHost::default(), Viewport::new(400, 300)).expect("engine init");
    let points = (0..count).map(|i| DataPoint::indexed(i as f64 * 2.0)).collect();
    chart
        .set_data(
            points,
            ChartConfiguration::default().with_reveal_animation(true, 0.05),
        )
        .expect("set data");
    chart
}

#[test]
fn count_ticks_complete_the_reveal_and_stop_the_timer() {
    let mut chart = animated_engine(4);
    let (interval, generation) = chart.host().active_timer().expect("timer started");
    assert!((interval.as_secs_f64() - 0.05).abs() < 1e-9);
    assert_eq!(chart.reveal_phase(), RevealPhase::Idle);
    assert_eq!(chart.revealed_count(), 0);

    for expected in 1..4 {
        assert_eq!(
            chart.on_reveal_tick(generation),
            RevealTick::Advanced {
                revealed_count: expected
            }
        );
        assert_eq!(chart.reveal_phase(), RevealPhase::Running);
    }
    assert_eq!(
        chart.on_reveal_tick(generation),
        RevealTick::Completed { revealed_count: 4 }
    );
    assert_eq!(chart.reveal_phase(), RevealPhase::Complete);
    assert_eq!(chart.revealed_count(), 4);
    assert!(chart.host().active_timer().is_none());
    assert_eq!(chart.on_reveal_tick(generation), RevealTick::AlreadyComplete);

    let state = chart.animation_state();
    assert!(!state.running);
    assert!((state.elapsed_seconds - 0.2).abs() < 1e-9);
}

#[test]
fn line_grows_with_revealed_prefix() {
    let mut chart = animated_engine(5);
    let generation = chart.reveal_generation();
    let surface = RecordingSurface::default();

    let mut segments = Vec::new();
    for _ in 0..5 {
        chart.on_reveal_tick(generation);
        let frame = chart.build_render_frame(&surface);
        segments.push(frame.layer(CanvasLayerKind::Series).len());
    }
    // One point is a dot, then one segment per revealed neighbour pair.
    assert_eq!(segments, [1, 1, 2, 3, 4]);
}

#[test]
fn new_data_mid_animation_restarts_and_discards_old_ticks() {
    let mut chart = animated_engine(6);
    let old_generation = chart.reveal_generation();
    chart.on_reveal_tick(old_generation);
    chart.on_reveal_tick(old_generation);
    assert_eq!(chart.revealed_count(), 2);

    chart
        .set_data(
            vec![DataPoint::indexed(1.0), DataPoint::indexed(2.0)],
            ChartConfiguration::default().with_reveal_animation(true, 0.05),
        )
        .expect("set data");
    assert_eq!(chart.revealed_count(), 0);
    assert!(matches!(
        chart.on_reveal_tick(old_generation),
        RevealTick::Stale { .. }
    ));
    assert_eq!(chart.revealed_count(), 0);

    let stops = chart
        .host()
        .count(|event| matches!(event, HostEvent::TimerStopped));
    assert_eq!(stops, 1);
}

#[test]
fn reset_without_animation_reveals_everything() {
    let mut chart = animated_engine(6);
    chart
        .set_data(
            (0..3).map(|i| DataPoint::indexed(f64::from(i))).collect(),
            ChartConfiguration::default(),
        )
        .expect("set data");
    assert_eq!(chart.revealed_count(), 3);
    assert_eq!(chart.reveal_phase(), RevealPhase::Complete);
    assert!(chart.host().active_timer().is_none());
}

#[test]
fn disabling_animation_mid_run_jumps_to_complete() {
    let mut chart = animated_engine(5);
    let generation = chart.reveal_generation();
    chart.on_reveal_tick(generation);

    chart.set_animation_enabled(false);
    assert_eq!(chart.revealed_count(), 5);
    assert_eq!(chart.reveal_phase(), RevealPhase::Complete);
    assert!(chart.host().active_timer().is_none());
    assert!(matches!(
        chart.on_reveal_tick(generation),
        RevealTick::Stale { .. }
    ));
}

#[test]
fn restart_replays_the_reveal() {
    let mut chart = animated_engine(3);
    let first = chart.reveal_generation();
    for _ in 0..3 {
        chart.on_reveal_tick(first);
    }
    assert_eq!(chart.reveal_phase(), RevealPhase::Complete);

    chart.restart_reveal();
    assert_eq!(chart.revealed_count(), 0);
    let (_, generation) = chart.host().active_timer().expect("timer restarted");
    assert_ne!(generation, first);
}

#[test]
fn unrevealed_points_cannot_be_selected() {
    let mut chart = animated_engine(4);
    let generation = chart.reveal_generation();
    chart.on_reveal_tick(generation);

    let x = chart.transform().to_screen_x_index(3);
    assert_eq!(chart.on_pointer_down(ScreenPoint::new(x, 100.0)), None);
    let x = chart.transform().to_screen_x_index(0);
    assert_eq!(chart.on_pointer_move(ScreenPoint::new(x, 100.0)), Some(0));
}

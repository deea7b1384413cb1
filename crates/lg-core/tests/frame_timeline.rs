//! Integration tests: frame clock → render state → pulse layout.
//!
//! Drives the pure `lg-core` pipeline with synthetic host timestamps.

use lg_core::{
    FrameClock, FrameDecision, GridConfig, InputSampler, RenderState, SurfaceLayout, Viewport,
    pulse_layout,
};

fn state_for(width: f64, height: f64) -> RenderState {
    RenderState::new(SurfaceLayout::new(Viewport::new(width, height), Some(1.0), true))
}

/// Run `timestamps` through a clock, advancing `state` on accepted frames.
fn drive(clock: &mut FrameClock, state: &mut RenderState, timestamps: &[f64]) -> usize {
    let mut accepted = 0;
    for &ts in timestamps {
        if clock.tick(ts) == FrameDecision::Accept {
            let before = state.time;
            state.advance();
            assert_eq!(state.time, before + 1);
            accepted += 1;
        }
    }
    accepted
}

#[test]
fn logical_time_counts_accepted_frames_only() {
    let config = GridConfig::default();
    let mut clock = FrameClock::from_config(&config);
    let mut state = state_for(1000.0, 800.0);

    let accepted = drive(&mut clock, &mut state, &[0.0, 5.0, 20.0, 21.0, 40.0, 5000.0]);
    assert_eq!(accepted, 3);
    assert_eq!(state.time, 3);
}

#[test]
fn stalled_host_advances_time_by_one() {
    let config = GridConfig::default();
    let mut clock = FrameClock::from_config(&config);
    let mut state = state_for(1000.0, 800.0);

    drive(&mut clock, &mut state, &[0.0, 60_000.0]);
    assert_eq!(state.time, 1);
}

#[test]
fn input_samples_do_not_change_geometry() {
    let config = GridConfig::default();
    let mut state = state_for(1000.0, 800.0);
    state.time = 42;
    let before = pulse_layout(&config, state.time, state.viewport());

    let sampler = InputSampler::new();
    sampler.on_scroll(&mut state, 900.0);
    sampler.on_mouse_move(&mut state, 10.0, 790.0);

    let after = pulse_layout(&config, state.time, state.viewport());
    assert_eq!(before, after);
}

#[test]
fn stopped_clock_freezes_time() {
    let config = GridConfig::default();
    let mut clock = FrameClock::from_config(&config);
    let mut state = state_for(640.0, 480.0);

    drive(&mut clock, &mut state, &[0.0, 20.0]);
    clock.stop();
    drive(&mut clock, &mut state, &[40.0, 60.0, 80.0]);
    assert_eq!(state.time, 1);
}

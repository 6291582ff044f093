#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinnerMode {
    Spinning,
    Idle,
}

const SPINNER_FRAMES: [&str; 6] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴"];
const SPINNER_CYCLES_PER_SECOND: f64 = 1.25;
const SPINNER_MAX_FRAME_DELTA: f64 = 0.25;

/// Advances the spinner phase (in cycles, kept in `[0, 1)`) by the time since
/// the previous tick. Returns the new phase and the tick to remember.
pub fn advance_spinner(
    phase: f64,
    last_tick: Option<f64>,
    now_seconds: f64,
    mode: SpinnerMode,
) -> (f64, Option<f64>) {
    let delta = last_tick.map_or(0.0, |last| {
        (now_seconds - last).clamp(0.0, SPINNER_MAX_FRAME_DELTA)
    });

    let next_phase = match mode {
        SpinnerMode::Spinning => (phase + delta * SPINNER_CYCLES_PER_SECOND).rem_euclid(1.0),
        SpinnerMode::Idle => phase.rem_euclid(1.0),
    };

    (next_phase, Some(now_seconds))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn spinner_symbol(phase: f64) -> &'static str {
    let index = (phase.rem_euclid(1.0) * SPINNER_FRAMES.len() as f64) as usize;
    SPINNER_FRAMES[index.min(SPINNER_FRAMES.len() - 1)]
}

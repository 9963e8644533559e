//! Operator control state shared between the run loop and the process.
//!
//! The run loop reads these flags between ticks; the engine's Ctrl-C
//! handler sets them from another task. Atomic fields keep the hot path
//! lock-free.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::SimulationBoundsConfig;
use crate::simulation::Termination;

/// Reason why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimulationEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// Reached the configured `max_real_time_seconds` limit.
    MaxRealTimeReached,
    /// An operator asked the run to stop.
    OperatorStop,
    /// All agents are dead.
    Extinction,
    /// The population outgrew the map.
    Overpopulation,
}

impl From<Termination> for SimulationEndReason {
    fn from(termination: Termination) -> Self {
        match termination {
            Termination::Extinction => Self::Extinction,
            Termination::Overpopulation => Self::Overpopulation,
        }
    }
}

impl SimulationEndReason {
    /// Closing line shown to the user.
    pub const fn message(self) -> &'static str {
        match self {
            Self::MaxTicksReached => "Tick limit reached.",
            Self::MaxRealTimeReached => "Time limit reached.",
            Self::OperatorStop => "Simulation stopped by user.",
            Self::Extinction => "All agents have died.",
            Self::Overpopulation => "Overpopulation!",
        }
    }
}

/// Shared operator control state.
///
/// Wrapped in an `Arc` and shared between the run loop and signal
/// handlers.
#[derive(Debug)]
pub struct OperatorState {
    /// Set once a stop has been requested.
    stop_requested: AtomicBool,

    /// Milliseconds to sleep between ticks.
    tick_interval_ms: AtomicU64,

    /// Wall-clock start of the run.
    started_at: DateTime<Utc>,

    /// Tick limit (0 = unlimited).
    max_ticks: u64,

    /// Wall-clock limit in seconds (0 = unlimited).
    max_real_time_seconds: u64,

    /// Why the run ended, once it has.
    end_reason: Mutex<Option<SimulationEndReason>>,
}

impl OperatorState {
    /// Create operator state from the configured bounds.
    pub fn new(bounds: &SimulationBoundsConfig) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            tick_interval_ms: AtomicU64::new(bounds.tick_interval_ms),
            started_at: Utc::now(),
            max_ticks: bounds.max_ticks,
            max_real_time_seconds: bounds.max_real_time_seconds,
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Ask the run loop to stop after the current tick.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Record why the run ended.
    pub async fn set_end_reason(&self, reason: SimulationEndReason) {
        let mut guard = self.end_reason.lock().await;
        *guard = Some(reason);
    }

    /// Why the run ended, if it has.
    pub async fn end_reason(&self) -> Option<SimulationEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Pacing and limits
    // -----------------------------------------------------------------------

    /// Milliseconds between ticks.
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.load(Ordering::Acquire)
    }

    /// Tick limit (0 = unlimited).
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// Wall-clock limit in seconds (0 = unlimited).
    pub const fn max_real_time_seconds(&self) -> u64 {
        self.max_real_time_seconds
    }

    /// Whether `current_tick` has reached the tick limit.
    pub const fn tick_limit_reached(&self, current_tick: u64) -> bool {
        self.max_ticks > 0 && current_tick >= self.max_ticks
    }

    /// Whether the wall-clock limit has passed.
    pub fn time_limit_reached(&self) -> bool {
        self.max_real_time_seconds > 0 && self.elapsed_seconds() >= self.max_real_time_seconds
    }

    /// Whole seconds since the run started.
    pub fn elapsed_seconds(&self) -> u64 {
        let secs = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        u64::try_from(secs.max(0)).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bounds(max_ticks: u64, max_real_time_seconds: u64) -> SimulationBoundsConfig {
        SimulationBoundsConfig {
            max_ticks,
            max_real_time_seconds,
            ..SimulationBoundsConfig::default()
        }
    }

    #[test]
    fn initial_state() {
        let state = OperatorState::new(&bounds(0, 0));
        assert!(!state.is_stop_requested());
        assert_eq!(state.tick_interval_ms(), 150);
    }

    #[test]
    fn stop_request() {
        let state = OperatorState::new(&bounds(0, 0));
        state.request_stop();
        assert!(state.is_stop_requested());
    }

    #[test]
    fn tick_limit_zero_means_unlimited() {
        let state = OperatorState::new(&bounds(0, 0));
        assert!(!state.tick_limit_reached(999_999));
    }

    #[test]
    fn tick_limit_reached() {
        let state = OperatorState::new(&bounds(100, 0));
        assert!(!state.tick_limit_reached(99));
        assert!(state.tick_limit_reached(100));
        assert!(state.tick_limit_reached(101));
    }

    #[test]
    fn time_limit_zero_means_unlimited() {
        let state = OperatorState::new(&bounds(0, 0));
        assert!(!state.time_limit_reached());
    }

    #[test]
    fn termination_maps_to_end_reason() {
        assert_eq!(
            SimulationEndReason::from(Termination::Extinction),
            SimulationEndReason::Extinction
        );
        assert_eq!(
            SimulationEndReason::from(Termination::Overpopulation),
            SimulationEndReason::Overpopulation
        );
    }

    #[tokio::test]
    async fn end_reason_round_trip() {
        let state = OperatorState::new(&bounds(0, 0));
        assert_eq!(state.end_reason().await, None);
        state
            .set_end_reason(SimulationEndReason::OperatorStop)
            .await;
        assert_eq!(
            state.end_reason().await,
            Some(SimulationEndReason::OperatorStop)
        );
    }
}

//! Simulation clock.
//!
//! The tick counter is the only stored temporal state. Generation is
//! derived from it, never tracked separately, so the two cannot drift.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// A generation must span at least one tick.
    #[error("invalid generation length: {ticks}")]
    InvalidGenerationLength {
        /// The rejected length.
        ticks: u64,
    },
}

/// Tick counter plus the generation length it is divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    /// Ticks completed. Starts at 0; the first tick run is tick 1.
    tick: u64,

    /// Ticks per generation (one maximum lifespan).
    generation_length: u64,
}

impl SimClock {
    /// A clock at tick 0.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidGenerationLength`] if `generation_length`
    /// is zero.
    pub const fn new(generation_length: u64) -> Result<Self, ClockError> {
        if generation_length == 0 {
            return Err(ClockError::InvalidGenerationLength {
                ticks: generation_length,
            });
        }
        Ok(Self {
            tick: 0,
            generation_length,
        })
    }

    /// Move to the next tick and return it.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the counter is exhausted.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        Ok(self.tick)
    }

    /// Current tick.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Generations elapsed, `tick / generation_length`.
    pub const fn generation(&self) -> u64 {
        match self.tick.checked_div(self.generation_length) {
            Some(g) => g,
            None => 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = SimClock::new(2000).unwrap();
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.generation(), 0);
    }

    #[test]
    fn advance_increments() {
        let mut clock = SimClock::new(2000).unwrap();
        assert_eq!(clock.advance().unwrap(), 1);
        assert_eq!(clock.advance().unwrap(), 2);
        assert_eq!(clock.tick(), 2);
    }

    #[test]
    fn generation_is_derived() {
        let mut clock = SimClock::new(3).unwrap();
        for _ in 0..7 {
            clock.advance().unwrap();
        }
        assert_eq!(clock.generation(), 2);
    }

    #[test]
    fn zero_generation_length_rejected() {
        assert!(matches!(
            SimClock::new(0),
            Err(ClockError::InvalidGenerationLength { ticks: 0 })
        ));
    }

    #[test]
    fn overflow_is_an_error() {
        let mut clock = SimClock {
            tick: u64::MAX,
            generation_length: 1,
        };
        assert!(matches!(clock.advance(), Err(ClockError::TickOverflow)));
    }
}

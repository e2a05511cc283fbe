//! Construction-time options for `ChainedTable`.

use thiserror::Error;

/// Slot count of a table built with default options.
pub const DEFAULT_INITIAL_SLOTS: usize = 16;

/// Load factor at which a table built with default options grows.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Smallest accepted load factor. Lower thresholds would size the slot
/// array at more than a hundred slots per entry.
pub const MIN_LOAD_FACTOR: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of slots allocated up front. Must be at least 1.
    pub initial_slots: usize,
    /// Growth threshold for `len / slot_count`. Must be finite and at least
    /// [`MIN_LOAD_FACTOR`].
    pub load_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial slot count must be at least 1")]
    ZeroSlots,
    #[error("load factor must be finite and at least 0.01, got {0}")]
    InvalidLoadFactor(f64),
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_slots(mut self, initial_slots: usize) -> Self {
        self.initial_slots = initial_slots;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_slots == 0 {
            return Err(ConfigError::ZeroSlots);
        }
        // Written so that NaN fails the range check.
        if !(self.load_factor.is_finite() && self.load_factor >= MIN_LOAD_FACTOR) {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor));
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_slots: DEFAULT_INITIAL_SLOTS,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

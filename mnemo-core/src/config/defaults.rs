// Single source of truth for all default values.

// --- Retry ---
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 100;
pub const DEFAULT_MAX_DELAY_MS: u64 = 5_000;
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

// --- Reconsolidation ---
pub const DEFAULT_SLOW_EXECUTION_THRESHOLD_MS: u64 = 500;

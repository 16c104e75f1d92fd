//! Standardized emoji logging for the state reconciler
//!
//! Milestones and per-block outcomes use these macros; everything with
//! structured fields goes through the plain `tracing` macros.

/// Standard emoji set for reconciler logging
pub struct LogEmoji;

impl LogEmoji {
    // Status indicators
    pub const SUCCESS: &'static str = "✅"; // Operation succeeded
    pub const ERROR: &'static str = "❌"; // Operation failed
    pub const WARNING: &'static str = "⚠️"; // Warning or caution

    // Module-specific
    pub const START: &'static str = "🚀"; // Service or loop start
    pub const STOP: &'static str = "🛑"; // Shutdown
    pub const BLOCK: &'static str = "🧱"; // Block reconciled
    pub const CHART: &'static str = "📊"; // Data/statistics/metrics
    pub const DROP: &'static str = "🗑️"; // Value dropped on a full channel
    pub const CLOCK: &'static str = "⏱️"; // Timing/latency
}

#[macro_export]
macro_rules! log_success {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::SUCCESS, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        tracing::error!("{} {}", $crate::logging::LogEmoji::ERROR, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_rejected {
    ($($arg:tt)*) => {
        tracing::warn!("{} {}", $crate::logging::LogEmoji::WARNING, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_start {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::START, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_stop {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::STOP, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_block {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::BLOCK, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_metrics {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::CHART, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_dropped {
    ($($arg:tt)*) => {
        tracing::warn!("{} {}", $crate::logging::LogEmoji::DROP, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_slow {
    ($($arg:tt)*) => {
        tracing::warn!("{} {}", $crate::logging::LogEmoji::CLOCK, format!($($arg)*))
    };
}

use log::{debug, error, info};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
///
/// Defaults: `info` overall, `debug` for this crate, `info` for the HTTP
/// access log emitted by tower-http, `warn` for database and transport
/// internals. `RUST_LOG` overrides any of these.
pub fn init_logger() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Info);
        for (module, level) in DEFAULT_FILTERS {
            builder.filter_module(module, *level);
        }
        builder
            .parse_env("RUST_LOG")
            .format_timestamp_millis()
            .format_module_path(false)
            .init();

        info!("Logging system initialized");
    });
}

const DEFAULT_FILTERS: &[(&str, log::LevelFilter)] = &[
    ("tecapp", log::LevelFilter::Debug),
    ("tower_http", log::LevelFilter::Info),
    ("diesel", log::LevelFilter::Warn),
    ("hyper", log::LevelFilter::Warn),
    ("tokio", log::LevelFilter::Warn),
];

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log database operations
    pub fn db_operation(operation: &str, collection: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => debug!(
                "DB: {} on {} completed in {}ms",
                operation, collection, duration
            ),
            None => debug!("DB: Starting {} on {}", operation, collection),
        }
    }

    /// Log reference resolution inside an aggregation
    pub fn dangling_reference(collection: &str, key: &str, referenced_from: &str) {
        debug!(
            "Join: {} '{}' referenced from {} does not exist, skipping",
            collection, key, referenced_from
        );
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish(self) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        debug!("Finished: {} in {}ms", self.operation, duration);
        duration
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(&self.operation, duration, Some(info));
        duration
    }
}

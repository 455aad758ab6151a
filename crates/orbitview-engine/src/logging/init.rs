use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax, e.g.
/// `"orbitview_engine=debug,wgpu=warn"`. When unset, `RUST_LOG` is consulted,
/// then `level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub level: LevelFilter,

    /// Level for the `wgpu*` targets, which are noisy at `info`.
    pub wgpu_level: LevelFilter,

    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            level: LevelFilter::Info,
            wgpu_level: LevelFilter::Warn,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder
            .filter_level(config.level)
            .filter_module("wgpu_core", config.wgpu_level)
            .filter_module("wgpu_hal", config.wgpu_level)
            .filter_module("naga", config.wgpu_level);

        // Explicit filters override the defaults above.
        if let Some(filter) = config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            builder.parse_filters(&filter);
        }

        builder.write_style(config.write_style);

        // An embedding host or test harness may already own the global logger.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

use anyhow::{Result, anyhow};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

const BOOTSTRAP_FILTER: &str = "info";

pub struct LogConfig {
    pub filter: String,
}

impl LogConfig {
    fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.filter)
            .map_err(|e| anyhow!("invalid log filter {:?}: {}", self.filter, e))
    }
}

/// Process-wide subscriber. `RUST_LOG`, when set, wins over both the
/// bootstrap filter and the one from settings.
pub struct Logger {
    reload_handle: reload::Handle<EnvFilter, Registry>,
    env_override: bool,
}

impl Logger {
    pub fn new_bootstrap() -> Self {
        let (filter, env_override) = match EnvFilter::try_from_default_env() {
            Ok(filter) => (filter, true),
            Err(_) => (EnvFilter::new(BOOTSTRAP_FILTER), false),
        };
        let (filter, reload_handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();

        Self {
            reload_handle,
            env_override,
        }
    }

    /// Swap in the configured filter. The filter is validated even when
    /// `RUST_LOG` keeps it from taking effect.
    pub fn reload_from_config(&self, config: &LogConfig) -> Result<()> {
        let filter = config.env_filter()?;
        if self.env_override {
            tracing::debug!(configured = %config.filter, "RUST_LOG set, keeping it");
            return Ok(());
        }
        self.reload_handle.reload(filter).map_err(|e| anyhow!(e))?;
        Ok(())
    }
}

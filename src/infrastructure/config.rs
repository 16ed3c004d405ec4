use tracing::Level;
use tracing::subscriber::DefaultGuard;

/// Diagnostic logging settings, decided once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
}

impl LogConfig {
    pub fn from_debug(debug: bool) -> Self {
        let level = if debug { Level::DEBUG } else { Level::INFO };
        Self { level }
    }

    /// Installs a stderr subscriber for the current thread until the guard drops
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(self.level)
            .with_target(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

/// Конфигурация консольного логирования крейта.
///
/// Управляет минимальным уровнем событий `tracing`, которые печатаются
/// через `fmt`‑слой (исходящие запросы и вставки пишутся на `DEBUG`,
/// проглоченные ошибки на `WARN`).
///
/// **Поля**
/// - `max_level`: самый подробный уровень, который попадает в консоль.
/// - `with_target`: печатать ли модуль, породивший событие.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    pub max_level: Level,
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            max_level: Level::INFO,
            with_target: true,
        }
    }
}

/// Try to install a global `tracing` subscriber printing to the console.
///
/// **Returns**
/// - `Ok(())` if the subscriber was installed.
/// - `Err(..)` if a global subscriber is already set.
pub fn try_init_tracing_with_config(
    config: TracingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.with_target)
        .with_filter(tracing_subscriber::filter::LevelFilter::from_level(config.max_level));

    Registry::default().with(fmt_layer).try_init()
}

/// Install the console subscriber with [`TracingConfig::default`].
///
/// Does nothing when a global subscriber is already set, so it is safe to
/// call from several entry points.
pub fn init_tracing() {
    if let Err(e) = try_init_tracing_with_config(TracingConfig::default()) {
        tracing::debug!(error = %e, "console subscriber not installed");
    }
}

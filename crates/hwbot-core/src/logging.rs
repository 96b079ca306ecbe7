use crate::{errors::Error, Result};

/// Initialize logging/tracing for the bot.
///
/// Default: debug for the bot crates, info for everything else.
/// Can be overridden with `RUST_LOG`.
pub fn init(service_name: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let service_target = service_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "info,hwbot=debug,hwbot_core=debug,hwbot_practicum=debug,hwbot_telegram=debug,{service_target}=debug"
        ))
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Config(format!("logging init failed: {e}")))
}

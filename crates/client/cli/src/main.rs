//! Terminal client entry point.
mod config;
mod line_mode;
mod observers;
mod poll_mode;

use anyhow::Result;
use config::{CliConfig, FrontendMode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = CliConfig::from_env();

    match config.mode {
        FrontendMode::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
                )
                .with_writer(std::io::stderr)
                .init();
            line_mode::run(config).await
        }
        FrontendMode::Realtime => {
            // Stdout is the game screen; logs go to a file instead.
            let appender = tracing_appender::rolling::never(".", "realm.log");
            let (writer, _log_guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
                )
                .with_writer(writer)
                .with_ansi(false)
                .init();
            poll_mode::run(config).await
        }
    }
}

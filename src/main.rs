//! slircbot - Straylight modular IRC bot.

use slircbot::config::{self, Config};
use slircbot::host::{BotHost, HostSettings};
use slircbot::modules;
use slircbot::network::{Identity, IrcConnector};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        return Err(anyhow::anyhow!(
            "{} configuration error(s) in {config_path}",
            errors.len()
        ));
    }

    info!(
        nick = %config.bot.nick,
        endpoints = config.endpoint_list().len(),
        "Starting slircbot"
    );

    let connector = IrcConnector::new(
        Identity::from_config(&config.bot),
        config.bot.registration_timeout(),
    );
    let mut host = BotHost::new(HostSettings::from_config(&config), connector);
    modules::install(&config.modules, &mut host);

    // Ctrl-C goes through the regular quit path.
    let handle = host.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, quitting");
            handle.quit("Interrupted");
        }
    });

    host.run().await;

    // Module tasks abandoned at shutdown must not keep the process alive.
    std::process::exit(0);
}

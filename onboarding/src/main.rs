use std::str::FromStr;
use std::sync::Arc;

use gateway::{Intents, Shard, ShardInfo, ShardOptions};
use onboarding::{ApplicationTracker, Config, Handler, RestClient, Result};
use sentry::types::Dsn;
use sentry_tracing::EventFilter;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Arc::new(Config::from_env()?);

    let _guard = configure_observability(&config);

    #[cfg(feature = "metrics")]
    start_metrics_server(&config);

    let rest = Arc::new(RestClient::new(&config.discord_token)?);
    let tracker = Arc::new(ApplicationTracker::new(Arc::clone(&config), rest));
    let handler = Arc::new(Handler::new(tracker));

    let options = ShardOptions {
        token: config.discord_token.clone(),
        intents: Intents::build(&[
            Intents::Guilds,
            Intents::GuildMembers,
            Intents::GuildMessages,
            Intents::MessageContent,
        ]),
        shard_info: ShardInfo::default(),
    };

    info!("Connecting to gateway");

    tokio::select! {
        res = Shard::new(options, handler).run() => res?,
        _ = tokio::signal::ctrl_c() => info!("Received shutdown signal"),
    }

    Ok(())
}

fn configure_observability(config: &Config) -> sentry::ClientInitGuard {
    let _guard = sentry::init(sentry::ClientOptions {
        dsn: config
            .sentry_dsn
            .clone()
            .map(|dsn| Dsn::from_str(dsn.as_str()).expect("Invalid DSN")),
        debug: config.debug_mode,
        release: sentry::release_name!(),
        ..Default::default()
    });

    let sentry_layer = sentry_tracing::layer().event_filter(|meta| match meta.level() {
        &tracing::Level::ERROR | &tracing::Level::WARN => EventFilter::Exception,
        _ => EventFilter::Ignore,
    });

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(sentry_layer);

    if config.json_log {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    _guard
}

#[cfg(feature = "metrics")]
fn start_metrics_server(config: &Config) {
    if let Some(addr) = config.metrics_addr.clone() {
        tokio::spawn(async move {
            if let Err(e) = onboarding::metrics::start_server(&addr).await {
                tracing::error!(error = %e, "Metrics server failed");
            }
        });
    }
}

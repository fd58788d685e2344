use std::sync::Arc;

use anyhow::Context;

use lead_assist::agent::LeadAgent;
use lead_assist::channels::{Channel, TelegramChannel};
use lead_assist::config::{BrandConfig, ServerConfig, TelegramMode};
use lead_assist::routes::{AppState, app_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let brand = BrandConfig::from_env();

    eprintln!("📇 Lead Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Company: {}", brand.company_name);
    eprintln!("   HTTP: http://0.0.0.0:{}", config.port);

    // ── Database + conversation ──────────────────────────────────────────
    let agent = Arc::new(
        LeadAgent::open(&config.db_path, &brand)
            .await
            .with_context(|| format!("failed to start with database {}", config.db_path.display()))?,
    );
    eprintln!("   Database: {}", config.db_path.display());

    // ── Telegram ─────────────────────────────────────────────────────────
    let mut webhook_channel: Option<Arc<dyn Channel>> = None;

    match config.telegram {
        Some(telegram) => {
            let channel = Arc::new(TelegramChannel::new(telegram.bot_token));
            if let Err(e) = channel.health_check().await {
                tracing::warn!(error = %e, "Telegram health check failed");
            }

            match telegram.mode {
                TelegramMode::Webhook => {
                    eprintln!("   Telegram: webhook (POST /webhook)");
                    webhook_channel = Some(channel);
                }
                TelegramMode::Polling => {
                    eprintln!("   Telegram: long-polling");
                    let stream = channel.start_polling();
                    tokio::spawn(Arc::clone(&agent).run_stream(stream, channel));
                }
            }
        }
        None => eprintln!("   Telegram: disabled (TELEGRAM_BOT_TOKEN not set)"),
    }

    // ── HTTP ─────────────────────────────────────────────────────────────
    let app = app_routes(AppState {
        agent,
        telegram: webhook_channel,
        company_name: brand.company_name.clone(),
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, "HTTP server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await
        .context("HTTP server failed")?;

    Ok(())
}

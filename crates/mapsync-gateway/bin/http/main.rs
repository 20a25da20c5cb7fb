mod cli;

use std::sync::Arc;

use crate::cli::CLI;
use clap::Parser;
use mapsync_core::{
    DisabledIdentityVerifier, IdentityVerifier, Repository, StaticIdentityVerifier, TripPlanner,
};
use mapsync_gateway::cors::cors_layer;
use mapsync_gateway::{App, AppState};
use mapsync_generator::RandomGenerator;
use mapsync_planner::{TripService, TripServiceSettings};
use mapsync_storage::{DisconnectedRepository, InMemoryRepository, MySqlRepository};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = CLI::try_parse()?;

    let settings = TripServiceSettings::builder()
        .share_base(config.share_base.clone())
        .write_policy(config.write_policy)
        .max_attempts(config.max_attempts)
        .build();

    let planner: Arc<dyn TripPlanner> = if config.in_memory {
        info!("using in-memory trip store");
        planner(InMemoryRepository::new(), settings)
    } else if let Some(dsn) = config.mysql_dsn.as_deref() {
        info!("connecting to mysql trip store");
        planner(MySqlRepository::connect(dsn).await?, settings)
    } else {
        warn!("no trip store configured; lookups will answer 503 and trips are not saved");
        planner(DisconnectedRepository::new(), settings)
    };

    let identity: Arc<dyn IdentityVerifier> = if config.identity_token.is_empty() {
        Arc::new(DisabledIdentityVerifier)
    } else {
        let verifier = config
            .identity_token
            .iter()
            .fold(StaticIdentityVerifier::new(), |verifier, (token, user)| {
                verifier.with_token(token, user)
            });
        Arc::new(verifier)
    };

    let cors = cors_layer(config.deployment, &config.allowed_origin)?;
    let state = AppState::new(planner, identity).with_demo_login(config.enable_demo_login);
    let app = App::service(state, cors);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(
        listen_addr = %listener.local_addr()?,
        deployment = %config.deployment,
        write_policy = %config.write_policy,
        "starting gateway server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway server stopped");
    Ok(())
}

fn planner<R: Repository>(repository: R, settings: TripServiceSettings) -> Arc<dyn TripPlanner> {
    Arc::new(TripService::with_settings(
        repository,
        RandomGenerator::new(),
        settings,
    ))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(err) => {
            warn!(error = %err, "failed to listen for Ctrl+C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

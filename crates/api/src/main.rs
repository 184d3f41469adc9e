use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use motorpool_api::config::ServerConfig;
use motorpool_api::notifications::build_vehicle_notifier;
use motorpool_api::router::build_app_router;
use motorpool_api::state::AppState;
use motorpool_db::repositories::{VehicleRepo, VehicleRepository};
use motorpool_events::{EventBus, EventLog};
use motorpool_usecases::VehiclesUseCases;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "motorpool_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(
        host = %config.host,
        port = %config.port,
        notification_policy = %config.notification_policy,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = motorpool_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    motorpool_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    motorpool_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let event_log_handle = tokio::spawn(EventLog::run(event_bus.subscribe()));
    tracing::info!("Event bus created");

    // --- Use cases ---
    let repository: Arc<dyn VehicleRepository> = Arc::new(VehicleRepo::new(pool));
    let notifier = build_vehicle_notifier(&config, &event_bus)
        .expect("Failed to build vehicle notifier");
    let vehicles = Arc::new(
        VehiclesUseCases::new(
            Arc::clone(&repository),
            notifier,
            config.notification_policy,
        )
        .with_delivery_timeout(Duration::from_secs(config.notify_timeout_secs)),
    );

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        vehicles,
        repository,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Once the router and any in-flight background notifications release
    // their notifier clones, dropping this handle closes the bus and ends
    // the event log.
    drop(event_bus);
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    match tokio::time::timeout(drain, event_log_handle).await {
        Ok(Ok(logged)) => tracing::info!(logged, "Event log stopped"),
        Ok(Err(e)) => tracing::error!(error = %e, "Event log task failed"),
        Err(_) => tracing::warn!("Event log did not stop within the shutdown timeout"),
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

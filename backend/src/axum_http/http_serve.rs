use crate::{
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
    usecases::{
        registration::RegistrationUseCase,
        registration_sessions::{RegistrationSessionUseCase, SessionLimits},
    },
};
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::get,
};
use crates::infra::subscriber_store::SharedSubscriberRepository;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

pub async fn start(
    config: Arc<DotEnvyConfig>,
    subscriber_repository: SharedSubscriberRepository,
) -> Result<()> {
    let app = app(&config, subscriber_repository)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.backend_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!(
        stage = %config.stage,
        store = config.store.name(),
        "Server is running on port {}",
        config.backend_server.port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdow_signal())
        .await?;

    Ok(())
}

pub fn app(
    config: &DotEnvyConfig,
    subscriber_repository: SharedSubscriberRepository,
) -> Result<Router> {
    let registration_usecase = Arc::new(RegistrationUseCase::new(subscriber_repository));
    let sessions_usecase = Arc::new(RegistrationSessionUseCase::new(
        registration_usecase,
        SessionLimits {
            idle_ttl: Duration::from_secs(config.registration.session_ttl_secs),
            max_open: config.registration.max_sessions,
        },
    ));

    let allow_origin = match &config.cors.allowed_origin {
        Some(origin) => AllowOrigin::exact(
            HeaderValue::from_str(origin).context("CORS_ALLOWED_ORIGIN is invalid")?,
        ),
        None => AllowOrigin::from(Any),
    };

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest("/api/v1/plans", routers::plans::routes())
        .nest("/api/v1/site", routers::site::routes())
        .nest(
            "/api/v1/registrations",
            routers::registrations::routes(sessions_usecase),
        )
        .route("/api/v1/health-check", get(default_routers::health_check))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.backend_server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(
            (config.backend_server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([CONTENT_TYPE])
                .allow_origin(allow_origin),
        )
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

async fn shutdow_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}

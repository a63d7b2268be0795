use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionRepository};
use crate::routes::with_scorecard_routes;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayer;
use investment_scorecard::config::AppConfig;
use investment_scorecard::error::AppError;
use investment_scorecard::session::ScorecardSessionService;
use investment_scorecard::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

fn apply_overrides(config: &mut AppConfig, args: ServeArgs) {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
}

/// Session routes plus probes, with request metrics recorded on every route.
fn build_app(config: &AppConfig, readiness: Arc<AtomicBool>) -> Router {
    let (metrics_layer, metrics_handle) = PrometheusMetricLayer::pair();
    let state = AppState {
        readiness,
        metrics: Arc::new(metrics_handle),
    };

    let sessions = InMemorySessionRepository::from_config(&config.sessions);
    let service = ScorecardSessionService::new(Arc::new(sessions));

    with_scorecard_routes(Arc::new(service))
        .layer(Extension(state))
        .layer(metrics_layer)
}

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    apply_overrides(&mut config, args);
    telemetry::init(&config.telemetry)?;

    let readiness = Arc::new(AtomicBool::new(false));
    let app = build_app(&config, readiness.clone());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);

    info!(
        environment = ?config.environment,
        %addr,
        max_sessions = config.sessions.max_sessions,
        idle_ttl_secs = config.sessions.idle_ttl_secs,
        "scorecard service listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use investment_scorecard::config::{
        AppEnvironment, ServerConfig, SessionConfig, TelemetryConfig,
    };

    fn config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            telemetry: TelemetryConfig::default(),
            sessions: SessionConfig::default(),
        }
    }

    #[test]
    fn cli_overrides_replace_configured_address() {
        let mut config = config();
        apply_overrides(
            &mut config,
            ServeArgs {
                host: Some("0.0.0.0".to_string()),
                port: None,
            },
        );
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }
}

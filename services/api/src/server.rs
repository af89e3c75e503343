use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::side_quest_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use side_quest::config::AppConfig;
use side_quest::error::AppError;
use side_quest::telemetry;
use side_quest::workflows::side_quest::SideQuestHunt;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        hunt: Arc::new(SideQuestHunt::from_config(&config.report)),
        output_dir: Arc::new(config.report.output_dir.clone()),
    };

    let app = side_quest_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        timezone = config.report.timezone.name(),
        "side quest hunt service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

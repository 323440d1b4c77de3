use actix_web::{web, App, HttpServer};
use backend::config::AppConfig;
use backend::extractors::validated_json::MAX_JSON_BODY;
use backend::infra::state::StateBuilder;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::services::bootstrap::ensure_bootstrap_admin;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match StateBuilder::from_config(&config) {
        Ok(builder) => match builder.build().await {
            Ok(state) => state,
            Err(e) => {
                error!(error = %e, "failed to build application state");
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!(error = %e, "failed to configure application state");
            std::process::exit(1);
        }
    };

    info!(token_duration = %app_state.tokens.token_duration(), "application state ready");

    if let Some(bootstrap) = &config.bootstrap {
        if let Err(e) = ensure_bootstrap_admin(&app_state, bootstrap).await {
            error!(error = %e, "failed to seed bootstrap admin");
            std::process::exit(1);
        }
    }

    let data = web::Data::new(app_state);
    let cors_origins = config.cors_allowed_origins.clone();

    info!(host = %config.host, port = config.port, "starting institute backend");

    // Last `.wrap` runs first: RequestTrace assigns the trace id before the
    // span and the request log see the request.
    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&cors_origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .app_data(web::PayloadConfig::new(MAX_JSON_BODY))
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

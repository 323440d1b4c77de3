use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::extractors::validated_json::MAX_JSON_BODY;
use backend::infra::state::build_state;
use backend::media::MemoryImageHost;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;

/// Everything a test needs: shared state (for seeding and minting tokens)
/// and a handle on the in-memory image host for assertions.
pub struct TestContext {
    pub data: web::Data<AppState>,
    pub images: Arc<MemoryImageHost>,
}

/// Fresh in-memory SQLite database, migrated with the real migrator.
pub async fn build_test_context() -> TestContext {
    let images = Arc::new(MemoryImageHost::new());
    let state = build_state()
        .with_security(SecurityConfig::for_tests())
        .with_database_url("sqlite::memory:", true)
        .with_images(images.clone())
        .build()
        .await
        .expect("test state should build");

    TestContext {
        data: web::Data::new(state),
        images,
    }
}

impl TestContext {
    pub fn state(&self) -> &AppState {
        self.data.get_ref()
    }
}

/// Build the service with the production route table and the same
/// middleware stack `main.rs` installs (minus CORS).
pub async fn init_app(
    data: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data)
            .app_data(web::PayloadConfig::new(MAX_JSON_BODY))
            .configure(routes::configure),
    )
    .await
}

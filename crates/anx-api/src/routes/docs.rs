use axum::Json;
use utoipa::OpenApi;

use crate::routes::{conversation, health};

#[derive(OpenApi)]
#[openapi(
    paths(
        conversation::update,
        conversation::next,
        health::health_check,
    ),
    components(schemas(
        conversation::NextRequest,
        conversation::NextResponse,
        conversation::UpdateResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "conversation", description = "Bot lines, flows and conversation steps"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn document() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        doc.info.title = "Anxiety Free API".to_string();
        doc.info.description = Some("An API for the Anxiety Free app.".to_string());
        doc
    }
}

/// OpenAPI document for this service
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::document())
}

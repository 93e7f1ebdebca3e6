//! Self-service usage introspection

use crate::server::routes::bearer_credential;
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

/// Configure profile routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile", web::get().to(profile));
}

/// Usage snapshot for the calling identity
///
/// Read-only: the snapshot applies the same window pruning as the admission
/// check but never consumes quota, so polling this endpoint cannot rate
/// limit the caller.
async fn profile(state: web::Data<AppState>, req: HttpRequest) -> ActixResult<HttpResponse> {
    let identity = state.auth.resolve_identity(bearer_credential(&req));
    let snapshot = state.ledger.snapshot(&identity).await;

    Ok(HttpResponse::Ok().json(snapshot))
}

use crate::services::rate_limit_service::{RateLimitService, RateTier};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Records each decision made by the governor layer of one tier.
pub async fn log_rate_limit_events(
    State((service, tier)): State<(RateLimitService, RateTier)>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    let retry_after = response.headers().get("x-ratelimit-after").and_then(|v| v.to_str().ok());
    service.record(tier, response.status(), retry_after);

    response
}

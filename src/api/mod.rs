use crate::api::rate_limit::log_rate_limit_events;
use crate::config::Config;
use crate::domain::auth::AdminPolicy;
use crate::services::contact_service::ContactService;
use crate::services::health_service::HealthService;
use crate::services::rate_limit_service::{RateLimitService, RateTier};
use crate::services::refresh_service::RefreshService;
use crate::services::skill_service::SkillService;
use axum::body::Body;
use axum::http::Request;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod contact;
pub mod events;
pub mod health;
pub mod middleware;
pub mod rate_limit;
pub mod schemas;
pub mod skills;
pub mod submissions;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub contact_service: ContactService,
    pub skill_service: SkillService,
    pub refresh_service: RefreshService,
    pub rate_limit_service: RateLimitService,
    pub admin_policy: AdminPolicy,
    pub shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

#[derive(Clone, Debug)]
pub struct MgmtState {
    pub health_service: HealthService,
}

#[derive(Debug)]
pub struct ServiceContainer {
    pub contact_service: ContactService,
    pub skill_service: SkillService,
    pub refresh_service: RefreshService,
    pub rate_limit_service: RateLimitService,
}

/// Configures and returns the public application router.
///
/// # Panics
/// Panics if the rate limiter configuration cannot be constructed.
pub fn app_router(
    config: Config,
    services: ServiceContainer,
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
) -> Router {
    let limiter = &services.rate_limit_service;
    let governor = |tier: RateTier| {
        let quota = limiter.quota(tier);
        GovernorConfigBuilder::default()
            .per_nanosecond(quota.interval_ns)
            .burst_size(quota.burst)
            .key_extractor(limiter.key())
            .finish()
            .map(Arc::new)
            .expect("Failed to build rate limiter config")
    };
    let standard_conf = governor(RateTier::Standard);
    let contact_conf = governor(RateTier::Contact);

    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);
    let admin_policy = AdminPolicy::new(&config.auth.admin_logins);

    let state = AppState {
        config,
        contact_service: services.contact_service,
        skill_service: services.skill_service,
        refresh_service: services.refresh_service,
        rate_limit_service: services.rate_limit_service,
        admin_policy,
        shutdown_rx,
    };

    let contact_routes = Router::new()
        .route("/v1/contact", post(contact::submit_contact))
        .layer(GovernorLayer::new(contact_conf))
        .layer(from_fn_with_state(
            (state.rate_limit_service.clone(), RateTier::Contact),
            log_rate_limit_events,
        ));

    let api_routes = Router::new()
        .route("/api/skills", get(skills::list_skills))
        .route("/v1/skills", get(skills::list_skills))
        .route("/v1/admin/submissions", get(submissions::list_submissions))
        .route("/v1/admin/submissions/{id}", delete(submissions::delete_submission))
        .route("/v1/admin/submissions/{id}/read", post(submissions::toggle_read))
        .route("/v1/admin/events", get(events::refresh_events))
        .layer(GovernorLayer::new(standard_conf))
        .layer(from_fn_with_state(
            (state.rate_limit_service.clone(), RateTier::Standard),
            log_rate_limit_events,
        ));

    Router::new()
        .merge(contact_routes)
        .merge(api_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                        "otel.kind" = "server",
                        "admin" = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, _span: &tracing::Span| {
                        let status = response.status();
                        tracing::Span::current().record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(
            axum::http::HeaderName::from_static("x-request-id"),
            middleware::MakeRequestUuid,
        ))
        .with_state(state)
}

pub fn mgmt_router(state: MgmtState) -> Router {
    Router::new().route("/livez", get(health::livez)).route("/readyz", get(health::readyz)).with_state(state)
}

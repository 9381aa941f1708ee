#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

use crate::api::{MgmtState, ServiceContainer};
use crate::config::Config;
use crate::domain::skill::default_catalog;
use crate::domain::validation::ValidationRules;
use crate::services::contact_service::ContactService;
use crate::services::health_service::HealthService;
use crate::services::rate_limit_service::RateLimitService;
use crate::services::refresh_service::RefreshService;
use crate::services::skill_service::SkillService;
use crate::storage::SubmissionStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Everything the two routers need, wired around a single store.
#[derive(Debug)]
pub struct App {
    pub services: ServiceContainer,
    pub mgmt: MgmtState,
}

impl App {
    /// Wires the services. The store is shared by the contact flow and the readiness probe.
    #[must_use]
    pub fn build(config: &Config, store: Arc<dyn SubmissionStore>) -> Self {
        let refresh_service = RefreshService::default();
        let contact_service = ContactService::new(
            Arc::clone(&store),
            ValidationRules::new(config.contact.message_min_length),
            refresh_service.clone(),
        );
        let skill_service = SkillService::new(default_catalog(), Duration::from_millis(config.skills.delay_ms));
        let rate_limit_service = RateLimitService::new(config.server.trusted_proxies.clone(), &config.rate_limit);
        let health_service = HealthService::new(store, config.health.clone());

        Self {
            services: ServiceContainer { contact_service, skill_service, refresh_service, rate_limit_service },
            mgmt: MgmtState { health_service },
        }
    }
}

/// Routes panics through tracing so they end up in structured logs.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(|l| format!("{}:{}", l.file(), l.line())).unwrap_or_default();
        tracing::error!(panic = %info, %location, "Thread panicked");
    }));
}

/// Flips the shutdown channel on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}

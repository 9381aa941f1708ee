use crate::domain::refresh::Route;
use opentelemetry::{KeyValue, global, metrics::Counter};
use tokio::sync::broadcast;

#[derive(Clone, Debug)]
struct Metrics {
    emitted_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("portfolio-server");
        Self {
            emitted_total: meter
                .u64_counter("portfolio_view_refresh_signals_total")
                .with_description("Stale-view signals emitted after mutations")
                .build(),
        }
    }
}

/// Tells dashboard consumers that a route's data is stale.
///
/// Delivery is fire-and-forget: nobody listening is fine, and a slow
/// listener that falls behind simply misses old signals.
#[derive(Clone, Debug)]
pub struct RefreshService {
    tx: broadcast::Sender<Route>,
    metrics: Metrics,
}

impl RefreshService {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx, metrics: Metrics::new() }
    }

    #[tracing::instrument(level = "debug", skip(self), fields(route = %route))]
    pub fn emit(&self, route: Route) {
        let receivers = self.tx.send(route).unwrap_or(0);
        tracing::debug!(receivers, "View refresh signal emitted");
        self.metrics.emitted_total.add(1, &[KeyValue::new("route", route.path())]);
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Route> {
        self.tx.subscribe()
    }
}

impl Default for RefreshService {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_route() {
        let service = RefreshService::default();
        let mut rx = service.subscribe();

        service.emit(Route::Dashboard);

        assert_eq!(rx.recv().await.unwrap(), Route::Dashboard);
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let service = RefreshService::default();
        service.emit(Route::Dashboard);
    }
}

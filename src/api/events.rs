use crate::api::AppState;
use crate::api::middleware::AdminUser;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

/// Streams view refresh signals to the dashboard as server-sent events.
///
/// Each event is named `stale` and carries the route path as data. The
/// stream ends when the server starts shutting down.
pub async fn refresh_events(
    admin: AdminUser,
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!(admin = %admin.login, "Dashboard subscribed to refresh events");

    let mut shutdown_rx = state.shutdown_rx.clone();
    let stream = BroadcastStream::new(state.refresh_service.subscribe())
        .filter_map(|msg| {
            std::future::ready(match msg {
                Ok(route) => Some(Ok(Event::default().event("stale").data(route.path()))),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Refresh subscriber lagged");
                    None
                }
            })
        })
        .take_until(async move {
            let _ = shutdown_rx.wait_for(|&s| s).await;
        });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

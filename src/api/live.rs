//! Live seller feed over Server-Sent Events

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::{Stream, StreamExt};

use crate::domain::Pincode;
use crate::error::MarketError;

use super::AppState;

/// Streams newly placed orders for one pincode.
///
/// The stream never ends on its own; client disconnect drops the underlying
/// subscription, which unregisters the session from the feed in-process.
pub async fn order_feed(
    State(state): State<AppState>,
    Path(pincode): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, MarketError> {
    let pincode = Pincode::parse(&pincode)?;
    let subscription = state.feed.subscribe(pincode);
    let stream = subscription
        .into_stream()
        .map(|order| Event::default().event("orderPlaced").json_data(&order));
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

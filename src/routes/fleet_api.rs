use crate::routes::AppState;
use axum::response::sse::{Event, Sse};
use axum::{extract::State, Json};
use csman::models::ServerRecord;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

#[derive(serde::Serialize)]
pub struct FleetSnapshot {
    pub scanned_at: Option<u64>,
    pub servers: Vec<ServerRecord>,
}

pub async fn fleet_snapshot(State(state): State<AppState>) -> Json<FleetSnapshot> {
    Json(FleetSnapshot {
        scanned_at: state.fleet.scanned_at().await,
        servers: state.fleet.snapshot().await,
    })
}

pub async fn fleet_events(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let receiver = state.fleet.subscribe();
    let stream = BroadcastStream::new(receiver)
        .filter_map(|change| change.ok())
        .filter_map(|change| serde_json::to_string(&change).ok())
        .map(|payload| Ok(Event::default().data(payload)));
    Sse::new(stream)
}

//! Ticket listing API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/events/{event_id}/tickets",
        get(handler::list).put(handler::replace),
    )
}

//! Ticket API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{ApiResponse, AppError, AppResult, Ticket};
use std::collections::HashSet;

use crate::core::ServerState;

/// GET /api/events/:event_id/tickets - 获取票种列表
pub async fn list(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
) -> AppResult<ApiResponse<Vec<Ticket>>> {
    Ok(ApiResponse::success(state.tickets(&event_id)))
}

/// PUT /api/events/:event_id/tickets - 替换票种列表
pub async fn replace(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
    Json(tickets): Json<Vec<Ticket>>,
) -> AppResult<ApiResponse<Vec<Ticket>>> {
    let mut seen = HashSet::new();
    for ticket in &tickets {
        if ticket.id.trim().is_empty() {
            return Err(AppError::validation("Ticket id must not be empty"));
        }
        if !seen.insert(ticket.id.as_str()) {
            return Err(AppError::validation(format!(
                "Duplicate ticket id {}",
                ticket.id
            )));
        }
    }

    tracing::info!(event_id = %event_id, count = tickets.len(), "Ticket listing replaced");
    state.set_tickets(event_id, tickets.clone());
    Ok(ApiResponse::success(tickets))
}

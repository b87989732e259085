//! Venue Map API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::VENUE_MAP_VERSION;
use shared::validation::validate_venue_map;
use shared::{ApiResponse, AppError, AppResult, ErrorCode, VenueMap};

use crate::core::ServerState;

fn check_event_id(event_id: &str) -> AppResult<()> {
    if event_id.trim().is_empty() {
        return Err(AppError::invalid_request("Event id must not be empty"));
    }
    Ok(())
}

/// GET /api/events/:event_id/venue-map - 获取平面图
pub async fn get_venue_map(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
) -> AppResult<ApiResponse<VenueMap>> {
    check_event_id(&event_id)?;
    Ok(ApiResponse::success_optional(state.venue_map(&event_id)))
}

/// PUT /api/events/:event_id/venue-map - 保存平面图
///
/// The document is validated again here; a rejected map leaves the stored one
/// untouched.
pub async fn put_venue_map(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
    Json(map): Json<VenueMap>,
) -> AppResult<ApiResponse<VenueMap>> {
    check_event_id(&event_id)?;

    if map.version != VENUE_MAP_VERSION {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!(
                "Unsupported venue map version {} (expected {})",
                map.version, VENUE_MAP_VERSION
            ),
        ));
    }

    if let Err(e) = validate_venue_map(&map) {
        tracing::warn!(event_id = %event_id, error = %e, "Venue map rejected");
        return Err(e.into());
    }

    state.put_venue_map(event_id.clone(), map.clone());
    tracing::info!(event_id = %event_id, zones = map.zones.len(), "Venue map stored");
    Ok(ApiResponse::success(map))
}

/// DELETE /api/events/:event_id/venue-map - 删除平面图
pub async fn delete_venue_map(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
) -> AppResult<ApiResponse<bool>> {
    check_event_id(&event_id)?;
    let removed = state.remove_venue_map(&event_id);
    if removed {
        tracing::info!(event_id = %event_id, "Venue map deleted");
    }
    Ok(ApiResponse::success(removed))
}

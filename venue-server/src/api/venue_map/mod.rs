//! Venue map API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/events/{event_id}/venue-map | GET | 读取平面图 (不存在时 data 为空) |
//! | /api/events/{event_id}/venue-map | PUT | 校验并保存平面图 |
//! | /api/events/{event_id}/venue-map | DELETE | 删除平面图 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/events/{event_id}/venue-map",
        get(handler::get_venue_map)
            .put(handler::put_venue_map)
            .delete(handler::delete_venue_map),
    )
}

//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`venue_map`] - 场馆平面图读写
//! - [`tickets`] - 票种列表

pub mod health;
pub mod tickets;
pub mod venue_map;

use axum::Router;

use crate::core::ServerState;

/// Build the Axum router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(venue_map::router())
        .merge(tickets::router())
}

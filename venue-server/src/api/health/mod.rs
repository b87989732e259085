//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 健康检查 | 无 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "code": 0,
//!   "message": "OK",
//!   "data": { "status": "ok", "version": "0.1.0", "uptime_seconds": 12, "venue_maps": 3 }
//! }
//! ```

use axum::{Router, extract::State, routing::get};
use serde::Serialize;
use shared::ApiResponse;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | error)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
    /// 已存储的平面图数量
    venue_maps: usize,
}

/// GET /health
pub async fn health(State(state): State<ServerState>) -> ApiResponse<HealthResponse> {
    ApiResponse::success(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        venue_maps: state.venue_map_count(),
    })
}

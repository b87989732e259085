//! Venue Map Server - 场馆平面图持久化服务
//!
//! # 架构概述
//!
//! Reference persistence service for venue maps. Stores one `VenueMap`
//! document per event, re-validates every write, and serves the ticket
//! listing the buyer-facing selector reads.
//!
//! # 模块结构
//!
//! ```text
//! venue-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志
//! ```

pub mod api;
pub mod core;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState, build_app};
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

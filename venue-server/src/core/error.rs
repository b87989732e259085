use thiserror::Error;

/// 服务器启动/运行错误
///
/// Request-level failures use `shared::AppError`; this type covers what can go
/// wrong around the HTTP loop itself.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

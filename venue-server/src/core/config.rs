/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖（启动时先加载 `.env`）：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志目录，设置后按天滚动写文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | MAX_BODY_BYTES | 16777216 | 请求体上限(字节)，内联图片需要较大上限 |
/// | TICKETS_FILE | - | 启动时加载的票种 JSON 文件 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 LOG_LEVEL=debug cargo run -p venue-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 请求体大小上限 (字节)
    pub max_body_bytes: usize,
    /// 票种种子文件: `{ "<eventId>": [Ticket, ...] }`
    pub tickets_file: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty("LOG_DIR"),
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            request_timeout_ms: lookup("REQUEST_TIMEOUT_MS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            max_body_bytes: lookup("MAX_BODY_BYTES")
                .and_then(|p| p.parse().ok())
                .unwrap_or(16 * 1024 * 1024),
            tickets_file: non_empty("TICKETS_FILE"),
        }
    }

    /// 使用自定义端口覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16) -> Self {
        let mut config = Self::from_lookup(|_| None);
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

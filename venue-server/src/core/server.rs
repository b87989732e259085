//! HTTP 服务器
//!
//! 路由 + Tower 中间件组装，以及监听/优雅关闭。

use axum::extract::DefaultBodyLimit;
use axum::{Router, middleware};
use http::StatusCode;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::{Config, Result, ServerState};

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the complete application: routes, state and middleware
///
/// Used by [`Server`] and directly by in-process tests.
pub fn build_app(state: ServerState) -> Router {
    let config = state.config.clone();
    with_middleware(crate::api::build_router().with_state(state), &config)
}

fn with_middleware(router: Router, config: &Config) -> Router {
    router
        // Inline floor-plan images are large; the explicit limit below replaces axum's default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        // Tower HTTP 中间件
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        // HTTP 请求日志中间件
        .layer(middleware::from_fn(log_request))
}

/// HTTP 服务器
#[derive(Debug, Clone)]
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// 以空状态创建服务器
    pub fn new(config: Config) -> Self {
        let state = ServerState::new(config.clone());
        Self { config, state }
    }

    /// 使用已初始化的状态创建服务器
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// 绑定配置端口并运行，直到收到 Ctrl+C
    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// 在已绑定的监听器上运行
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!("🚀 Venue map server listening on http://{}", addr);

        let app = build_app(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

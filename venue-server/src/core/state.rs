use dashmap::DashMap;
use shared::{Ticket, VenueMap};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::core::{Config, Result, ServerError};

/// 服务器状态 - 持有所有共享数据的引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆的成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | venue_maps | DashMap<eventId, VenueMap> | 场馆平面图 |
/// | tickets | DashMap<eventId, Vec<Ticket>> | 票种列表 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    venue_maps: Arc<DashMap<String, VenueMap>>,
    tickets: Arc<DashMap<String, Vec<Ticket>>>,
    started_at: Instant,
}

impl ServerState {
    /// 创建空状态
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            venue_maps: Arc::new(DashMap::new()),
            tickets: Arc::new(DashMap::new()),
            started_at: Instant::now(),
        }
    }

    /// 创建状态并加载票种种子文件 (如果配置了)
    pub fn initialize(config: &Config) -> Result<Self> {
        let state = Self::new(config.clone());
        if let Some(path) = &config.tickets_file {
            let raw = std::fs::read_to_string(path)?;
            let seeded: HashMap<String, Vec<Ticket>> = serde_json::from_str(&raw)
                .map_err(|e| ServerError::Config(format!("Invalid tickets file {}: {}", path, e)))?;
            let events = seeded.len();
            for (event_id, tickets) in seeded {
                state.set_tickets(event_id, tickets);
            }
            tracing::info!(path = %path, events, "Ticket listing loaded");
        }
        Ok(state)
    }

    /// 运行时间 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    // ========== Venue maps ==========

    pub fn venue_map(&self, event_id: &str) -> Option<VenueMap> {
        self.venue_maps.get(event_id).map(|m| m.clone())
    }

    /// Store a map, replacing any previous one
    pub fn put_venue_map(&self, event_id: impl Into<String>, map: VenueMap) {
        self.venue_maps.insert(event_id.into(), map);
    }

    pub fn remove_venue_map(&self, event_id: &str) -> bool {
        self.venue_maps.remove(event_id).is_some()
    }

    pub fn venue_map_count(&self) -> usize {
        self.venue_maps.len()
    }

    // ========== Tickets ==========

    /// Ticket types of an event; unknown events have none
    pub fn tickets(&self, event_id: &str) -> Vec<Ticket> {
        self.tickets
            .get(event_id)
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    pub fn set_tickets(&self, event_id: impl Into<String>, tickets: Vec<Ticket>) {
        self.tickets.insert(event_id.into(), tickets);
    }
}

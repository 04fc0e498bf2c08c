use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sea_orm::DatabaseConnection;

use crate::domain::standings::TableRow;
use crate::ws::broker::RealtimeBroker;
use crate::ws::hub::ScoreboardRegistry;

use super::security_config::SecurityConfig;

/// Cached standings live briefly; every write path invalidates explicitly.
const STANDINGS_CACHE_TTL: Duration = Duration::from_secs(30);

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Redis-backed realtime broker (optional; single-instance deployments
    /// and tests broadcast through the in-process registry only)
    realtime: Option<Arc<RealtimeBroker>>,
    /// In-process websocket session registry, keyed by match id
    ws_registry: Arc<ScoreboardRegistry>,
    /// Sorted standings per division, invalidated on every result write
    standings_cache: Cache<i64, Arc<Vec<TableRow>>>,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            realtime: None,
            ws_registry: Arc::new(ScoreboardRegistry::new()),
            standings_cache: Cache::builder()
                .max_capacity(64)
                .time_to_live(STANDINGS_CACHE_TTL)
                .build(),
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            realtime: None,
            ws_registry: Arc::new(ScoreboardRegistry::new()),
            standings_cache: Cache::builder()
                .max_capacity(64)
                .time_to_live(STANDINGS_CACHE_TTL)
                .build(),
        }
    }

    /// Attach a realtime broker for cross-instance scoreboard fan-out
    pub fn with_realtime(mut self, realtime: Arc<RealtimeBroker>) -> Self {
        self.realtime = Some(realtime);
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn realtime(&self) -> Option<Arc<RealtimeBroker>> {
        self.realtime.clone()
    }

    pub fn ws_registry(&self) -> Arc<ScoreboardRegistry> {
        self.ws_registry.clone()
    }

    pub fn standings_cache(&self) -> &Cache<i64, Arc<Vec<TableRow>>> {
        &self.standings_cache
    }
}

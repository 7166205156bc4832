//! Cache diagnostics endpoint.
//!
//! ```text
//! GET /api/cache/stats
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CacheStatus;
use crate::inbound::http::state::HttpState;

/// Cache tier status as reported to clients.
///
/// An unreachable cache is reported with `200 {"status":"unavailable"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CacheStatsResponse {
    #[serde(rename_all = "camelCase")]
    Connected {
        #[schema(example = "7.2.4")]
        redis_version: String,
        connected_clients: u64,
        #[schema(example = "1.02M")]
        used_memory_human: String,
        total_connections_received: u64,
        /// Number of keys in the selected database.
        keyspace: u64,
    },
    Unavailable,
}

impl From<CacheStatus> for CacheStatsResponse {
    fn from(value: CacheStatus) -> Self {
        match value {
            CacheStatus::Connected(stats) => Self::Connected {
                redis_version: stats.version,
                connected_clients: stats.connected_clients,
                used_memory_human: stats.used_memory_human,
                total_connections_received: stats.total_connections_received,
                keyspace: stats.keyspace,
            },
            CacheStatus::Unavailable => Self::Unavailable,
        }
    }
}

/// Report cache server statistics.
#[utoipa::path(
    get,
    path = "/api/cache/stats",
    responses(
        (status = 200, description = "Cache status", body = CacheStatsResponse)
    ),
    tags = ["cache"],
    operation_id = "cacheStats",
    security([])
)]
#[get("/cache/stats")]
pub async fn cache_stats(state: web::Data<HttpState>) -> web::Json<CacheStatsResponse> {
    web::Json(state.cache_stats.cache_status().await.into())
}

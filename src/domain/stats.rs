//! Per-match player statistics.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::QueryParams;
use crate::resource::{ResourceClient, ResourceId};

pub const BASE_PATH: &str = "/player-stats";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub id: ResourceId,
    pub match_id: ResourceId,
    pub player_id: ResourceId,
    #[serde(default)]
    pub team_id: Option<ResourceId>,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPlayerStat {
    pub match_id: ResourceId,
    pub player_id: ResourceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<ResourceId>,
    pub goals: u32,
    pub assists: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerStatUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assists: Option<u32>,
}

/// Filter for listing statistics. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatFilter {
    pub match_id: Option<ResourceId>,
    pub player_id: Option<ResourceId>,
}

impl ResourceClient<PlayerStat> {
    pub async fn find(&self, filter: &StatFilter) -> Result<Vec<PlayerStat>, ApiError> {
        let query = QueryParams::from_serialize(filter)?;
        self.get_all(Some(&query)).await
    }
}

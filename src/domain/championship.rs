//! Championships: the top-level container of rounds.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::Method;
use crate::resource::{ResourceClient, ResourceId};

pub const BASE_PATH: &str = "/championships";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Championship {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewChampionship {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Partial update; unset fields are left to the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChampionshipUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// One row of the championship's player ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub player_id: ResourceId,
    pub player_name: String,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub matches_played: u32,
}

impl ResourceClient<Championship> {
    /// Player ranking computed by the server.
    pub async fn standings(&self, championship_id: ResourceId) -> Result<Vec<PlayerStanding>, ApiError> {
        self.request(Method::Get, &format!("{}/standings", championship_id), None, None)
            .await
    }
}

//! Teams of a round and their rosters.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::player::Player;
use crate::error::ApiError;
use crate::http::{Method, QueryParams};
use crate::resource::{ResourceClient, ResourceId};

pub const BASE_PATH: &str = "/teams";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: ResourceId,
    pub round_id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTeam {
    pub round_id: ResourceId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub player_ids: Vec<ResourceId>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ResourceClient<Team> {
    pub async fn for_round(&self, round_id: ResourceId) -> Result<Vec<Team>, ApiError> {
        let query = QueryParams::new()
            .filter("round_id", Some(round_id))
            .include(&["players"]);
        self.get_all(Some(&query)).await
    }

    /// Put a player on the roster; returns the updated team.
    pub async fn add_player(&self, team_id: ResourceId, player_id: ResourceId) -> Result<Team, ApiError> {
        self.request(
            Method::Post,
            &format!("{}/players", team_id),
            Some(json!({ "player_id": player_id })),
            None,
        )
        .await
    }

    pub async fn remove_player(&self, team_id: ResourceId, player_id: ResourceId) -> Result<(), ApiError> {
        self.execute(Method::Delete, &format!("{}/players/{}", team_id, player_id), None, None)
            .await?;
        Ok(())
    }
}

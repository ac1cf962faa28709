//! Rounds and the next-match queue.
//!
//! The queue/pairing algorithm lives on the server. The client asks for a
//! suggestion, shows it, and when the server reports that a tie-break decision
//! is needed, sends back the team the user chose to keep on the field.

use serde::{Deserialize, Serialize};

use crate::domain::matches::Match;
use crate::error::ApiError;
use crate::http::{Method, QueryParams};
use crate::resource::client::to_body;
use crate::resource::{ResourceClient, ResourceId};

pub const BASE_PATH: &str = "/rounds";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: ResourceId,
    pub championship_id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub round_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewRound {
    pub championship_id: ResourceId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Team as it appears inside a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSlot {
    pub id: ResourceId,
    pub name: String,
}

/// The server's proposal for the next match of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextMatchSuggestion {
    #[serde(default)]
    pub home_team: Option<TeamSlot>,
    #[serde(default)]
    pub away_team: Option<TeamSlot>,
    /// Teams waiting, in queue order.
    #[serde(default)]
    pub queue: Vec<TeamSlot>,
    /// The previous match was drawn and the user must pick who stays.
    #[serde(default)]
    pub requires_decision: bool,
    /// Teams the user may choose between when a decision is required.
    #[serde(default)]
    pub candidates: Vec<TeamSlot>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request to create the next match, with the tie-break choice if one was needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NextMatchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staying_team_id: Option<ResourceId>,
}

impl NextMatchRequest {
    pub fn keep(team_id: ResourceId) -> Self {
        Self {
            staying_team_id: Some(team_id),
        }
    }
}

impl ResourceClient<Round> {
    pub async fn for_championship(&self, championship_id: ResourceId) -> Result<Vec<Round>, ApiError> {
        let query = QueryParams::new().filter("championship_id", Some(championship_id));
        self.get_all(Some(&query)).await
    }

    pub async fn suggest_next_match(&self, round_id: ResourceId) -> Result<NextMatchSuggestion, ApiError> {
        self.request(Method::Get, &format!("{}/next-match", round_id), None, None)
            .await
    }

    /// Create the next match as the server's queue decides.
    pub async fn create_next_match(&self, round_id: ResourceId, request: &NextMatchRequest) -> Result<Match, ApiError> {
        if let Some(team_id) = request.staying_team_id {
            tracing::debug!(round_id, staying_team_id = team_id, "Creating next match with tie-break choice");
        }
        let body = to_body(request)?;
        self.request(Method::Post, &format!("{}/next-match", round_id), Some(body), None)
            .await
    }
}

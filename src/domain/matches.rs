//! Matches between two teams of a round.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::QueryParams;
use crate::resource::{ResourceClient, ResourceId};

pub const BASE_PATH: &str = "/matches";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Finished,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: ResourceId,
    pub round_id: ResourceId,
    pub home_team_id: ResourceId,
    pub away_team_id: ResourceId,
    #[serde(default)]
    pub home_score: u32,
    #[serde(default)]
    pub away_score: u32,
    #[serde(default = "default_status")]
    pub status: MatchStatus,
    /// Position of the match inside its round.
    #[serde(default)]
    pub sequence: Option<u32>,
}

fn default_status() -> MatchStatus {
    MatchStatus::Scheduled
}

impl Match {
    /// Winning team id, `None` for a draw or an unfinished match.
    pub fn winner(&self) -> Option<ResourceId> {
        if self.status != MatchStatus::Finished {
            return None;
        }
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(self.home_team_id),
            std::cmp::Ordering::Less => Some(self.away_team_id),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewMatch {
    pub round_id: ResourceId,
    pub home_team_id: ResourceId,
    pub away_team_id: ResourceId,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MatchStatus>,
}

impl ResourceClient<Match> {
    pub async fn for_round(&self, round_id: ResourceId) -> Result<Vec<Match>, ApiError> {
        let query = QueryParams::new().filter("round_id", Some(round_id));
        self.get_all(Some(&query)).await
    }

    /// Record the final score and close the match.
    pub async fn finish(&self, match_id: ResourceId, home_score: u32, away_score: u32) -> Result<Match, ApiError> {
        let update = MatchUpdate {
            home_score: Some(home_score),
            away_score: Some(away_score),
            status: Some(MatchStatus::Finished),
        };
        self.update(match_id, &update).await
    }
}

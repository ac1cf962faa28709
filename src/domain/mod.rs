//! Pelada domain records and feature-specific operations.
//!
//! Each submodule fixes a base path and the record/payload types for one
//! collection, and adds its extra endpoints as methods on
//! `ResourceClient<Record>`.

pub mod championship;
pub mod matches;
pub mod player;
pub mod round;
pub mod stats;
pub mod team;

pub use championship::{Championship, ChampionshipUpdate, NewChampionship, PlayerStanding};
pub use matches::{Match, MatchStatus, MatchUpdate, NewMatch};
pub use player::{NewPlayer, Player, PlayerUpdate};
pub use round::{NewRound, NextMatchRequest, NextMatchSuggestion, Round, RoundUpdate, TeamSlot};
pub use stats::{NewPlayerStat, PlayerStat, PlayerStatUpdate, StatFilter};
pub use team::{NewTeam, Team, TeamUpdate};

//! Process-wide client facade.
//!
//! # Responsibilities
//! - Resolve the API root once and build the one shared transport
//! - Wire credential store, navigator and transport into a single pipeline
//! - Hand out typed resource clients and the auth service
//!
//! # Design Decisions
//! - Everything here is immutable after construction and cheap to clone
//! - Transport construction failure is fatal (`SetupError`), never retried

pub mod auth;

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::{ApiRoot, ClientConfig};
use crate::domain::{championship, matches, player, round, stats, team};
use crate::domain::{Championship, Match, Player, PlayerStat, Round, Team};
use crate::error::SetupError;
use crate::http::{HttpTransport, Pipeline, Transport};
use crate::resource::ResourceClient;
use crate::session::{CredentialStore, KeyValueStore, Navigator, SessionGuard};

pub use auth::{AuthService, CurrentUser};

/// Entry point: one per process.
#[derive(Debug, Clone)]
pub struct ApiClient {
    root: ApiRoot,
    pipeline: Pipeline,
}

impl ApiClient {
    /// Build the client from configuration with the reqwest transport.
    pub fn from_config(
        config: &ClientConfig,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, SetupError> {
        let root = ApiRoot::resolve(&config.api)?;
        let transport = HttpTransport::new(&config.timeouts)?;

        tracing::info!(
            root = %root.root(),
            same_origin = root.is_same_origin(),
            request_timeout_secs = config.timeouts.request_secs,
            "API client initialized"
        );

        Ok(Self::with_transport(
            root,
            Arc::new(transport),
            store,
            navigator,
            &config.session.login_path,
        ))
    }

    /// Build the client around any transport.
    pub fn with_transport(
        root: ApiRoot,
        transport: Arc<dyn Transport>,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
        login_path: &str,
    ) -> Self {
        let session = SessionGuard::new(CredentialStore::new(store), navigator, login_path);
        Self {
            root,
            pipeline: Pipeline::new(transport, session),
        }
    }

    pub fn root(&self) -> &ApiRoot {
        &self.root
    }

    pub fn credentials(&self) -> &CredentialStore {
        self.pipeline.session().credentials()
    }

    /// Client for an arbitrary collection.
    pub fn resource<T: DeserializeOwned>(&self, base_path: &str) -> ResourceClient<T> {
        ResourceClient::new(&self.root, self.pipeline.clone(), base_path)
    }

    pub fn championships(&self) -> ResourceClient<Championship> {
        self.resource(championship::BASE_PATH)
    }

    pub fn rounds(&self) -> ResourceClient<Round> {
        self.resource(round::BASE_PATH)
    }

    pub fn teams(&self) -> ResourceClient<Team> {
        self.resource(team::BASE_PATH)
    }

    pub fn matches(&self) -> ResourceClient<Match> {
        self.resource(matches::BASE_PATH)
    }

    pub fn players(&self) -> ResourceClient<Player> {
        self.resource(player::BASE_PATH)
    }

    pub fn player_stats(&self) -> ResourceClient<PlayerStat> {
        self.resource(stats::BASE_PATH)
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.root.clone(), self.pipeline.clone())
    }
}

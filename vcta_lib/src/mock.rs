use std::{cell::RefCell, rc::Rc};

use async_trait::async_trait;

use crate::{
    api::Api,
    auth::{AuthToken, Credentials, MemoryTokenStore, TokenStore},
    config::{self, ApiConfig},
    dashboard::DashboardPayload,
    error::ApiError,
    scoreboard::Scoreboard,
    trip::TripId,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub method: &'static str,
    pub url: String,
    pub authorization: Option<String>,
}

/// Scripted api. Every call answers with the configured result and is recorded
/// together with the auth header a real client would have sent.
pub struct MockApi {
    config: ApiConfig,
    tokens: Rc<MemoryTokenStore>,
    pub dashboard: Result<DashboardPayload, ApiError>,
    pub scoreboard: Result<Scoreboard, ApiError>,
    pub delete: Result<(), ApiError>,
    pub token: Result<AuthToken, ApiError>,
    sent: RefCell<Vec<SentRequest>>,
}

impl MockApi {
    pub fn new(tokens: Rc<MemoryTokenStore>) -> Self {
        Self {
            config: ApiConfig::default(),
            tokens,
            dashboard: Err(ApiError::Network("no dashboard scripted".into())),
            scoreboard: Ok(Scoreboard::default()),
            delete: Ok(()),
            token: Err(ApiError::Status { status: 400, message: "Unable to log in".into() }),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.borrow().clone()
    }

    fn record(&self, method: &'static str, path: &str) {
        self.sent.borrow_mut().push(SentRequest {
            method,
            url: self.config.endpoint(path),
            authorization: self.tokens.authorization(),
        });
    }
}

#[async_trait(?Send)]
impl Api for MockApi {
    async fn dashboard(&self) -> Result<DashboardPayload, ApiError> {
        self.record("GET", config::DASHBOARD_PATH);
        self.dashboard.clone()
    }

    async fn scoreboard(&self) -> Result<Scoreboard, ApiError> {
        self.record("GET", config::SCOREBOARD_PATH);
        self.scoreboard.clone()
    }

    async fn delete_trip(&self, trip_id: TripId) -> Result<(), ApiError> {
        self.record("DELETE", &config::trip_path(trip_id));
        self.delete.clone()
    }

    async fn obtain_auth_token(&self, _credentials: &Credentials) -> Result<AuthToken, ApiError> {
        self.record("POST", config::OBTAIN_AUTH_TOKEN_PATH);
        self.token.clone()
    }
}

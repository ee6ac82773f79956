use crate::trip::TripId;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8888/api/v1/";

/// Key of the auth token in durable client storage.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Ids 1-3 belong to the seed trips, locally added trips count up from here.
pub const FIRST_LOCAL_TRIP_ID: TripId = 4;

pub const DASHBOARD_PATH: &str = "custom/dashboard/";
pub const SCOREBOARD_PATH: &str = "custom/scoreboard/";
pub const OBTAIN_AUTH_TOKEN_PATH: &str = "obtain-auth-token/";

pub fn trip_path(trip_id: TripId) -> String {
    format!("custom/trip/{trip_id}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Base url baked in at build time through `VCTA_API_BASE_URL`, if set.
    pub fn from_build_env() -> Self {
        match option_env!("VCTA_API_BASE_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

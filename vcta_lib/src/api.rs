use async_trait::async_trait;

use crate::{
    auth::{AuthToken, Credentials},
    dashboard::DashboardPayload,
    error::ApiError,
    scoreboard::Scoreboard,
    trip::TripId,
};

/// The endpoints of the VCTA api used by the client.
///
/// Implementations attach the stored auth token to every request.
/// Futures are not `Send`, the browser runs them on a single thread.
#[async_trait(?Send)]
pub trait Api {
    /// GET `custom/dashboard/`
    async fn dashboard(&self) -> Result<DashboardPayload, ApiError>;

    /// GET `custom/scoreboard/`
    async fn scoreboard(&self) -> Result<Scoreboard, ApiError>;

    /// DELETE `custom/trip/{id}`. The response body is ignored.
    async fn delete_trip(&self, trip_id: TripId) -> Result<(), ApiError>;

    /// POST `obtain-auth-token/`
    async fn obtain_auth_token(&self, credentials: &Credentials) -> Result<AuthToken, ApiError>;
}

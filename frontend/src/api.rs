use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde_json::Value;
use vcta_lib::{
    api::Api,
    auth::{AuthToken, Credentials, TokenStore},
    config::{self, ApiConfig},
    dashboard::DashboardPayload,
    error::ApiError,
    scoreboard::Scoreboard,
    trip::TripId,
};

use crate::storage::LocalStorageTokens;

/// The VCTA api over `fetch`. Sends the stored token with every request.
pub struct HttpApi {
    config: ApiConfig,
    tokens: LocalStorageTokens,
}

impl HttpApi {
    pub fn new(config: ApiConfig, tokens: LocalStorageTokens) -> Self {
        Self { config, tokens }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.authorization() {
            Some(authorization) => builder.header("Authorization", &authorization),
            None => builder,
        }
    }

    pub async fn make_request<ReturnType>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ReturnType, ApiError>
    where
        ReturnType: serde::de::DeserializeOwned,
    {
        let response = self.authorized(builder).send().await.map_err(network_error)?;
        decode(checked(response).await?).await
    }
}

#[async_trait(?Send)]
impl Api for HttpApi {
    async fn dashboard(&self) -> Result<DashboardPayload, ApiError> {
        self.make_request(Request::get(&self.config.endpoint(config::DASHBOARD_PATH))).await
    }

    async fn scoreboard(&self) -> Result<Scoreboard, ApiError> {
        self.make_request(Request::get(&self.config.endpoint(config::SCOREBOARD_PATH))).await
    }

    async fn delete_trip(&self, trip_id: TripId) -> Result<(), ApiError> {
        let url = self.config.endpoint(&config::trip_path(trip_id));
        let response = self.authorized(Request::delete(&url)).send().await.map_err(network_error)?;
        checked(response).await?;
        Ok(())
    }

    async fn obtain_auth_token(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        let url = self.config.endpoint(config::OBTAIN_AUTH_TOKEN_PATH);
        let request = self
            .authorized(Request::post(&url))
            .json(credentials)
            .map_err(|err| ApiError::Decode(err.to_string()))?;

        let response = request.send().await.map_err(network_error)?;
        decode(checked(response).await?).await
    }
}

fn network_error(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

/// Turns non 2xx responses into errors, using the body as message when there is one.
async fn checked(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let message = match response.text().await {
        Ok(body) if !body.trim().is_empty() => error_message(&body),
        _ => response.status_text(),
    };

    Err(ApiError::Status { status, message })
}

async fn decode<ReturnType>(response: Response) -> Result<ReturnType, ApiError>
where
    ReturnType: serde::de::DeserializeOwned,
{
    response.json::<ReturnType>().await.map_err(|err| ApiError::Decode(err.to_string()))
}

// The api reports errors as {"detail": ".."} or {"non_field_errors": [".."]}
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_owned();
    };

    if let Some(detail) = json.get("detail").and_then(Value::as_str) {
        return detail.to_owned();
    }

    if let Some(first) = json
        .get("non_field_errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(Value::as_str)
    {
        return first.to_owned();
    }

    json.to_string()
}

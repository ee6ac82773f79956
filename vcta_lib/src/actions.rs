//! Asynchronous operations on the store.
//!
//! Actions talk to the [`Api`] and report every state change through `commit`.
//! They never touch the [`crate::Store`] directly, so the owner of the store
//! decides when mutations are applied. Failures are committed as state and
//! also returned, for the caller to log.

use crate::{
    api::Api,
    auth::{Credentials, TokenStore},
    error::ActionError,
    store::Mutation,
    trip::{NewTrip, TripId},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddTrip(NewTrip),
    DeleteTrip(TripId),
    GetScoreboard,
    GetDashboard,
    GetAuthToken(Credentials),
    Logout,
}

pub async fn dispatch<A, T>(
    api: &A,
    tokens: &T,
    action: Action,
    commit: impl Fn(Mutation),
) -> Result<(), ActionError>
where
    A: Api + ?Sized,
    T: TokenStore + ?Sized,
{
    match action {
        Action::AddTrip(trip) => {
            add_trip(trip, commit);
            Ok(())
        }
        Action::DeleteTrip(trip_id) => delete_trip(api, trip_id, commit).await,
        Action::GetScoreboard => get_scoreboard(api, commit).await,
        Action::GetDashboard => get_dashboard(api, tokens, commit).await,
        Action::GetAuthToken(credentials) => {
            get_auth_token(api, tokens, &credentials, commit).await
        }
        Action::Logout => logout(tokens, commit),
    }
}

/// Local only, the server is not told about new trips.
pub fn add_trip(trip: NewTrip, commit: impl Fn(Mutation)) {
    commit(Mutation::AddTrip(trip));
}

pub async fn delete_trip<A>(
    api: &A,
    trip_id: TripId,
    commit: impl Fn(Mutation),
) -> Result<(), ActionError>
where
    A: Api + ?Sized,
{
    commit(Mutation::DeleteTrip(trip_id));

    match api.delete_trip(trip_id).await {
        Ok(()) => {
            commit(Mutation::TripDeleted(trip_id));
            Ok(())
        }
        Err(error) => {
            let error = ActionError::from(error);
            commit(Mutation::TripDeleteFailed { trip_id, error: error.clone() });
            Err(error)
        }
    }
}

pub async fn get_scoreboard<A>(api: &A, commit: impl Fn(Mutation)) -> Result<(), ActionError>
where
    A: Api + ?Sized,
{
    commit(Mutation::LoadingScoreboard);

    match api.scoreboard().await {
        Ok(scoreboard) => {
            commit(Mutation::ScoreboardLoaded(scoreboard));
            Ok(())
        }
        Err(error) => {
            let error = ActionError::from(error);
            commit(Mutation::ScoreboardFailed(error.clone()));
            Err(error)
        }
    }
}

/// Needs a stored token. Without one nothing is requested and the dashboard is left as is.
pub async fn get_dashboard<A, T>(
    api: &A,
    tokens: &T,
    commit: impl Fn(Mutation),
) -> Result<(), ActionError>
where
    A: Api + ?Sized,
    T: TokenStore + ?Sized,
{
    if !tokens.is_logged_in() {
        return Err(ActionError::NotLoggedIn);
    }

    commit(Mutation::LoadingDashboard);

    match api.dashboard().await {
        Ok(payload) => {
            commit(Mutation::DashboardLoaded(payload.into()));
            Ok(())
        }
        Err(error) => {
            let error = ActionError::from(error);
            commit(Mutation::DashboardFailed(error.clone()));
            Err(error)
        }
    }
}

/// Exchanges credentials for a token and stores it. A failed login keeps the old token.
pub async fn get_auth_token<A, T>(
    api: &A,
    tokens: &T,
    credentials: &Credentials,
    commit: impl Fn(Mutation),
) -> Result<(), ActionError>
where
    A: Api + ?Sized,
    T: TokenStore + ?Sized,
{
    commit(Mutation::LoggingIn);

    let result = match api.obtain_auth_token(credentials).await {
        Ok(token) => tokens.save(&token).map_err(ActionError::from),
        Err(error) => Err(ActionError::from(error)),
    };

    match &result {
        Ok(()) => commit(Mutation::LoggedIn),
        Err(error) => commit(Mutation::LoginFailed(error.clone())),
    }

    result
}

pub fn logout<T>(tokens: &T, commit: impl Fn(Mutation)) -> Result<(), ActionError>
where
    T: TokenStore + ?Sized,
{
    tokens.clear()?;
    commit(Mutation::LoggedOut);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::{
        auth::{AuthToken, MemoryTokenStore},
        dashboard::DashboardPayload,
        error::ApiError,
        mock::{MockApi, SentRequest},
        remote::Remote,
        store::Store,
    };

    struct Harness {
        tokens: Rc<MemoryTokenStore>,
        api: MockApi,
        store: RefCell<Store>,
        committed: RefCell<Vec<Mutation>>,
    }

    impl Harness {
        fn new(tokens: MemoryTokenStore) -> Self {
            let tokens = Rc::new(tokens);
            Self {
                api: MockApi::new(tokens.clone()),
                tokens,
                store: RefCell::new(Store::default()),
                committed: RefCell::new(Vec::new()),
            }
        }

        fn logged_in() -> Self {
            Self::new(MemoryTokenStore::with_token(AuthToken::new("secret")))
        }

        fn run(&self, action: Action) -> Result<(), ActionError> {
            let commit = |mutation: Mutation| {
                self.committed.borrow_mut().push(mutation.clone());
                let _ = self.store.borrow_mut().apply(mutation);
            };
            block_on(dispatch(&self.api, &*self.tokens, action, commit))
        }

        fn committed(&self) -> Vec<Mutation> {
            self.committed.borrow().clone()
        }
    }

    fn payload() -> DashboardPayload {
        serde_json::from_value(json!({
            "trips": [
                { "id": 1, "date": "2020-01-01", "distance": "5.00" },
                { "id": 2, "date": "2020-01-01", "distance": "2.50" },
                { "id": 3, "date": "2020-01-03", "distance": "10.00" }
            ],
            "userInfo": [{ "tripCount": 3, "distance": 17.5, "days": 2, "username": "anna" }]
        }))
        .unwrap()
    }

    #[test]
    fn dashboard_needs_login() {
        let harness = Harness::new(MemoryTokenStore::default());
        let before = harness.store.borrow().clone();

        assert_eq!(harness.run(Action::GetDashboard), Err(ActionError::NotLoggedIn));

        assert!(harness.api.sent().is_empty());
        assert!(harness.committed().is_empty());
        assert_eq!(*harness.store.borrow(), before);
    }

    #[test]
    fn dashboard_loads_first_user_info() {
        let mut harness = Harness::logged_in();
        harness.api.dashboard = Ok(payload());

        harness.run(Action::GetDashboard).unwrap();

        assert_eq!(harness.committed()[0], Mutation::LoadingDashboard);
        let store = harness.store.borrow();
        let dashboard = store.dashboard().data().unwrap();
        assert_eq!(dashboard.trips.len(), 3);
        assert_eq!(dashboard.user_info.trip_count, 3);
        assert_eq!(dashboard.user_info.extra["username"], json!("anna"));
        assert_eq!(
            harness.api.sent(),
            vec![SentRequest {
                method: "GET",
                url: "http://localhost:8888/api/v1/custom/dashboard/".into(),
                authorization: Some("Token secret".into()),
            }]
        );
    }

    #[test]
    fn failed_dashboard_is_not_stuck_loading() {
        let mut harness = Harness::logged_in();
        harness.api.dashboard = Err(ApiError::Status { status: 500, message: "boom".into() });

        let result = harness.run(Action::GetDashboard);

        let expected = ActionError::Api(ApiError::Status { status: 500, message: "boom".into() });
        assert_eq!(result, Err(expected.clone()));
        assert_eq!(harness.store.borrow().dashboard(), &Remote::Failed(expected));
    }

    #[test]
    fn scoreboard_replaces_state() {
        let mut harness = Harness::new(MemoryTokenStore::default());
        harness.api.scoreboard = Ok(serde_json::from_value(json!({
            "individuals": [{ "name": "anna" }],
            "teams": [{ "name": "Blue" }, { "name": "Red" }]
        }))
        .unwrap());

        harness.run(Action::GetScoreboard).unwrap();

        assert_eq!(harness.committed()[0], Mutation::LoadingScoreboard);
        let store = harness.store.borrow();
        let scoreboard = store.scoreboard().data().unwrap();
        assert_eq!(scoreboard.individuals.len(), 1);
        assert_eq!(scoreboard.teams[1]["name"], json!("Red"));
        // Scoreboard is public, no header without a token
        assert_eq!(harness.api.sent()[0].authorization, None);
    }

    #[test]
    fn failed_scoreboard_surfaces_error() {
        let mut harness = Harness::new(MemoryTokenStore::default());
        harness.api.scoreboard = Err(ApiError::Network("offline".into()));

        assert!(harness.run(Action::GetScoreboard).is_err());
        assert_eq!(
            harness.store.borrow().scoreboard().error(),
            Some(&ActionError::Api(ApiError::Network("offline".into())))
        );
    }

    #[test]
    fn login_stores_token_for_later_requests() {
        let mut harness = Harness::new(MemoryTokenStore::default());
        harness.api.token = Ok(AuthToken::new("fresh"));
        harness.api.dashboard = Ok(payload());

        harness.run(Action::GetAuthToken(Credentials::new("anna", "hunter2"))).unwrap();
        assert_eq!(harness.tokens.load(), Some(AuthToken::new("fresh")));
        assert_eq!(harness.store.borrow().login(), &Remote::Loaded(()));

        harness.run(Action::GetDashboard).unwrap();

        let sent = harness.api.sent();
        assert_eq!(sent[0].method, "POST");
        assert_eq!(sent[0].authorization, None);
        assert_eq!(sent[1].authorization.as_deref(), Some("Token fresh"));
    }

    #[test]
    fn failed_login_keeps_previous_token() {
        let harness = Harness::logged_in();

        let result = harness.run(Action::GetAuthToken(Credentials::new("anna", "wrong")));

        assert!(matches!(result, Err(ActionError::Api(ApiError::Status { status: 400, .. }))));
        assert_eq!(harness.tokens.load(), Some(AuthToken::new("secret")));
        assert!(harness.store.borrow().login().error().is_some());
    }

    #[test]
    fn delete_is_optimistic() {
        let mut harness = Harness::logged_in();
        harness.api.dashboard = Ok(payload());
        harness.run(Action::GetDashboard).unwrap();

        harness.run(Action::DeleteTrip(2)).unwrap();

        let store = harness.store.borrow();
        let dashboard = store.dashboard().data().unwrap();
        assert_eq!(dashboard.trips.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(dashboard.user_info.trip_count, 2);
        assert_eq!(dashboard.user_info.distance, 15.);
        assert_eq!(dashboard.user_info.days, 2);
        assert_eq!(store.deletion(2), Some(&Remote::Loaded(())));
        assert_eq!(harness.api.sent()[1].url, "http://localhost:8888/api/v1/custom/trip/2");
        assert_eq!(harness.api.sent()[1].method, "DELETE");
    }

    #[test]
    fn failed_delete_rolls_back() {
        let mut harness = Harness::logged_in();
        harness.api.dashboard = Ok(payload());
        harness.api.delete = Err(ApiError::Status { status: 404, message: "Not found".into() });
        harness.run(Action::GetDashboard).unwrap();
        let before = harness.store.borrow().dashboard().clone();

        assert!(harness.run(Action::DeleteTrip(3)).is_err());

        let store = harness.store.borrow();
        assert_eq!(store.dashboard(), &before);
        assert!(matches!(store.deletion(3), Some(Remote::Failed(_))));
    }

    #[test]
    fn delete_of_unknown_trip_still_asks_server() {
        let mut harness = Harness::logged_in();
        harness.api.dashboard = Ok(payload());
        harness.run(Action::GetDashboard).unwrap();
        let before = harness.store.borrow().clone();

        harness.run(Action::DeleteTrip(99)).unwrap();

        assert_eq!(*harness.store.borrow(), before);
        assert_eq!(harness.api.sent().len(), 2);
    }

    #[test]
    fn added_trip_gets_next_local_id() {
        let mut harness = Harness::logged_in();
        harness.api.dashboard = Ok(serde_json::from_value(json!({
            "trips": [],
            "userInfo": [{ "tripCount": 0, "distance": 0, "days": 0 }]
        }))
        .unwrap());
        harness.run(Action::GetDashboard).unwrap();

        let trip = NewTrip::parse("2020-01-01", "5").unwrap();
        harness.run(Action::AddTrip(trip)).unwrap();

        let store = harness.store.borrow();
        let dashboard = store.dashboard().data().unwrap();
        assert_eq!(dashboard.trips[0].id, 4);
        assert_eq!(dashboard.user_info.trip_count, 1);
        assert_eq!(dashboard.user_info.distance, 5.);
        assert_eq!(dashboard.user_info.days, 1);
        // No request besides the dashboard fetch
        assert_eq!(harness.api.sent().len(), 1);
    }

    #[test]
    fn logout_forgets_token() {
        let harness = Harness::logged_in();

        harness.run(Action::Logout).unwrap();

        assert_eq!(harness.tokens.load(), None);
        assert_eq!(harness.committed(), vec![Mutation::LoggedOut]);
        assert_eq!(harness.run(Action::GetDashboard), Err(ActionError::NotLoggedIn));
    }
}

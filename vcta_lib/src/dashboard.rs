use serde::{Deserialize, Serialize};

use crate::{
    trip::{Trip, TripId},
    user::UserInfo,
};

/// The logged in user's trips and the stats derived from them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub trips: Vec<Trip>,
    pub user_info: UserInfo,
}

impl Dashboard {
    pub fn new(trips: Vec<Trip>) -> Self {
        let user_info = UserInfo::from_trips(&trips);
        Self { trips, user_info }
    }

    pub fn trip(&self, trip_id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id == trip_id)
    }

    pub fn max_trip_id(&self) -> Option<TripId> {
        self.trips.iter().map(|trip| trip.id).max()
    }
}

/// Response body of the dashboard endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    #[serde(default)]
    pub trips: Vec<Trip>,
    pub user_info: UserInfoShape,
}

/// The dashboard endpoint wraps the user's info in a one element list,
/// other endpoints send it flat. Both are accepted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum UserInfoShape {
    List(Vec<UserInfo>),
    Single(UserInfo),
}

impl From<DashboardPayload> for Dashboard {
    fn from(payload: DashboardPayload) -> Self {
        let user_info = match payload.user_info {
            UserInfoShape::List(list) => list.into_iter().next(),
            UserInfoShape::Single(info) => Some(info),
        };

        match user_info {
            Some(user_info) => Dashboard { trips: payload.trips, user_info },
            None => Dashboard::new(payload.trips),
        }
    }
}

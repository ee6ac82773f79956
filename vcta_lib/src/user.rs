use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::trip::{self, Trip};

/// Aggregated stats for the logged in user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub trip_count: usize,
    #[serde(default, deserialize_with = "trip::decimal")]
    pub distance: f64,
    #[serde(default)]
    pub days: usize,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserInfo {
    pub fn from_trips(trips: &[Trip]) -> Self {
        Self {
            trip_count: trips.len(),
            distance: trip::total_distance(trips),
            days: trip::distinct_days(trips),
            extra: Map::new(),
        }
    }

    /// Accounts for `added`, which must already be part of `trips`.
    pub(crate) fn record_added(&mut self, added: &Trip, trips: &[Trip]) {
        self.trip_count += 1;
        self.distance += added.distance;
        self.days = trip::distinct_days(trips);
    }

    /// Accounts for `removed`, which must no longer be part of `trips`.
    pub(crate) fn record_removed(&mut self, removed: &Trip, trips: &[Trip]) {
        self.trip_count = self.trip_count.saturating_sub(1);
        self.distance -= removed.distance;
        self.days = trip::distinct_days(trips);
    }
}

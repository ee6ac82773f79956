use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub type TripId = i64;

/// Bounds the server enforces on a single trip, in km.
pub const MIN_TRIP_DISTANCE: f64 = 0.01;
pub const MAX_TRIP_DISTANCE: f64 = 300.;
pub const DISTANCE_DECIMALS: usize = 2;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub date: NaiveDate,
    #[serde(deserialize_with = "decimal")]
    pub distance: f64,
    /// Fields the server sends that the client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Trip {
    pub fn new(id: TripId, trip: NewTrip) -> Self {
        Self {
            id,
            date: trip.date,
            distance: trip.distance,
            extra: trip.extra,
        }
    }
}

/// A trip entered locally, before it has been given an id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewTrip {
    pub date: NaiveDate,
    #[serde(deserialize_with = "decimal")]
    pub distance: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TripInputError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),

    #[error("Invalid distance '{0}'")]
    Distance(String),

    #[error(
        "Distance must be between {min} and {max} km",
        min = MIN_TRIP_DISTANCE,
        max = MAX_TRIP_DISTANCE
    )]
    DistanceOutOfRange,

    #[error("Distance can have at most {decimals} decimals", decimals = DISTANCE_DECIMALS)]
    TooManyDecimals,
}

impl NewTrip {
    pub fn new(date: NaiveDate, distance: f64) -> Self {
        Self {
            date,
            distance,
            extra: Map::new(),
        }
    }

    /// Parses form input, applying the same limits as the server model.
    pub fn parse(date: &str, distance: &str) -> Result<Self, TripInputError> {
        let date_str = date.trim();
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| TripInputError::Date(date_str.to_owned()))?;

        let distance_str = distance.trim().replace(',', ".");
        let value = distance_str
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite())
            .ok_or_else(|| TripInputError::Distance(distance.trim().to_owned()))?;

        if let Some((_, decimals)) = distance_str.split_once('.') {
            if decimals.len() > DISTANCE_DECIMALS {
                return Err(TripInputError::TooManyDecimals);
            }
        }

        if !(MIN_TRIP_DISTANCE..=MAX_TRIP_DISTANCE).contains(&value) {
            return Err(TripInputError::DistanceOutOfRange);
        }

        Ok(Self::new(date, value))
    }
}

/// Number of distinct dates across all trips.
pub fn distinct_days(trips: &[Trip]) -> usize {
    trips.iter().map(|trip| trip.date).collect::<HashSet<_>>().len()
}

pub fn total_distance(trips: &[Trip]) -> f64 {
    trips.iter().map(|trip| trip.distance).sum()
}

/// Decimal fields arrive either as JSON numbers or as strings like "12.50".
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

use std::collections::BTreeMap;

use crate::{
    config::FIRST_LOCAL_TRIP_ID,
    dashboard::Dashboard,
    error::{ActionError, StoreError},
    remote::Remote,
    scoreboard::Scoreboard,
    trip::{NewTrip, Trip, TripId},
};

/// Synchronous state transitions. Produced by actions and applied by whoever owns the [`Store`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddTrip(NewTrip),
    /// Optimistically removes the trip while the server request is in flight.
    /// Repeating it for a trip whose delete is still pending counts one more request.
    DeleteTrip(TripId),
    TripDeleted(TripId),
    TripDeleteFailed { trip_id: TripId, error: ActionError },

    LoadingScoreboard,
    ScoreboardLoaded(Scoreboard),
    ScoreboardFailed(ActionError),

    LoadingDashboard,
    DashboardLoaded(Dashboard),
    DashboardFailed(ActionError),

    LoggingIn,
    LoggedIn,
    LoginFailed(ActionError),
    LoggedOut,
}

// Kept so a failed delete can put the trip back where it was.
// `requests` counts delete requests still out for the trip.
#[derive(Debug, Clone, PartialEq)]
struct RemovedTrip {
    index: usize,
    trip: Trip,
    requests: usize,
}

/// View state of the dashboard and scoreboard pages.
///
/// The dashboard's `user_info` counters are kept in line with its trips by every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    dashboard: Remote<Dashboard>,
    scoreboard: Remote<Scoreboard>,
    login: Remote<()>,
    deletions: BTreeMap<TripId, Remote<()>>,
    removed: BTreeMap<TripId, RemovedTrip>,
    next_trip_id: TripId,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            dashboard: Remote::Idle,
            scoreboard: Remote::Idle,
            login: Remote::Idle,
            deletions: BTreeMap::new(),
            removed: BTreeMap::new(),
            next_trip_id: FIRST_LOCAL_TRIP_ID,
        }
    }
}

impl Store {
    pub fn dashboard(&self) -> &Remote<Dashboard> {
        &self.dashboard
    }

    pub fn scoreboard(&self) -> &Remote<Scoreboard> {
        &self.scoreboard
    }

    pub fn login(&self) -> &Remote<()> {
        &self.login
    }

    /// Status of the server side delete of a trip removed locally.
    pub fn deletion(&self, trip_id: TripId) -> Option<&Remote<()>> {
        self.deletions.get(&trip_id)
    }

    pub fn deletions(&self) -> impl Iterator<Item = (TripId, &Remote<()>)> {
        self.deletions.iter().map(|(id, status)| (*id, status))
    }

    pub fn next_trip_id(&self) -> TripId {
        self.next_trip_id
    }

    pub fn apply(&mut self, mutation: Mutation) -> Result<(), StoreError> {
        match mutation {
            Mutation::AddTrip(trip) => {
                self.add_trip(trip)?;
            }
            Mutation::DeleteTrip(trip_id) => {
                self.delete_trip(trip_id)?;
            }
            Mutation::TripDeleted(trip_id) => self.trip_deleted(trip_id),
            Mutation::TripDeleteFailed { trip_id, error } => {
                self.trip_delete_failed(trip_id, error)
            }

            Mutation::LoadingScoreboard => self.scoreboard = Remote::Loading,
            Mutation::ScoreboardLoaded(scoreboard) => {
                self.scoreboard = Remote::Loaded(scoreboard)
            }
            Mutation::ScoreboardFailed(error) => self.scoreboard = Remote::Failed(error),

            Mutation::LoadingDashboard => self.dashboard = Remote::Loading,
            Mutation::DashboardLoaded(dashboard) => self.dashboard_loaded(dashboard),
            Mutation::DashboardFailed(error) => self.dashboard = Remote::Failed(error),

            Mutation::LoggingIn => self.login = Remote::Loading,
            Mutation::LoggedIn => self.login = Remote::Loaded(()),
            Mutation::LoginFailed(error) => self.login = Remote::Failed(error),
            Mutation::LoggedOut => {
                self.login = Remote::Idle;
                self.dashboard = Remote::Idle;
                self.deletions.clear();
                self.removed.clear();
            }
        }

        Ok(())
    }

    /// Appends the trip under a fresh local id and returns the id.
    pub fn add_trip(&mut self, trip: NewTrip) -> Result<TripId, StoreError> {
        let dashboard = self.dashboard.data_mut().ok_or(StoreError::DashboardNotLoaded)?;

        let trip = Trip::new(self.next_trip_id, trip);
        self.next_trip_id = self.next_trip_id.saturating_add(1);

        let trip_id = trip.id;
        dashboard.trips.push(trip.clone());
        dashboard.user_info.record_added(&trip, &dashboard.trips);

        Ok(trip_id)
    }

    /// Removes the first trip with `trip_id` and marks its server delete as pending.
    ///
    /// A trip that is gone from the list but still pending only gets its request count bumped,
    /// and `UnknownTrip` is returned.
    pub fn delete_trip(&mut self, trip_id: TripId) -> Result<Trip, StoreError> {
        let dashboard = self.dashboard.data_mut().ok_or(StoreError::DashboardNotLoaded)?;

        let Some(index) = dashboard.trips.iter().position(|trip| trip.id == trip_id) else {
            if let Some(removed) = self.removed.get_mut(&trip_id) {
                removed.requests += 1;
            }
            return Err(StoreError::UnknownTrip(trip_id));
        };

        let trip = dashboard.trips.remove(index);
        dashboard.user_info.record_removed(&trip, &dashboard.trips);

        // A reload can bring back a trip whose first delete is still out
        let requests = self.removed.get(&trip_id).map_or(0, |removed| removed.requests) + 1;
        self.removed.insert(trip_id, RemovedTrip { index, trip: trip.clone(), requests });
        self.deletions.insert(trip_id, Remote::Loading);

        Ok(trip)
    }

    fn trip_deleted(&mut self, trip_id: TripId) {
        self.removed.remove(&trip_id);
        if let Some(status) = self.deletions.get_mut(&trip_id) {
            *status = Remote::Loaded(());
        }
    }

    /// Restores the trip once every request for it has failed.
    /// Failures after a delete went through are ignored.
    fn trip_delete_failed(&mut self, trip_id: TripId, error: ActionError) {
        let Some(removed) = self.removed.get_mut(&trip_id) else {
            return;
        };
        removed.requests = removed.requests.saturating_sub(1);
        if removed.requests > 0 {
            return;
        }

        if let (Some(RemovedTrip { index, trip, .. }), Some(dashboard)) =
            (self.removed.remove(&trip_id), self.dashboard.data_mut())
        {
            // A reload may already have brought it back
            if dashboard.trip(trip_id).is_none() {
                let index = index.min(dashboard.trips.len());
                dashboard.trips.insert(index, trip.clone());
                dashboard.user_info.record_added(&trip, &dashboard.trips);
            }
        }

        if let Some(status) = self.deletions.get_mut(&trip_id) {
            *status = Remote::Failed(error);
        }
    }

    fn dashboard_loaded(&mut self, dashboard: Dashboard) {
        if let Some(max_id) = dashboard.max_trip_id() {
            self.next_trip_id = self.next_trip_id.max(max_id.saturating_add(1));
        }

        // Settled deletes refer to the old trip list
        self.deletions.retain(|_, status| status.is_loading());
        let pending = &self.deletions;
        self.removed.retain(|trip_id, _| pending.contains_key(trip_id));

        self.dashboard = Remote::Loaded(dashboard);
    }
}

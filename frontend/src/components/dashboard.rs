use vcta_lib::{
    actions::Action,
    dashboard::Dashboard,
    trip::{NewTrip, TripId},
    Remote,
};
use yew::prelude::*;
use yew_router::components::Link;

use crate::{components::trip_form::TripForm, Route};

#[derive(PartialEq, Properties, Clone)]
pub struct DashboardProps {
    pub logged_in: bool,
    pub dashboard: Remote<Dashboard>,
    pub deletions: Vec<(TripId, Remote<()>)>,
    pub dispatch: Callback<Action>,
}

#[function_component]
pub fn DashboardPanel(props: &DashboardProps) -> Html {
    if !props.logged_in {
        return html! {
            <div class="panel component-container">
                <h1>{"Dashboard"}</h1>
                <label>{"Log in to see your trips"}</label>
                <Link<Route> to={Route::Login}>{"Log in"}</Link<Route>>
            </div>
        };
    }

    let dispatch = props.dispatch.clone();
    let on_refresh = Callback::from(move |_| {
        dispatch.emit(Action::GetDashboard);
    });

    let content = match &props.dashboard {
        Remote::Idle | Remote::Loading => html! { <label>{"Loading..."}</label> },
        Remote::Failed(err) => html! {
            <label class="error">{format!("Could not load dashboard: {err}")}</label>
        },
        Remote::Loaded(dashboard) => {
            let dispatch = props.dispatch.clone();
            let on_add =
                Callback::from(move |trip: NewTrip| dispatch.emit(Action::AddTrip(trip)));

            html! { <>
                <Stats dashboard={dashboard.clone()} />
                <TripForm on_add={on_add} />
                <ul class="trip-list">
                    { for dashboard.trips.iter().map(|trip| {
                        let dispatch = props.dispatch.clone();
                        let trip_id = trip.id;
                        let on_delete =
                            Callback::from(move |_| dispatch.emit(Action::DeleteTrip(trip_id)));
                        let date = trip.date.format("%d/%m/%Y");
                        html! {
                            <li key={trip_id}>
                                {format!("{date} - {:.2} km", trip.distance)}
                                <button onclick={on_delete}>{"Delete"}</button>
                            </li>
                        }
                    }) }
                </ul>
            </> }
        }
    };

    html! {
        <div class="panel component-container">
            <h1>{"Dashboard"}</h1>
            { content }
            <DeletionStatus deletions={props.deletions.clone()} />
            <div class="bottom-panel">
                <button onclick={on_refresh} disabled={props.dashboard.is_loading()}>
                    {"Refresh"}
                </button>
            </div>
        </div>
    }
}

#[derive(PartialEq, Properties, Clone)]
struct StatsProps {
    dashboard: Dashboard,
}

#[function_component]
fn Stats(props: &StatsProps) -> Html {
    let info = &props.dashboard.user_info;
    html! {
        <div class="stats">
            <label>{format!("Trips: {}", info.trip_count)}</label>
            <label>{format!("Total distance: {:.1} km", info.distance)}</label>
            <label>{format!("Days cycled: {}", info.days)}</label>
        </div>
    }
}

#[derive(PartialEq, Properties, Clone)]
struct DeletionStatusProps {
    deletions: Vec<(TripId, Remote<()>)>,
}

/// Deletes still in flight, and the ones the server refused.
#[function_component]
fn DeletionStatus(props: &DeletionStatusProps) -> Html {
    html! {
        <div class="deletions">
        { for props.deletions.iter().filter_map(|(trip_id, status)| match status {
            Remote::Loading => Some(html! {
                <label key={*trip_id}>{format!("Deleting trip {trip_id}...")}</label>
            }),
            Remote::Failed(err) => Some(html! {
                <label key={*trip_id} class="error">
                    {format!("Could not delete trip {trip_id}: {err}")}
                </label>
            }),
            Remote::Idle | Remote::Loaded(()) => None,
        }) }
        </div>
    }
}

use vcta_lib::trip::{NewTrip, TripInputError};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct TripFormProps {
    pub on_add: Callback<NewTrip>,
}

#[function_component]
pub fn TripForm(props: &TripFormProps) -> Html {
    let date = use_state(String::new);
    let distance = use_state(String::new);
    let input_error = use_state(|| None::<TripInputError>);

    let on_date_input = {
        let date = date.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            date.set(input.value());
        })
    };

    let on_distance_input = {
        let distance = distance.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            distance.set(input.value());
        })
    };

    let on_submit = {
        let date = date.clone();
        let distance = distance.clone();
        let input_error = input_error.clone();
        let on_add = props.on_add.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match NewTrip::parse(&date, &distance) {
                Ok(trip) => {
                    on_add.emit(trip);
                    distance.set(String::new());
                    input_error.set(None);
                }
                Err(err) => input_error.set(Some(err)),
            }
        })
    };

    html! {
        <form class="trip-form" onsubmit={on_submit}>
            <input type="date" value={(*date).clone()} oninput={on_date_input} />
            <input
                type="text"
                placeholder="Distance (km)"
                value={(*distance).clone()}
                oninput={on_distance_input}
            />
            <button type="submit">{"Add trip"}</button>
            if let Some(err) = &*input_error {
                <label class="error">{err.to_string()}</label>
            }
        </form>
    }
}

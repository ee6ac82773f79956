use vcta_lib::{actions::Action, auth::Credentials, Remote};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;

use crate::Route;

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    pub logged_in: bool,
    pub status: Remote<()>,
    pub dispatch: Callback<Action>,
}

#[function_component]
pub fn LoginPanel(props: &LoginProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let navigator = use_navigator();

    // Off to the dashboard once the token is in
    use_effect_with(props.status.clone(), move |status| {
        if status.is_loaded() {
            if let Some(navigator) = navigator {
                navigator.push(&Route::Dashboard);
            }
        }
        || ()
    });

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_login = {
        let username = username.clone();
        let password = password.clone();
        let dispatch = props.dispatch.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if username.is_empty() || password.is_empty() {
                return;
            }
            dispatch.emit(Action::GetAuthToken(Credentials::new(&*username, &*password)));
            password.set(String::new());
        })
    };

    html! {
        <div class="panel component-container">
            <h1>{ "Log in" }</h1>
            if props.logged_in {
                <label>{ "You are logged in" }</label>
            }
            <form class="login" onsubmit={on_login}>
                <input
                    type="text"
                    placeholder="Username"
                    value={(*username).clone()}
                    oninput={on_username_input}
                />
                <input
                    type="password"
                    placeholder="Password"
                    value={(*password).clone()}
                    oninput={on_password_input}
                />
                <button type="submit" disabled={props.status.is_loading()}>{ "Log in" }</button>
            </form>
            if let Remote::Failed(err) = &props.status {
                <label class="error">{ format!("Login failed: {err}") }</label>
            }
        </div>
    }
}

use std::rc::Rc;

use crate::components::{dashboard::DashboardPanel, login::LoginPanel, scoreboard::ScoreboardPanel};
use api::HttpApi;
use gloo_console::{error, info, warn};
use storage::LocalStorageTokens;
use vcta_lib::{
    actions::{self, Action},
    auth::TokenStore,
    config::ApiConfig,
    Mutation, Store,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::{components::Link, BrowserRouter, Routable, Switch};

mod api;
mod components;
mod storage;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/scoreboard")]
    Scoreboard,
    #[at("/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

enum MainMsg {
    Dispatch(Action),
    Commit(Mutation),
}

/// Owns the store. Actions run on the browser's executor and commit back through `MainMsg::Commit`.
struct Model {
    store: Store,
    api: Rc<HttpApi>,
    tokens: LocalStorageTokens,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let tokens = LocalStorageTokens;
        let config = ApiConfig::from_build_env();
        info!(format!("Using api at {}", config.base_url));

        let link = ctx.link();
        link.send_message(MainMsg::Dispatch(Action::GetScoreboard));
        if tokens.is_logged_in() {
            link.send_message(MainMsg::Dispatch(Action::GetDashboard));
        }

        Self {
            store: Store::default(),
            api: Rc::new(HttpApi::new(config, tokens)),
            tokens,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::Dispatch(action) => {
                info!(format!("Dispatch: {:?}", action));
                let api = self.api.clone();
                let tokens = self.tokens;
                let commit = ctx.link().callback(MainMsg::Commit);
                spawn_local(async move {
                    let commit = move |mutation| commit.emit(mutation);
                    if let Err(err) = actions::dispatch(&*api, &tokens, action, commit).await {
                        error!(format!("{err}"));
                    }
                });
                false
            }
            MainMsg::Commit(mutation) => {
                let logged_in = matches!(mutation, Mutation::LoggedIn);
                if let Err(err) = self.store.apply(mutation) {
                    warn!(format!("Mutation rejected: {err}"));
                }
                if logged_in {
                    ctx.link().send_message(MainMsg::Dispatch(Action::GetDashboard));
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let dispatch = ctx.link().callback(MainMsg::Dispatch);
        let logged_in = self.tokens.is_logged_in();
        let store = self.store.clone();
        let deletions = store
            .deletions()
            .map(|(id, status)| (id, status.clone()))
            .collect::<Vec<_>>();

        html! {
            <BrowserRouter>
                <NavBar logged_in={logged_in} dispatch={dispatch.clone()} />
                <Switch<Route> render={move |route| match route {
                    Route::Dashboard => html! {
                        <DashboardPanel
                            logged_in={logged_in}
                            dashboard={store.dashboard().clone()}
                            deletions={deletions.clone()}
                            dispatch={dispatch.clone()}
                        />
                    },
                    Route::Scoreboard => html! {
                        <ScoreboardPanel
                            scoreboard={store.scoreboard().clone()}
                            dispatch={dispatch.clone()}
                        />
                    },
                    Route::Login => html! {
                        <LoginPanel
                            logged_in={logged_in}
                            status={store.login().clone()}
                            dispatch={dispatch.clone()}
                        />
                    },
                    Route::NotFound => html! {
                        <div class="panel component-container">
                            <h1>{"Page not found"}</h1>
                        </div>
                    },
                }} />
            </BrowserRouter>
        }
    }
}

#[derive(PartialEq, Properties, Clone)]
struct NavBarProps {
    logged_in: bool,
    dispatch: Callback<Action>,
}

#[function_component]
fn NavBar(props: &NavBarProps) -> Html {
    let dispatch = props.dispatch.clone();
    let on_logout = Callback::from(move |_| {
        dispatch.emit(Action::Logout);
    });

    html! {
        <nav class="nav-bar">
            <Link<Route> to={Route::Dashboard}>{"Dashboard"}</Link<Route>>
            <Link<Route> to={Route::Scoreboard}>{"Scoreboard"}</Link<Route>>
            if props.logged_in {
                <button onclick={on_logout}>{"Log out"}</button>
            } else {
                <Link<Route> to={Route::Login}>{"Log in"}</Link<Route>>
            }
        </nav>
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}

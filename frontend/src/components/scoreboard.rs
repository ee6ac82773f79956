use serde_json::Value;
use vcta_lib::{actions::Action, scoreboard::{Record, Scoreboard}, Remote};
use yew::prelude::*;

pub enum Msg {
    Refresh,
}

pub struct ScoreboardPanel;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub scoreboard: Remote<Scoreboard>,
    pub dispatch: Callback<Action>,
}

impl Component for ScoreboardPanel {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        ScoreboardPanel
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Refresh => ctx.props().dispatch.emit(Action::GetScoreboard),
        }
        false
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_refresh = ctx.link().callback(|_| Msg::Refresh);

        let content = match &props.scoreboard {
            Remote::Idle | Remote::Loading => html! { <label>{"Loading..."}</label> },
            Remote::Failed(err) => html! {
                <label class="error">{format!("Could not load scoreboard: {err}")}</label>
            },
            Remote::Loaded(scoreboard) => html! { <>
                <h2>{"Individuals"}</h2>
                { records_table(&scoreboard.individuals) }
                <h2>{"Teams"}</h2>
                { records_table(&scoreboard.teams) }
            </> },
        };

        html! {
            <div class="panel component-container">
                <h1>{"Scoreboard"}</h1>
                { content }
                <div class="bottom-panel">
                    <button onclick={on_refresh} disabled={props.scoreboard.is_loading()}>
                        {"Refresh"}
                    </button>
                </div>
            </div>
        }
    }
}

/// Columns are the keys of the first row.
fn records_table(records: &[Record]) -> Html {
    let Some(first) = records.first() else {
        return html! { <label>{"Nobody here yet"}</label> };
    };
    let columns: Vec<String> = first.keys().cloned().collect();

    html! {
        <table class="scoreboard">
            <tr>
                { for columns.iter().map(|column| html! { <th>{column.clone()}</th> }) }
            </tr>
            { for records.iter().map(|record| html! {
                <tr>
                    { for columns.iter().map(|column| html! {
                        <td>{record.get(column).map(cell_text).unwrap_or_default()}</td>
                    }) }
                </tr>
            }) }
        </table>
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

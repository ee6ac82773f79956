use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A ranking row. The client only displays these, so they are kept as sent.
pub type Record = Map<String, Value>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Scoreboard {
    #[serde(default)]
    pub individuals: Vec<Record>,
    #[serde(default)]
    pub teams: Vec<Record>,
}

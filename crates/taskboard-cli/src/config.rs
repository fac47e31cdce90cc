use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer};
use taskboard_core::repository::CategoryDeletePolicy;
use taskboard_core::state::TaskView;

pub const CONFIG_FILE: &str = "taskboard.toml";
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Which record store backs the board.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Sqlite,
    /// Process-local store; nothing survives the run.
    Memory,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database_path: String,
    pub store: StoreKind,
    /// Artificial delay added to every memory-store call
    pub latency_ms: u64,
    #[serde(deserialize_with = "deserialize_view")]
    pub default_view: TaskView,
    pub category_delete: CategoryDeletePolicy,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "taskboard.db".to_string(),
            store: StoreKind::Sqlite,
            latency_ms: 0,
            default_view: TaskView::All,
            category_delete: CategoryDeletePolicy::Block,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }
}

// Environment values like TASKBOARD_DEFAULT_VIEW=3 arrive as integers.
fn deserialize_view<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaskView, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawView {
        Category(i64),
        Name(String),
    }

    match RawView::deserialize(deserializer)? {
        RawView::Category(id) => Ok(TaskView::Category(id)),
        RawView::Name(name) => name.parse().map_err(serde::de::Error::custom),
    }
}

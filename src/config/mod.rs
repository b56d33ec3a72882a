mod basic;
mod providers;

pub use basic::BasicConfig;
pub use providers::{GroqConfig, GroqResolvedConfig, ProviderDefaults, ProvidersConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Completion provider settings (see `providers` table in config.toml).
    #[serde(default)]
    pub providers: ProvidersConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "RESTOCK_";

impl Config {
    /// Builds a Figment that merges, in increasing precedence: defaults, `config.toml` (if
    /// present), `RESTOCK_*` environment variables (nested with `__`), and `GROQ_API_KEY`.
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&["GROQ_API_KEY"])
                    .map(|_| "providers.groq.api_key".into()),
            )
    }

    /// Loads configuration from every source and panics on malformed values.
    ///
    /// A missing Groq key is not an error here: the store-backed actions keep working and
    /// `chatWithGroq` fails per request instead.
    pub fn load() -> Self {
        Self::figment()
            .extract()
            .unwrap_or_else(|err| panic!("failed to extract configuration: {err}"))
    }

    pub fn groq(&self) -> GroqResolvedConfig {
        self.providers.groq.resolve(&self.providers.defaults)
    }
}

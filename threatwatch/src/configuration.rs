use config::{Config, Environment};
use domain_feed::kev_sources::cisa;
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct FeedSettings {
    pub url: String,
}

impl FeedSettings {
    pub fn try_from_env() -> Result<Self, config::ConfigError> {
        Config::builder()
            .set_default("url", cisa::CATALOG_URL)?
            .add_source(Environment::with_prefix("THREATWATCH").prefix_separator("_"))
            .build()?
            .try_deserialize::<Self>()
    }
}

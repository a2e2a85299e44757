use std::sync::Arc;

use serenity::prelude::TypeMapKey;

use crate::config::Config;
use crate::services::price_service::PriceFetcher;
use crate::services::subscription_service::SubscriberRegistry;

/// Process-wide state shared by command handlers and the scheduler
pub struct AppContext {
    pub config: Config,
    pub registry: SubscriberRegistry,
    pub fetcher: Arc<dyn PriceFetcher>,
}

impl AppContext {
    pub fn new(config: Config, fetcher: Arc<dyn PriceFetcher>) -> Self {
        Self {
            config,
            registry: SubscriberRegistry::new(),
            fetcher,
        }
    }
}

/// Key for the shared [`AppContext`] in serenity's client data
pub struct AppState;

impl TypeMapKey for AppState {
    type Value = Arc<AppContext>;
}

#[cfg(test)]
pub mod testing {
    use super::*;

    pub fn test_config() -> Config {
        Config::from_lookup(|key| match key {
            "DISCORD_TOKEN" => Some("token".to_string()),
            "ALPHA_VANTAGE_API_KEY" => Some("key".to_string()),
            _ => None,
        })
        .unwrap()
    }

    pub fn app_with<F: PriceFetcher + 'static>(fetcher: F) -> AppContext {
        app_with_shared(Arc::new(fetcher))
    }

    pub fn app_with_shared(fetcher: Arc<dyn PriceFetcher>) -> AppContext {
        AppContext::new(test_config(), fetcher)
    }
}

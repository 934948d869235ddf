mod character_store;
mod config;
mod extension;
mod web;
mod web_metrics;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::character_store::{CharacterStoreHandle, JsonFile};
use crate::config::Config;
use crate::web::WebState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let config = Config::from_env()?;
    info!("starting with {config:?}");
    let store = CharacterStoreHandle::new(Arc::new(JsonFile::new(&config.data_path)));
    if !config.lazy_load {
        // fail fast on a bad data file instead of on the first query
        store.get().await?;
    }
    if let Some(metrics_addr) = config.metrics_addr {
        tokio::spawn(web_metrics::start_metrics_server(metrics_addr));
    }
    web::start_web(WebState::new(store), config.listen_addr).await
}

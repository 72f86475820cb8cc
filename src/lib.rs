pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;

use crate::services::search_service::HeadHunterClient;
use crate::services::storage_service::JsonStore;

pub struct AppState {
    pub search: HeadHunterClient,
    pub store: JsonStore,
}

impl AppState {
    pub fn new() -> crate::error::Result<Self> {
        let config = crate::config::get_config();
        let search = HeadHunterClient::new(config)?;
        let store = JsonStore::new(&config.storage_path)?;

        Ok(Self { search, store })
    }
}

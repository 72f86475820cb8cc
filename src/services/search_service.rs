use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::dto::search_dto::{RawVacancy, SearchResponse};
use crate::error::{Error, Result};

#[cfg_attr(test, mockall::automock)]
pub trait VacancySource {
    fn connect(&mut self) -> Result<()>;
    fn search(&self, query: &str) -> Vec<RawVacancy>;
}

pub struct HeadHunterClient {
    http: Client,
    base_url: Url,
    per_page: u32,
    connected: bool,
}

impl HeadHunterClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .build()?;
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| Error::Config(format!("Invalid HH_API_BASE_URL: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            per_page: config.per_page,
            connected: false,
        })
    }

    fn vacancies_url(&self) -> Result<Url> {
        self.base_url
            .join("vacancies")
            .map_err(|e| Error::Config(format!("Invalid HH_API_BASE_URL: {}", e)))
    }
}

impl VacancySource for HeadHunterClient {
    fn connect(&mut self) -> Result<()> {
        let url = self.vacancies_url()?;
        let response = self
            .http
            .get(url)
            .query(&[("text", "test"), ("per_page", "1")])
            .send()?;
        response.error_for_status()?;

        self.connected = true;
        info!(base_url = %self.base_url, "connected to vacancy API");
        Ok(())
    }

    fn search(&self, query: &str) -> Vec<RawVacancy> {
        if !self.connected {
            warn!("vacancy API connection not established, returning no results");
            return Vec::new();
        }
        let url = match self.vacancies_url() {
            Ok(url) => url,
            Err(error) => {
                warn!(%error, "could not build search URL");
                return Vec::new();
            }
        };

        let params = [
            ("text", query.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        let response = self
            .http
            .get(url)
            .query(&params)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json::<SearchResponse>());

        match response {
            Ok(body) => {
                info!(
                    query,
                    count = body.items.len(),
                    found = body.found,
                    "vacancy search completed"
                );
                body.items
            }
            Err(error) => {
                warn!(query, %error, "vacancy search failed, returning no results");
                Vec::new()
            }
        }
    }
}

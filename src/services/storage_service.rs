use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::vacancy::{SalaryRange, Vacancy, VacancyRecord};

pub trait VacancyStore {
    fn add(&self, vacancy: &Vacancy) -> Result<()>;
    fn query(
        &self,
        keywords: Option<&[String]>,
        salary_range: Option<&str>,
    ) -> Result<Vec<Vacancy>>;
    fn delete(&self, vacancy: &Vacancy) -> Result<()>;
}

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            fs::write(&path, "[]")?;
        }
        Ok(Self { path })
    }

    // Unreadable or malformed content degrades to an empty collection; the
    // next successful write restores a valid file.
    fn load(&self) -> Vec<VacancyRecord> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "storage file unreadable, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "storage file malformed, treating as empty");
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[VacancyRecord]) -> Result<()> {
        let contents = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl VacancyStore for JsonStore {
    fn add(&self, vacancy: &Vacancy) -> Result<()> {
        let mut records = self.load();
        let record = VacancyRecord::from(vacancy);
        if records.contains(&record) {
            debug!(link = vacancy.link(), "identical vacancy already stored");
            return Ok(());
        }
        records.push(record);
        self.save(&records)
    }

    fn query(
        &self,
        keywords: Option<&[String]>,
        salary_range: Option<&str>,
    ) -> Result<Vec<Vacancy>> {
        let range: Option<SalaryRange> = salary_range.map(|raw| raw.parse()).transpose()?;

        let mut vacancies = Vec::new();
        for record in self.load() {
            if let Some(words) = keywords {
                let haystack =
                    format!("{} {}", record.title, record.description).to_lowercase();
                if !words.is_empty()
                    && !words
                        .iter()
                        .any(|word| haystack.contains(&word.to_lowercase()))
                {
                    continue;
                }
            }
            if let Some(range) = range {
                if !range.contains(record.salary) {
                    continue;
                }
            }
            match Vacancy::try_from(record) {
                Ok(vacancy) => vacancies.push(vacancy),
                Err(error) => warn!(%error, "skipping stored record that no longer validates"),
            }
        }
        Ok(vacancies)
    }

    fn delete(&self, vacancy: &Vacancy) -> Result<()> {
        let mut records = self.load();
        let before = records.len();
        records.retain(|record| record.link != vacancy.link());
        if records.len() == before {
            return Ok(());
        }
        self.save(&records)
    }
}

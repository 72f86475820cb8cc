use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::dto::search_dto::RawSalary;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VacancyDraft {
    #[validate(length(min = 1, message = "vacancy title must not be empty"))]
    pub title: String,
    #[validate(custom(function = validate_link))]
    pub link: String,
    pub salary: Option<RawSalary>,
    #[serde(default)]
    pub description: String,
}

fn validate_link(link: &str) -> Result<(), ValidationError> {
    if link.starts_with("http") {
        return Ok(());
    }
    let mut error = ValidationError::new("link_scheme");
    error.message = Some("link must start with http:// or https://".into());
    Err(error)
}

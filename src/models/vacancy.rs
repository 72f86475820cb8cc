use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use crate::dto::search_dto::{RawSalary, RawVacancy};
use crate::dto::vacancy_dto::VacancyDraft;
use crate::error::{Error, Result};

pub const NO_DESCRIPTION: &str = "No description available";

const FROM_KEYWORD: &str = "от";
const UPTO_KEYWORD: &str = "до";

#[derive(Debug, Clone, PartialEq)]
pub struct Vacancy {
    title: String,
    link: String,
    salary: f64,
    description: String,
}

impl Vacancy {
    pub fn new(draft: VacancyDraft) -> Result<Self> {
        draft.validate()?;
        let salary = parse_salary(draft.salary.as_ref());
        Ok(Self {
            title: draft.title,
            link: draft.link,
            salary,
            description: draft.description,
        })
    }

    pub fn from_raw_records(records: Vec<RawVacancy>) -> Vec<Vacancy> {
        let mut vacancies = Vec::with_capacity(records.len());
        for record in records {
            let (Some(title), Some(link)) = (record.name, record.alternate_url) else {
                continue;
            };
            let snippet = record.snippet.unwrap_or_default();
            let description = snippet
                .requirement
                .filter(|text| !text.is_empty())
                .or_else(|| snippet.responsibility.filter(|text| !text.is_empty()))
                .unwrap_or_else(|| NO_DESCRIPTION.to_string());

            let draft = VacancyDraft {
                title,
                link,
                salary: record.salary,
                description,
            };
            match Vacancy::new(draft) {
                Ok(vacancy) => vacancies.push(vacancy),
                Err(error) => warn!(%error, "skipping malformed vacancy record"),
            }
        }
        vacancies
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

pub fn parse_salary(input: Option<&RawSalary>) -> f64 {
    let parsed = match input {
        None => 0.0,
        Some(RawSalary::Bounds { from, to, .. }) => (*from).or(*to).unwrap_or(0.0),
        Some(RawSalary::Text(text)) => parse_salary_text(text),
    };
    parsed.max(0.0)
}

fn parse_salary_text(text: &str) -> f64 {
    let cleaned = text.replace('\u{a0}', "");
    let cleaned = cleaned.trim();
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    if tokens.contains(&FROM_KEYWORD) {
        return tokens
            .iter()
            .find(|token| **token != FROM_KEYWORD)
            .and_then(|token| token.parse().ok())
            .unwrap_or(0.0);
    }
    // an upper bound alone is useless for minimum-based filtering
    if tokens.contains(&UPTO_KEYWORD) {
        return 0.0;
    }
    if let Some((lower, _)) = cleaned.split_once('-') {
        return lower
            .split_whitespace()
            .next()
            .and_then(|token| token.parse().ok())
            .unwrap_or(0.0);
    }
    cleaned
        .split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyRecord {
    pub title: String,
    pub link: String,
    pub salary: f64,
    pub description: String,
}

impl From<&Vacancy> for VacancyRecord {
    fn from(vacancy: &Vacancy) -> Self {
        Self {
            title: vacancy.title.clone(),
            link: vacancy.link.clone(),
            salary: vacancy.salary,
            description: vacancy.description.clone(),
        }
    }
}

impl TryFrom<VacancyRecord> for Vacancy {
    type Error = Error;

    // Salary in a record is already normalized, only title/link need re-checking.
    fn try_from(record: VacancyRecord) -> Result<Self> {
        let draft = VacancyDraft {
            title: record.title,
            link: record.link,
            salary: None,
            description: record.description,
        };
        draft.validate()?;
        Ok(Self {
            title: draft.title,
            link: draft.link,
            salary: record.salary.max(0.0),
            description: draft.description,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryRange {
    min: f64,
    max: f64,
}

impl SalaryRange {
    pub fn contains(&self, salary: f64) -> bool {
        self.min <= salary && salary <= self.max
    }
}

impl FromStr for SalaryRange {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let (min, max) = raw
            .trim()
            .split_once('-')
            .ok_or_else(|| Error::InvalidRange(raw.to_string()))?;
        let min = min
            .trim()
            .parse()
            .map_err(|_| Error::InvalidRange(raw.to_string()))?;
        let max = max
            .trim()
            .parse()
            .map_err(|_| Error::InvalidRange(raw.to_string()))?;
        Ok(Self { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::search_dto::Snippet;

    fn draft(title: &str, link: &str, salary: Option<RawSalary>, description: &str) -> VacancyDraft {
        VacancyDraft {
            title: title.to_string(),
            link: link.to_string(),
            salary,
            description: description.to_string(),
        }
    }

    #[test]
    fn construction_succeeds_for_valid_title_and_link() {
        let vacancy = Vacancy::new(draft(
            "Rust Developer",
            "https://example.com/vacancy/1",
            Some(RawSalary::Text("100000".to_string())),
            "Требования: опыт работы от 3 лет",
        ))
        .expect("valid vacancy");

        assert_eq!(vacancy.title(), "Rust Developer");
        assert_eq!(vacancy.link(), "https://example.com/vacancy/1");
        assert_eq!(vacancy.salary(), 100000.0);
        assert_eq!(vacancy.description(), "Требования: опыт работы от 3 лет");
    }

    #[test]
    fn construction_fails_on_empty_title() {
        let result = Vacancy::new(draft("", "https://example.com", None, ""));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn construction_fails_on_link_without_http_prefix() {
        let result = Vacancy::new(draft("Developer", "ftp://example.com", None, ""));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn salary_never_fails_construction() {
        let vacancy = Vacancy::new(draft(
            "Developer",
            "https://example.com",
            Some(RawSalary::Text("по договорённости".to_string())),
            "",
        ))
        .expect("unparseable salary normalizes to zero");
        assert_eq!(vacancy.salary(), 0.0);
    }

    #[test]
    fn structured_salary_prefers_from_over_to() {
        let salary = RawSalary::Bounds {
            from: Some(100000.0),
            to: Some(150000.0),
            currency: Some("RUR".to_string()),
        };
        assert_eq!(parse_salary(Some(&salary)), 100000.0);
    }

    #[test]
    fn structured_salary_falls_back_to_upper_bound() {
        let salary = RawSalary::Bounds {
            from: None,
            to: Some(150000.0),
            currency: None,
        };
        assert_eq!(parse_salary(Some(&salary)), 150000.0);
    }

    #[test]
    fn structured_salary_with_no_bounds_is_zero() {
        let salary = RawSalary::Bounds {
            from: None,
            to: None,
            currency: Some("RUR".to_string()),
        };
        assert_eq!(parse_salary(Some(&salary)), 0.0);
    }

    #[test]
    fn text_salary_with_from_keyword_takes_following_number() {
        let salary = RawSalary::Text("от 100000 руб.".to_string());
        assert_eq!(parse_salary(Some(&salary)), 100000.0);
    }

    #[test]
    fn text_salary_with_upto_keyword_is_zero() {
        let salary = RawSalary::Text("до 150000".to_string());
        assert_eq!(parse_salary(Some(&salary)), 0.0);
    }

    #[test]
    fn text_salary_range_takes_lower_bound() {
        let salary = RawSalary::Text("100000-150000 руб.".to_string());
        assert_eq!(parse_salary(Some(&salary)), 100000.0);
    }

    #[test]
    fn text_salary_plain_number_with_currency_suffix() {
        let salary = RawSalary::Text("120000 руб.".to_string());
        assert_eq!(parse_salary(Some(&salary)), 120000.0);
    }

    #[test]
    fn text_salary_collapses_non_breaking_spaces() {
        let salary = RawSalary::Text("100\u{a0}000".to_string());
        assert_eq!(parse_salary(Some(&salary)), 100000.0);
    }

    #[test]
    fn absent_and_empty_salaries_are_zero() {
        assert_eq!(parse_salary(None), 0.0);
        let empty = RawSalary::Text(String::new());
        assert_eq!(parse_salary(Some(&empty)), 0.0);
    }

    fn raw(
        name: Option<&str>,
        link: Option<&str>,
        salary: Option<RawSalary>,
        requirement: Option<&str>,
        responsibility: Option<&str>,
    ) -> RawVacancy {
        RawVacancy {
            name: name.map(str::to_string),
            alternate_url: link.map(str::to_string),
            salary,
            snippet: Some(Snippet {
                requirement: requirement.map(str::to_string),
                responsibility: responsibility.map(str::to_string),
            }),
        }
    }

    #[test]
    fn batch_ingestion_skips_records_without_name() {
        let records = vec![raw(None, Some("https://example.com"), None, None, None)];
        assert!(Vacancy::from_raw_records(records).is_empty());
    }

    #[test]
    fn batch_ingestion_skips_records_without_link() {
        let records = vec![raw(Some("Developer"), None, None, None, None)];
        assert!(Vacancy::from_raw_records(records).is_empty());
    }

    #[test]
    fn batch_ingestion_keeps_upper_bound_only_mapping() {
        let salary = RawSalary::Bounds {
            from: None,
            to: Some(90000.0),
            currency: None,
        };
        let records = vec![raw(
            Some("Developer"),
            Some("https://example.com"),
            Some(salary),
            Some("Знание Rust"),
            None,
        )];
        let vacancies = Vacancy::from_raw_records(records);
        assert_eq!(vacancies.len(), 1);
        assert_eq!(vacancies[0].salary(), 90000.0);
    }

    #[test]
    fn batch_ingestion_survives_a_malformed_link() {
        let records = vec![
            raw(Some("Bad"), Some("example.com"), None, None, None),
            raw(Some("Good"), Some("https://example.com"), None, None, None),
        ];
        let vacancies = Vacancy::from_raw_records(records);
        assert_eq!(vacancies.len(), 1);
        assert_eq!(vacancies[0].title(), "Good");
    }

    #[test]
    fn batch_ingestion_description_falls_back_to_responsibility_then_placeholder() {
        let records = vec![
            raw(
                Some("A"),
                Some("https://example.com/a"),
                None,
                Some(""),
                Some("Писать сервисы"),
            ),
            raw(Some("B"), Some("https://example.com/b"), None, None, None),
        ];
        let vacancies = Vacancy::from_raw_records(records);
        assert_eq!(vacancies[0].description(), "Писать сервисы");
        assert_eq!(vacancies[1].description(), NO_DESCRIPTION);
    }

    #[test]
    fn batch_ingestion_preserves_input_order() {
        let records = vec![
            raw(Some("First"), Some("https://example.com/1"), None, None, None),
            raw(Some("Second"), Some("https://example.com/2"), None, None, None),
        ];
        let titles: Vec<String> = Vacancy::from_raw_records(records)
            .iter()
            .map(|vacancy| vacancy.title().to_string())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn record_round_trip_preserves_fields() {
        let vacancy = Vacancy::new(draft(
            "Developer",
            "https://example.com",
            Some(RawSalary::Text("100000".to_string())),
            "Описание",
        ))
        .expect("valid vacancy");

        let record = VacancyRecord::from(&vacancy);
        let restored = Vacancy::try_from(record).expect("record still validates");
        assert_eq!(restored, vacancy);
    }

    #[test]
    fn record_with_invalid_link_does_not_convert_back() {
        let record = VacancyRecord {
            title: "Developer".to_string(),
            link: "not-a-link".to_string(),
            salary: 100000.0,
            description: String::new(),
        };
        assert!(Vacancy::try_from(record).is_err());
    }

    #[test]
    fn salary_range_bounds_are_inclusive() {
        let range: SalaryRange = "100000-150000".parse().expect("well-formed range");
        assert!(range.contains(100000.0));
        assert!(range.contains(150000.0));
        assert!(!range.contains(99999.0));
        assert!(!range.contains(150001.0));
    }

    #[test]
    fn malformed_salary_range_is_rejected() {
        assert!("cheap".parse::<SalaryRange>().is_err());
        assert!("100000".parse::<SalaryRange>().is_err());
        assert!("100000-expensive".parse::<SalaryRange>().is_err());
    }
}

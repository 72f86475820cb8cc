use crate::error::Result;
use crate::models::vacancy::{SalaryRange, Vacancy};

pub fn filter_by_keywords(vacancies: &[Vacancy], keywords: &[String]) -> Vec<Vacancy> {
    if keywords.is_empty() {
        return vacancies.to_vec();
    }
    vacancies
        .iter()
        .filter(|vacancy| {
            let haystack =
                format!("{} {}", vacancy.title(), vacancy.description()).to_lowercase();
            keywords
                .iter()
                .any(|word| haystack.contains(&word.to_lowercase()))
        })
        .cloned()
        .collect()
}

pub fn filter_by_salary_range(vacancies: &[Vacancy], range: &str) -> Result<Vec<Vacancy>> {
    if range.trim().is_empty() {
        return Ok(vacancies.to_vec());
    }
    let range: SalaryRange = range.parse()?;
    Ok(vacancies
        .iter()
        .filter(|vacancy| range.contains(vacancy.salary()))
        .cloned()
        .collect())
}

pub fn sort_by_salary(mut vacancies: Vec<Vacancy>) -> Vec<Vacancy> {
    vacancies.sort_by(|a, b| b.salary().total_cmp(&a.salary()));
    vacancies
}

pub fn top_n(vacancies: Vec<Vacancy>, count: usize) -> Vec<Vacancy> {
    vacancies.into_iter().take(count).collect()
}

use std::io::{self, Write};

use tracing::{info, warn};
use vacancy_finder::config::{get_config, init_config};
use vacancy_finder::models::vacancy::Vacancy;
use vacancy_finder::services::ranking_service::{
    filter_by_keywords, filter_by_salary_range, sort_by_salary, top_n,
};
use vacancy_finder::services::search_service::VacancySource;
use vacancy_finder::services::storage_service::VacancyStore;
use vacancy_finder::AppState;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();
    info!(storage = %config.storage_path, "starting vacancy search");

    let mut app = AppState::new()?;
    if let Err(error) = app.search.connect() {
        warn!(%error, "vacancy API is unreachable, search will return nothing");
    }

    let query = prompt("Search query: ")?;
    let raw_records = app.search.search(query.trim());
    let vacancies = Vacancy::from_raw_records(raw_records);
    for vacancy in &vacancies {
        app.store.add(vacancy)?;
    }
    info!(count = vacancies.len(), "normalized and persisted vacancies");

    let top: usize = prompt("How many vacancies to show: ")?
        .trim()
        .parse()
        .unwrap_or(10);
    let keywords: Vec<String> = prompt("Filter keywords (space separated, empty to skip): ")?
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let range = prompt("Salary range, e.g. 100000-150000 (empty to skip): ")?;

    let filtered = filter_by_keywords(&vacancies, &keywords);
    let ranged = filter_by_salary_range(&filtered, range.trim())?;
    let ranked = top_n(sort_by_salary(ranged), top);
    print_vacancies(&ranked);

    Ok(())
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn print_vacancies(vacancies: &[Vacancy]) {
    if vacancies.is_empty() {
        println!("No vacancies matched your request.");
        return;
    }
    for (index, vacancy) in vacancies.iter().enumerate() {
        println!("{}. {}", index + 1, vacancy.title());
        println!("Link: {}", vacancy.link());
        if vacancy.salary() > 0.0 {
            println!("Salary: {}", vacancy.salary());
        } else {
            println!("Salary: not specified");
        }
        println!("Description: {}\n", preview(vacancy.description()));
    }
}

fn preview(text: &str) -> String {
    // char-based so Cyrillic descriptions are never split mid-character
    let short: String = text.chars().take(100).collect();
    if text.chars().count() > 100 {
        format!("{}...", short)
    } else {
        short
    }
}

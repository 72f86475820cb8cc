use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<RawVacancy>,
    pub found: Option<u64>,
    pub pages: Option<u32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVacancy {
    pub name: Option<String>,
    pub alternate_url: Option<String>,
    pub salary: Option<RawSalary>,
    pub snippet: Option<Snippet>,
}

// Upstream sends salary either as free text or as a structured from/to pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSalary {
    Text(String),
    Bounds {
        from: Option<f64>,
        to: Option<f64>,
        currency: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snippet {
    pub requirement: Option<String>,
    pub responsibility: Option<String>,
}

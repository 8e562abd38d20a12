use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("a section tracker needs at least one section")]
    NoSections,
    #[error("invalid site config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("element not found: {0}")]
    MissingElement(String),
}

pub type Result<T, E = SiteError> = std::result::Result<T, E>;

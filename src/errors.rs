use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("TLE was malformed: {0}")]
    Format(String),
    #[error("could not parse {field} from {raw:?}")]
    Parse { field: &'static str, raw: String },
    #[error("orbital elements out of range: {0}")]
    Domain(String),
    #[error("Kepler's equation did not converge after {iterations} iterations (last step {residual:e})")]
    Convergence { iterations: u32, residual: f64 },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl ConversionError {
    pub(crate) fn parse(field: &'static str, raw: &str) -> Self {
        ConversionError::Parse {
            field,
            raw: raw.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sheet '{sheet}' returned status {status}")]
    Status { sheet: String, status: u16 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row} of sheet '{sheet}' has {found} column(s), expected {expected}")]
    MalformedRow {
        sheet: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LoaderError>;

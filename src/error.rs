use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArusError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Import finished with {0} row error(s)")]
    PartialImport(usize),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ArusError>;

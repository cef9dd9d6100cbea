use thiserror::Error;

pub type MapCsvResult<T> = Result<T, MapCsvError>;

#[derive(Error, Debug)]
pub enum MapCsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing header: input ended before a header row was read")]
    MissingHeader,

    #[error("Short row at line {line}: field '{field}' maps to column {column}, row has {len} columns")]
    ShortRow {
        field: String,
        column: usize,
        len: usize,
        line: u64,
    },

    #[error("\"{field}\" is not a valid field name. Valid field names are [{}]", valid.join(", "))]
    UnknownField { field: String, valid: Vec<String> },
}

impl MapCsvError {
    /// True for failures to obtain a row from the input.
    pub fn is_read_error(&self) -> bool {
        matches!(
            self,
            MapCsvError::Csv(_) | MapCsvError::MissingHeader | MapCsvError::ShortRow { .. }
        )
    }

    pub fn is_unknown_field(&self) -> bool {
        matches!(self, MapCsvError::UnknownField { .. })
    }
}

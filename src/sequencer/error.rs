use thiserror::Error;
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("resolution must be a finite value greater than zero, got {0}")]
    InvalidResolution(f64),
    #[error("sequence would contain {requested} samples, limit is {limit}")]
    TooManySamples { requested: usize, limit: usize },
    #[error("repeat count must be a non-negative integer, got {0:?}")]
    InvalidRepeatCount(String),
    #[error("step file is missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("line {line}: expected {expected} fields, found {found}")]
    MalformedRecord {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: quoted field is not closed before the next comma")]
    UnterminatedQuote { line: usize },
    #[error("line {line}: `{column}` is not a finite number: {value:?}")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for SequenceError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        SequenceError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for SequenceError {
    fn from(value: image::ImageError) -> Self {
        SequenceError::Plot(value.to_string())
    }
}

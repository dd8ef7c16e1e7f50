use catalog_model::UnknownAttribute;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),
}

impl From<UnknownAttribute> for QueryError {
    fn from(err: UnknownAttribute) -> Self {
        QueryError::InvalidAttribute(err.0)
    }
}

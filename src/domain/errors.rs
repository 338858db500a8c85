#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    MalformedTaskData(String),
    StorageRead(String),
    StorageWrite(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::MalformedTaskData(msg) => {
                write!(f, "Malformed stored task data: {}", msg)
            }
            DomainError::StorageRead(msg) => {
                write!(f, "Storage read failed: {}", msg)
            }
            DomainError::StorageWrite(msg) => {
                write!(f, "Storage write failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;

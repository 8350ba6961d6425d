use thiserror::Error;

/// Errors that can occur when inserting into or reading from a `DataSet`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// A member with the same identifier is already present
    #[error("Identifier already present in collection: {0}")]
    DuplicateIdentifier(String),
    /// Attempted to add a collection to itself
    #[error("A collection cannot contain itself")]
    SelfReference,
    /// The requested identifier was not found
    #[error("Key not found in collection: {0}")]
    KeyNotFound(String),
    /// Attempted to read a member as a type other than the one it stores
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

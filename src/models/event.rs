use super::Isbn;
use serde::Serialize;

/// The single result of a confirmed scanning session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationEvent {
    /// Confirmed ISBN
    pub isbn: Isbn,
}

impl ConfirmationEvent {
    /// Create an event for a confirmed ISBN
    pub fn new(isbn: Isbn) -> Self {
        Self { isbn }
    }

    /// Confirmed payload string
    pub fn payload(&self) -> &str {
        self.isbn.as_str()
    }
}

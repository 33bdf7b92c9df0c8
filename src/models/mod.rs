pub mod candidate;
pub mod event;
pub mod isbn;

pub use candidate::{LineError, RawCandidate};
pub use event::ConfirmationEvent;
pub use isbn::{BooklandPrefix, Isbn};

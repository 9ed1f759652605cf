//! Widget collection store for Bento profiles.
//!
//! [`ProfileStore`] owns the live [`bento_core::UserProfile`] of an editing
//! session and is the only component that assigns widget ids and positions.
//! Storage sits behind [`ProfileRepository`]; user-facing feedback goes to
//! an injected [`EventSink`].

mod error;
mod events;
mod repository;
mod store;

pub use error::{RepositoryError, StoreError};
pub use events::{
    EventSink, Notification, NullSink, RecordingSink, Severity, StoreEvent, TracingSink,
};
pub use repository::{InMemoryRepository, JsonFileRepository, ProfileRepository};
pub use store::{Applied, ProfilePatch, ProfileStore};

pub mod role;
pub mod types;

pub use role::{DomainEndpoints, DomainSecrets, Role};
pub use types::{Account, Book, Review, SessionRecord};

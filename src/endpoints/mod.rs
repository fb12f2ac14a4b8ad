pub mod books;
pub mod inter_service;
pub mod login;
pub mod reviews;

pub use inter_service::{verify_admin, verify_user};
pub use login::{login, register};

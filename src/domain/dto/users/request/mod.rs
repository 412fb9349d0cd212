pub mod account_request;
pub mod auth_request;
pub mod phone_request;

pub use account_request::*;
pub use auth_request::*;
pub use phone_request::*;

pub mod user_response;
pub mod auth_response;

pub use user_response::*;
pub use auth_response::*;

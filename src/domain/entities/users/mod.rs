pub mod user;

pub use user::LocalUser;

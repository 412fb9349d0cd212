pub mod identity;
pub mod phone;

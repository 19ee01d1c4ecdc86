pub mod client;
pub mod login;

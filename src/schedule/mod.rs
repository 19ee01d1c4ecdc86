pub mod dates;
pub mod fetch;
pub mod resource;

pub mod guard;
pub mod lifecycle;
pub mod repository;
pub mod types;
pub mod validate;

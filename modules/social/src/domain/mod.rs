pub mod clock;
pub mod error;
pub mod password;
pub mod rename;
pub mod repo;
pub mod service;
pub mod validation;

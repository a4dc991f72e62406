pub mod query;
pub mod services;

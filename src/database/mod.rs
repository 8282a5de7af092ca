/// Database connection pool and migration management
pub mod connection;
/// Row types and queries for tasks, users, and holidays
pub mod models;

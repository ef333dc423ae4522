//! Subcommand implementations

pub mod example;
pub mod health;
pub mod models;
pub mod ticket;

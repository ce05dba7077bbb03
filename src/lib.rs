pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod services;
pub mod web;

#[cfg(test)]
mod tests;

pub use api::ApiClient;
pub use config::Config;

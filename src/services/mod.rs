pub mod auth;
pub mod markdown;
pub mod metadata;
pub mod pagination;
pub mod tags;

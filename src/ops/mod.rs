pub mod analytics;
pub mod auth;
pub mod kanban;
pub mod market;
pub mod seed;
pub mod settings;
pub mod store;

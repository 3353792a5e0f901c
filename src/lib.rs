pub mod auth;
pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod store;
pub mod templates_structs;
pub mod views;

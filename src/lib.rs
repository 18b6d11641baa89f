pub mod commands;
pub mod config;
pub mod models;
pub mod remote;
pub mod store;
pub mod views;

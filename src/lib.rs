pub mod admin;
pub mod app;
pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod i18n;
pub mod state;
pub mod videos;

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod session;
pub mod utils;
#[cfg(feature = "web-interface")]
pub mod web;

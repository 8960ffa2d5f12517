#[macro_use]
extern crate rust_i18n;

pub mod ai;
pub mod config;
pub mod error;
pub mod extract;
pub mod geo;
pub mod links;
pub mod utils;
#[cfg(feature = "web-interface")]
pub mod web;

// Initialize i18n
i18n!("locales", fallback = "ja");

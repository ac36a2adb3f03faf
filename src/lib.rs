//! Admin dashboard for makechat: lists rooms and users fetched from the
//! makechat API in a tabbed page.

pub mod api_client;
pub mod auth;
pub mod collection;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod templates_structs;
pub mod views;

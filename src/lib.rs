// Library exports for Wanderly
// Integration tests and the binary build on these modules

pub mod catalog;
pub mod collection;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod interaction;
pub mod map;
pub mod routes;
pub mod state;

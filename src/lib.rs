pub mod config;
pub mod cors;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;

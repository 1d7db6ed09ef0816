#![doc = "The `taskmaster` library crate."]
#![doc = ""]
#![doc = "Core of the TaskMaster task-tracking backend: domain models, payload"]
#![doc = "validation, token-based authentication, routing and error handling."]
#![doc = "The binary (`main.rs`) wires these pieces into an actix-web server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod response;
pub mod routes;
pub mod validation;

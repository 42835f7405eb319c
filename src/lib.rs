pub mod api;
pub mod app;
pub mod cli;
pub mod collaborator;
pub mod config;
pub mod global;
pub mod render;
pub mod workflow;

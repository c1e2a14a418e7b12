pub mod configuration;
pub mod controller;
pub mod error;
pub mod handler;
pub mod helpers;
pub mod provider;
pub mod renderer;
pub mod server;
pub mod types;
pub mod view;

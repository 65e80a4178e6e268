#![allow(dead_code)]

pub mod browser;
pub mod config;
pub mod mock_provider;
pub mod server;

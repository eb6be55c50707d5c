pub mod channel;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod rows;
pub mod stats;
pub mod uploads;
pub mod youtube;

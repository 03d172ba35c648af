pub mod audio;
pub mod cli;
pub mod client;
pub mod config;
pub mod download;
pub mod dto;
pub mod error;
pub mod pipeline;
pub mod server;
pub mod whisper;
pub mod workspace;

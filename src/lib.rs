pub mod config;
pub mod domain;
pub mod error;
pub mod poller;
pub mod sink;
pub mod source;

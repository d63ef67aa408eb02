pub mod cli;
pub mod config;
pub mod connector;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod params;
pub mod query;
pub mod request;
pub mod runner;
pub mod util;

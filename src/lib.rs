pub mod cli;
pub mod config;
pub mod logging;
pub mod parser;
pub mod processor;
pub mod rewrite;
pub mod version;

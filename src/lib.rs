// Promptlens - Prompt critique web tool
// Library exports

pub mod chain;
pub mod cli;
pub mod config;
pub mod llm;
pub mod server;

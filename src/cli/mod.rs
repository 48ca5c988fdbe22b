// CLI module
// Setup and credential-check entry points

mod check_key;
mod setup;

pub use check_key::run_check_key;
pub use setup::{run_setup, SetupOptions};

pub mod capabilities;
pub mod commands;
pub mod config;
pub mod render;

pub use capabilities::{CommandShare, Osc52Clipboard};
pub use commands::{dispatch, parse_command, Command};
pub use config::Args;

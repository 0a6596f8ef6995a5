pub mod cli;
pub mod load_config;
pub mod render;

pub use cli::{run, AnalyzeArgs, Cli, Commands, GenerateArgs};

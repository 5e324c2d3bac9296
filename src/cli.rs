//! CLI domain: parse, route and output only.
//! Single route table dispatches to the stories API.

mod output;
mod parse;
mod route;

pub use output::{format_outline, map_error};
pub use parse::{Cli, Commands, OutputFormat};
pub use route::RunContext;

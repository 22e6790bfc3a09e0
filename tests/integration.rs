#[path = "integration/common.rs"]
mod common;

#[path = "integration/refresh_run.rs"]
mod refresh_run;

#[path = "integration/cli_commands.rs"]
mod cli_commands;

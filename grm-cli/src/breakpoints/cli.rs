use clap::{Command, arg};

pub const BREAKPOINTS_CMD: &str = "breakpoints";

pub fn create_breakpoints_cli() -> Command {
    Command::new(BREAKPOINTS_CMD)
        .about("List the branch and merge points of a sequence graph.")
        .arg_required_else_help(true)
        .arg(arg!(-g --graph <GRAPH> "Graph JSON file").required(true))
        .arg(arg!(-o --output <OUTPUT> "Output JSON file (default: stdout)").required(false))
}

use std::process;

use aid_metrics::cli::{Args, Command};

fn main() {
    // Parse command-line arguments; logging starts once settings are merged
    let args = Args::parse_args();

    let command = Command::from_args(args);
    let exit_code = command.run();

    process::exit(exit_code);
}

use std::process;

use crate::printer::print_error;

/// Initializes the process logger from `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Unwraps the result, or prints the error and terminates the process with a
/// non-zero exit status.
pub fn crash_on_error<T>(result: anyhow::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            print_error(&error);
            process::exit(1);
        }
    }
}

/// Shows the command help before exiting with a non-zero status.
pub fn crash_with_help(cmd: &mut clap::Command) -> ! {
    let _ = cmd.print_help();
    process::exit(1)
}

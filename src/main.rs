//! HQ Console CLI
//!
//! Command-line interface for the HQ admin console.

use clap::Parser;

use hq_console::cli::{run, Cli};
use hq_console::ApiError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        // API errors may carry several messages; print one line each
        match e.downcast_ref::<ApiError>() {
            Some(api_error) => {
                for message in api_error.toasts() {
                    eprintln!("error: {}", message);
                }
                if api_error.needs_login() {
                    eprintln!("hint: run `hq-console login` first");
                }
            }
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

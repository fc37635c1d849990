use clap::Parser;
use klyra::cli::commands::{Cli, Commands};
use klyra::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let workspace_dir = cli.workspace_dir.clone();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = klyra::tui::run(workspace_dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Init(args)) => {
            // Init is handled before workspace discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

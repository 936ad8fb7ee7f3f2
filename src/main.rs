mod browser;
mod commands;
mod config;
mod diagnostics;
mod error;
mod render;
mod rewrite;
mod scanner;
mod source;
mod types;
mod viewer;
mod watch;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "helpview", about = "Offline help document viewer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify every figure reference resolves to an existing image
    Check {
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Load a help document, resolve its figures, and display it
    Render {
        /// Document to load, relative to the docs directory
        file: String,
        /// Use the about-page title
        #[arg(long)]
        about: bool,
        /// Scroll to this anchor after rendering
        #[arg(long)]
        anchor: Option<String>,
        /// Activate this link after rendering, as if clicked
        #[arg(long)]
        follow: Option<String>,
    },
    /// Re-run check whenever the help tree changes
    Watch {
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { format } => commands::check(&format),
        Commands::Render { file, about, anchor, follow } => {
            commands::render(&commands::RenderRequest { about, anchor, file, follow })
        },
        Commands::Watch { format } => watch::run(&format),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    }
}

pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "vitrine",
    about = "Vitrine operator CLI",
    long_about = "Operate Vitrine migrations, config inspection, smoke validation, and the demo walkthrough.",
    after_help = "Examples:\n  vitrine config\n  vitrine migrate\n  vitrine smoke\n  vitrine demo"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Run end-to-end readiness checks with per-check timing details")]
    Smoke,
    #[command(about = "Inspect effective configuration values")]
    Config,
    #[command(about = "Run a deterministic personalization walkthrough over the demo catalog")]
    Demo,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Smoke => commands::smoke::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Demo => commands::demo::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

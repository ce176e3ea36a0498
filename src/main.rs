use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pokedex::cli::{Cli, Commands, ConfigAction};
use pokedex::commands::{
    cmd_color, cmd_config_get, cmd_config_set, cmd_config_show, cmd_list, cmd_search, cmd_show,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout stays clean for --json output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            pages,
            colors,
            output,
        } => cmd_list(pages, colors, output).await,
        Commands::Search {
            query,
            colors,
            output,
        } => cmd_search(&query, colors, output).await,
        Commands::Show { name, output } => cmd_show(&name, output).await,
        Commands::Color { name, file, output } => {
            cmd_color(name.as_deref(), file.as_deref(), output).await
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { output } => cmd_config_show(output),
            ConfigAction::Get { key, output } => cmd_config_get(&key, output),
            ConfigAction::Set { key, value, output } => cmd_config_set(&key, &value, output),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

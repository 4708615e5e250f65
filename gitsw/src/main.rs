mod cli;
mod logging;

use clap::{Parser, Subcommand};
use cli::{CliError, RepoContext};
use gitsw_core::{config, git::CliGitProvider, storage::Storage};
use std::{path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(version, about = "Interactive git branch switcher with pinned branches")]
struct Cli {
    /// Override path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Pick from remote branches instead of local ones
    #[arg(short, long)]
    remote: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pin a branch so it is listed first
    Pin { branch: String },
    /// Unpin a branch
    Unpin { branch: String },
    /// List pinned branches for this repository
    Pins {
        #[arg(long)]
        json: bool,
    },
    /// Remove every pin for this repository
    ClearPins,
    /// Check out the branch that was checked out before the last switch
    Last,
    /// Print branches in picker order without opening the picker
    List {
        #[arg(long)]
        json: bool,
        /// List remote branches instead of local ones
        #[arg(short, long)]
        remote: bool,
    },
}

fn command_wants_json(command: Option<&Commands>) -> bool {
    matches!(
        command,
        Some(Commands::Pins { json: true } | Commands::List { json: true, .. })
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_errors = command_wants_json(cli.command.as_ref());

    let env_level = std::env::var(logging::LOG_ENV_VAR).ok();
    let level = logging::resolve_level(cli.verbose, env_level.as_deref());
    if let Err(e) = logging::setup_logging(level) {
        eprintln!("warning: failed to set up logging: {e:#}");
    }

    let result = run(cli);
    match result {
        Ok(()) => ExitCode::from(0),
        Err(error) => {
            log::error!("{}", error.message());
            cli::print_error(&error, json_errors);
            let code: u8 = match error.code() {
                1 => 1,
                _ => 2,
            };
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> cli::CliResult<()> {
    let config = config::load_config(cli.config.as_deref())?;
    let git = CliGitProvider;
    let cwd = std::env::current_dir()
        .map_err(|e| CliError::system(format!("failed to read current directory: {e}")))?;
    let ctx = RepoContext::resolve(&config, &git, &cwd, Storage::default_path())?;

    match cli.command {
        None => cli::cmd_pick(&ctx, cli.remote, gitsw_tui::pick),
        Some(Commands::Pin { branch }) => cli::cmd_pin(&ctx, &branch),
        Some(Commands::Unpin { branch }) => cli::cmd_unpin(&ctx, &branch),
        Some(Commands::Pins { json }) => cli::cmd_pins(&ctx, json),
        Some(Commands::ClearPins) => cli::cmd_clear_pins(&ctx),
        Some(Commands::Last) => cli::cmd_last(&ctx),
        Some(Commands::List { json, remote }) => cli::cmd_list(&ctx, remote || cli.remote, json),
    }
}

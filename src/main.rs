mod keychain;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use keychain::{Keychain, render_item};
use tracing::warn;

const VERSION: &str = concat!(
    env!("SSHKEYCHAIN_VERSION"),
    " ",
    env!("SSHKEYCHAIN_BUILD_HASH")
);

#[derive(Parser)]
#[command(name = "sshkeychain", version = VERSION, about)]
struct Arguments {
    /// SSH config to read instead of ~/.ssh/config
    #[arg(long, global = true, value_name = "PATH")]
    ssh_config: Option<PathBuf>,

    /// Settings file to use instead of ~/.sshkeychain.json
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log probe and launch decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List hosts from the SSH config
    List {
        /// Print entries as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Open an SSH session to a host in a new terminal
    Connect {
        /// Host alias as written after `Host`
        alias: String,

        /// Print the command that would be spawned
        #[arg(long)]
        dry_run: bool,
    },
    /// Create the settings file if missing and open it
    Configure,
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Arguments) -> Result<ExitCode> {
    let settings_path = args.config.or_else(config::config_path);

    match args.command.unwrap_or(Commands::List { json: false }) {
        Commands::List { json } => {
            let keychain = Keychain::new(&load_settings(settings_path.as_deref()), args.ssh_config);
            list(&keychain, json)
        }
        Commands::Connect { alias, dry_run } => {
            let keychain = Keychain::new(&load_settings(settings_path.as_deref()), args.ssh_config);
            connect(&keychain, &alias, dry_run)
        }
        Commands::Configure => {
            let path = settings_path.context("could not determine home directory")?;
            configure(&path)
        }
    }
}

/// Falls back to defaults on invalid settings so the host list stays usable.
fn load_settings(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        warn!("could not determine home directory, using default settings");
        return Config::default();
    };

    config::load_from_path(path).unwrap_or_else(|e| {
        warn!("{}: {e}", path.display());
        Config::default()
    })
}

fn list(keychain: &Keychain, json: bool) -> Result<ExitCode> {
    let hosts = keychain.hosts().context("failed to list SSH hosts")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&hosts)?);
    } else if hosts.is_empty() {
        eprintln!("No hosts found");
    } else {
        for host in &hosts {
            println!("{}", render_item(host));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn connect(keychain: &Keychain, alias: &str, dry_run: bool) -> Result<ExitCode> {
    let Some(host) = keychain.find(alias).context("failed to list SSH hosts")? else {
        eprintln!("Error: no host named {alias}");
        return Ok(ExitCode::FAILURE);
    };

    if dry_run {
        println!("{}", keychain.plan(&host));
        return Ok(ExitCode::SUCCESS);
    }

    let session = match keychain.open(&host) {
        Ok(session) => session,
        Err(message) => {
            eprintln!("Error: {message}");
            return Ok(ExitCode::FAILURE);
        }
    };

    // The fallback shell runs on this terminal; exiting now would leave it
    // in a background process group with no input.
    if session.needs_terminal() {
        let status = session.wait().context("failed to wait for shell")?;
        if !status.success() {
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn configure(path: &Path) -> Result<ExitCode> {
    config::ensure_config_exists(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    open::that(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(ExitCode::SUCCESS)
}

//! `pt` - ProjectTools command line
//!
//! Manage development profiles stored in `~/.projecttools/config.json`.
//!
//! # Logging
//!
//! Log output goes to stderr through `env_logger`. The default level is
//! `warn`; `--verbose` raises it to `debug`, and `RUST_LOG` overrides both.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use log::LevelFilter;
use projecttools::{ConfigStore, Error, Result};

/// ProjectTools - Manage your development projects across workspaces and profiles.
#[derive(Parser, Debug)]
#[command(name = "pt")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage ProjectTools configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Manage profiles
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Manage workspaces
    Workspace,

    /// Manage projects
    Project,

    /// Test command to verify installation
    Hello,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Create a new profile
    Add {
        /// Name of the profile to create
        name: String,
    },

    /// List all profiles
    List,

    /// Switch profiles
    Switch {
        /// Profile to make active
        name: String,
    },

    /// Remove a specific profile
    Remove {
        /// Profile to remove
        name: String,
    },
}

const CONFIG_KEYS: &[&str] = &["default-path"];

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = match ConfigStore::at_default_location() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error initializing ProjectTools: {e}");
            return ExitCode::FAILURE;
        }
    };

    match store.ensure_initialized() {
        Ok(true) => println!("Configuration initialized at {}", store.config_path().display()),
        Ok(false) => {}
        Err(e) => {
            eprintln!("Error initializing ProjectTools: {e}");
            return ExitCode::FAILURE;
        }
    }

    let Some(command) = cli.command else {
        if let Err(e) = write_welcome(&mut std::io::stdout()) {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    match run(&store, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn write_welcome(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Welcome to ProjectTools!")?;
    writeln!(out, "Use --help to see available commands.")?;
    Cli::command().write_help(out)
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(store: &ConfigStore, command: Command) -> Result<()> {
    match command {
        Command::Config(cmd) => run_config(store, cmd),
        Command::Profile(cmd) => run_profile(store, cmd),
        Command::Workspace => {
            println!("Workspace management coming soon...");
            Ok(())
        }
        Command::Project => {
            println!("Project management coming soon...");
            Ok(())
        }
        Command::Hello => {
            println!("ProjectTools is working!");
            println!("Ready to manage your projects with ease!");
            Ok(())
        }
    }
}

fn run_config(store: &ConfigStore, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let document = store.load_or_default();
            let projects_path = document
                .settings
                .as_ref()
                .and_then(|s| s.default_projects_path())
                .map_or_else(|| "Not set".to_string(), |p| p.display().to_string());

            println!();
            println!("ProjectTools Configuration:");
            println!("{}", "-".repeat(40));
            println!("Default projects path: {projects_path}");
            println!(
                "Active profile: {}",
                document.active_profile.as_deref().unwrap_or("None")
            );
            println!("Profiles: {}", document.profiles.len());
            println!("Workspaces: {}", document.workspaces.len());
            println!("Projects: {}", document.projects.len());
            println!("Config file: {}", store.config_path().display());
            println!();
            Ok(())
        }
        ConfigCommand::Set { key, value } => match key.as_str() {
            "default-path" => {
                let path = store.settings().set_default_projects_path(&value)?;
                println!("Default projects path set to: {}", path.display());
                Ok(())
            }
            _ => Err(Error::Config(format!(
                "Unknown configuration key: {key} (available keys: {})",
                CONFIG_KEYS.join(", ")
            ))),
        },
    }
}

fn run_profile(store: &ConfigStore, command: ProfileCommand) -> Result<()> {
    let profiles = store.profiles();

    match command {
        ProfileCommand::Add { name } => {
            let added = profiles.add(&name)?;
            let stored = &added.profile.name;
            if let Some(original) = &added.cleaned_from {
                println!("Profile name cleaned: \"{original}\" -> \"{stored}\"");
            }
            println!("Profile \"{stored}\" created successfully!");
            if added.is_first_profile {
                println!("\"{stored}\" is now your active profile");
            }
        }
        ProfileCommand::List => {
            let entries = profiles.list()?;
            if entries.is_empty() {
                print_no_profiles_hint();
            } else {
                println!();
                println!("Available Profiles:");
                for entry in entries {
                    let marker = if entry.active { "* (active)" } else { "o" };
                    println!("  {marker} {}", entry.profile.name);
                }
                println!();
            }
        }
        ProfileCommand::Switch { name } => {
            let switched = profiles.switch(&name)?;
            println!("Switched to profile \"{}\"", switched.profile_name);
        }
        ProfileCommand::Remove { name } => {
            let removed = profiles.remove(&name)?;
            println!("Profile \"{}\" removed", removed.removed_profile);
            if removed.active_profile_changed {
                match removed.active_profile {
                    Some(active) => println!("\"{active}\" is now your active profile"),
                    None => print_no_profiles_hint(),
                }
            }
        }
    }

    Ok(())
}

fn print_no_profiles_hint() {
    println!("No profiles found. Create one with: pt profile add <name>");
}

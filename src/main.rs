use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use version_manager::cli::{run_bump_version, BumpVersionArgs};
use version_manager::config;
use version_manager::domain::ReleaseType;
use version_manager::git::Git2Repository;
use version_manager::logging::{self, LogLevel};
use version_manager::registry::NpmCli;
use version_manager::ui::{self, TerminalPrompter};

#[derive(Parser)]
#[command(
    name = "version-manager",
    version,
    about = "Bump package versions and create release tags"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn, help = "Log verbosity")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the next free version, write it, commit and tag it
    BumpVersion(BumpVersionCommand),
}

#[derive(Args)]
struct BumpVersionCommand {
    #[arg(long, help = "Show the next version without changing anything")]
    dry_run: bool,

    #[arg(long, help = "Write the version but do not commit or tag")]
    no_commit: bool,

    #[arg(
        long,
        alias = "ignore-git-changes",
        help = "Do not refuse to run with uncommitted changes"
    )]
    no_git_check: bool,

    #[arg(long, help = "Print the result as JSON on stdout")]
    json: bool,

    #[arg(long, help = "Push the branch and tag after committing")]
    push: bool,

    #[arg(short, long, help = "Branch name to classify instead of the current one")]
    branch: Option<String>,

    #[arg(long, help = "Pre-release identifier (e.g. rc, beta)")]
    preid: Option<String>,

    #[arg(
        long,
        help = "Tag template, e.g. 'v{package_version}' or '{package_name}@{package_version}'"
    )]
    commit_msg_template: Option<String>,

    #[arg(long, value_enum, help = "Release type; asked interactively when omitted")]
    release_type: Option<ReleaseType>,

    #[arg(short, long, help = "Workspace package to bump")]
    package: Option<String>,

    #[arg(long, help = "Remote to read tags from and push to")]
    remote: Option<String>,

    #[arg(long, help = "Repository root (defaults to the current directory)")]
    cwd: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.log_level) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::BumpVersion(command) => bump_version(cli.config, command),
    }
}

fn bump_version(config_path: Option<PathBuf>, command: BumpVersionCommand) -> Result<()> {
    let root = match command.cwd {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    let config = config::load_config(config_path.as_deref(), &root)?;
    let repo = Git2Repository::open(&root)
        .with_context(|| format!("Not a git repository: {}", root.display()))?;
    let package_manager = NpmCli::new();

    let args = BumpVersionArgs {
        root,
        dry_run: command.dry_run,
        commit: !command.no_commit,
        git_check: !command.no_git_check,
        push: command.push,
        branch: command.branch,
        preid: command.preid,
        commit_msg_template: command.commit_msg_template,
        release_type: command.release_type,
        package: command.package,
        remote: command.remote,
    };

    let outcome = run_bump_version(
        &args,
        &config,
        &repo,
        &package_manager,
        &TerminalPrompter,
    )?;

    if command.json {
        println!("{}", ui::json_output(&outcome.resolved)?);
    } else {
        ui::display_outcome(&outcome);
    }

    Ok(())
}

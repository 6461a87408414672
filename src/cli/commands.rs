//! Command dispatch

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::diff_bookmarks;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see --help".to_string(),
        ));
    };

    // Completions must work even with a broken config file.
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(check) = cli.length_check {
        settings.length_check = check;
    }
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match command {
        Commands::List { file, roots, json } => cmd_list(&container, file.as_deref(), roots, *json),
        Commands::Tree { file, roots } => cmd_tree(&container, file.as_deref(), roots),
        Commands::Unpack { file, output } => cmd_unpack(&container, file, output.as_deref()),
        Commands::Pack { json, output } => cmd_pack(&container, json, output),
        Commands::Diff { got, want, roots } => cmd_diff(&container, got, want, roots),
        Commands::Locate => cmd_locate(&container),
        Commands::Config { command } => cmd_config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

/// Explicit file, or the newest backup in the configured profile.
fn resolve_store(container: &ServiceContainer, file: Option<&Path>) -> CliResult<PathBuf> {
    match file {
        Some(path) => Ok(path.to_path_buf()),
        None => {
            let path = container.locator().locate()?;
            debug!("resolve_store: located {}", path.display());
            Ok(path)
        }
    }
}

#[instrument(skip(container))]
fn cmd_list(
    container: &ServiceContainer,
    file: Option<&Path>,
    roots: &[String],
    json: bool,
) -> CliResult<()> {
    let path = resolve_store(container, file)?;
    let selection = container.root_selection(roots);
    let records = container.bookmarks().read_file(&path, &selection)?;

    if json {
        let rendered = serde_json::to_string_pretty(&records)
            .map_err(|e| InfraError::io("serialize records", e.into()))?;
        output::info(&rendered);
    } else {
        for record in &records {
            output::info(record);
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: Option<&Path>, roots: &[String]) -> CliResult<()> {
    let path = resolve_store(container, file)?;
    let selection = container.root_selection(roots);
    let service = container.bookmarks();
    let tree = service.tree_file(&path)?;

    let outline = service.outline(&tree, &selection);
    if outline.is_empty() {
        output::warning(&format!("no root matches {:?}", selection.names()));
    }
    for root in outline {
        output::info(&root);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_unpack(container: &ServiceContainer, file: &Path, out: Option<&Path>) -> CliResult<()> {
    let raw = container.bookmarks().unpack_file(file)?;
    match out {
        Some(out) => {
            container
                .fs
                .ensure_parent(out)
                .and_then(|_| container.fs.write(out, &raw))
                .map_err(|e| InfraError::io(format!("write {}", out.display()), e))?;
            output::success(&format!("{} bytes -> {}", raw.len(), out.display()));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&raw)
                .and_then(|_| stdout.flush())
                .map_err(|e| InfraError::io("write stdout", e))?;
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_pack(container: &ServiceContainer, json: &Path, out: &Path) -> CliResult<()> {
    let written = container.bookmarks().pack_file(json, out)?;
    output::success(&format!("{} bytes -> {}", written, out.display()));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_diff(container: &ServiceContainer, got: &Path, want: &Path, roots: &[String]) -> CliResult<()> {
    let selection = container.root_selection(roots);
    let service = container.bookmarks();
    let got_records = service.read_file(got, &selection)?;
    let want_records = service.read_file(want, &selection)?;

    let report = diff_bookmarks(&got_records, &want_records);
    if report.is_empty() {
        output::success(&format!("{} bookmarks, no differences", got_records.len()));
        return Ok(());
    }
    output::header("(-got +want)");
    output::diff_report(&report);
    Err(CliError::Mismatch(report.lines().count()))
}

#[instrument(skip(container))]
fn cmd_locate(container: &ServiceContainer) -> CliResult<()> {
    let path = container.locator().locate()?;
    output::info(&path.display());
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("cannot determine config directory"),
        },
    }
    Ok(())
}

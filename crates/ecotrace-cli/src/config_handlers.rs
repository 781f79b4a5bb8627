//! Handler functions for `ecotrace config` commands.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ecotrace_core::EcoTraceConfig;

use crate::cli::ConfigAction;

/// Handles a config subcommand.
pub fn handle_config_command(
    config_path: Option<&str>,
    data_dir: Option<PathBuf>,
    action: ConfigAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path, out),
        ConfigAction::Show => cmd_config_show(config_path, data_dir, out),
        ConfigAction::Init { file, force } => {
            cmd_config_init(file.as_deref().or(config_path), force, out)
        }
    }
}

/// Shows the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>, out: &mut impl Write) -> Result<()> {
    let path = EcoTraceConfig::resolve_config_path(config_path)
        .context("Could not determine config directory for this platform")?;
    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        eprintln!(
            "(file does not exist, run `{} config init` to create it)",
            EcoTraceConfig::project_name()
        );
    }
    Ok(())
}

/// Prints the effective configuration as TOML.
pub fn cmd_config_show(
    config_path: Option<&str>,
    data_dir: Option<PathBuf>,
    out: &mut impl Write,
) -> Result<()> {
    let mut config = EcoTraceConfig::load(config_path)?;
    if let Some(dir) = data_dir {
        config.data_dir = Some(dir);
    }
    write!(out, "{}", config.to_toml_string()?)?;
    writeln!(out, "# resolved data_dir: {}", config.resolved_data_dir().display())?;
    Ok(())
}

/// Creates a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool, out: &mut impl Write) -> Result<()> {
    let path = EcoTraceConfig::resolve_config_path(file)
        .context("Could not determine config directory")?;
    EcoTraceConfig::write_default(&path, force)?;
    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

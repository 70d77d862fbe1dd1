use crate::commands::{CmdMessage, CmdResult};
use crate::config::CertzConfig;
use crate::error::Result;
use std::path::Path;

/// Writes a default `config.json`. An existing file is left alone.
pub fn run(config_dir: &Path) -> Result<CmdResult> {
    let path = CertzConfig::path_in(config_dir);
    let mut result = CmdResult::default();

    if path.exists() {
        result.add_message(CmdMessage::warning(format!(
            "Config already exists at {}",
            path.display()
        )));
        return Ok(result);
    }

    let config = CertzConfig::default();
    config.save(config_dir)?;
    result.add_message(CmdMessage::success(format!(
        "Initialized certz config at {}",
        path.display()
    )));
    Ok(result.with_config(config))
}

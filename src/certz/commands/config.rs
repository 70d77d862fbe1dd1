use crate::commands::{CmdMessage, CmdResult};
use crate::config::CertzConfig;
use crate::error::{CertzError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = CertzConfig::load(config_dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = CertzConfig::load(config_dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Ok(val) => result.add_message(CmdMessage::info(val)),
                Err(e) => result.add_message(CmdMessage::error(config_message(e))),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = CertzConfig::load(config_dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(config_message(e)));
                return Ok(res);
            }
            config.save(config_dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

fn config_message(err: CertzError) -> String {
    match err {
        CertzError::Config(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn test_show_all_defaults() {
        let temp = TempDir::new().unwrap();
        let result = run(temp.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(CertzConfig::default()));
    }

    #[test]
    fn test_set_then_show_key() {
        let temp = TempDir::new().unwrap();

        let result = run(
            temp.path(),
            ConfigAction::Set("archive".into(), "certs.tgz".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.messages[0].content, "archive set to certs.tgz");

        let result = run(temp.path(), ConfigAction::ShowKey("archive".into())).unwrap();
        assert_eq!(result.messages[0].content, "certs.tgz");
    }

    #[test]
    fn test_bad_values_are_reported_not_saved() {
        let temp = TempDir::new().unwrap();

        let result = run(
            temp.path(),
            ConfigAction::Set("header-offset".into(), "two".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!CertzConfig::path_in(temp.path()).exists());

        let result = run(temp.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(result.messages[0].content.starts_with("Unknown config key: colour"));
    }
}

use crate::config::Config;
use crate::errors::{AppError, AppResult};

use crate::cli::parser::Commands;
use crate::ui::messages::{success, warning};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", yaml);
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let fallback = default_editor();
            let editor_to_use = editor.clone().unwrap_or_else(|| fallback.clone());

            let edited = Command::new(&editor_to_use)
                .arg(&path)
                .status()
                .is_ok_and(|s| s.success());

            if edited {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
            } else if editor_to_use != fallback {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, fallback
                ));
                let ok = Command::new(&fallback)
                    .arg(&path)
                    .status()
                    .is_ok_and(|s| s.success());
                if !ok {
                    return Err(AppError::Config(format!(
                        "failed to edit configuration file using '{}'",
                        fallback
                    )));
                }
                success(format!(
                    "Configuration file edited successfully using fallback '{}'",
                    fallback
                ));
            } else {
                return Err(AppError::Config(format!(
                    "failed to edit configuration file using '{}'",
                    editor_to_use
                )));
            }

            // the edited file must still load
            Config::load_from(&path)?.validate()?;
        }
    }

    Ok(())
}

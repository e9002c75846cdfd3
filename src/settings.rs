use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_SETTINGS_TOML: &str = include_str!("../settings.toml");

#[derive(Debug, Clone)]
pub struct Settings {
    pub ocr_languages: String,
    pub ocr_oem: u32,
    pub ocr_psm: u32,
    pub ocr_dpi: u32,
    pub server_listen: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ocr_languages: "eng".to_string(),
            // legacy + LSTM combined, single uniform block of text
            ocr_oem: 3,
            ocr_psm: 6,
            ocr_dpi: 300,
            server_listen: "127.0.0.1:8787".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    ocr: Option<OcrSettings>,
    server: Option<ServerSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct OcrSettings {
    languages: Option<String>,
    oem: Option<u32>,
    psm: Option<u32>,
    dpi: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSettings {
    listen: Option<String>,
}

pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    ensure_home_settings_file()?;

    let mut ordered_paths = Vec::new();
    ordered_paths.push(PathBuf::from("settings.toml"));
    ordered_paths.push(PathBuf::from("settings.local.toml"));

    if let Some(home) = home_dir() {
        ordered_paths.push(home.join("settings.toml"));
        ordered_paths.push(home.join("settings.local.toml"));
    }

    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    for path in ordered_paths {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            let parsed: SettingsFile = toml::from_str(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
            settings.merge(parsed);
        }
    }

    Ok(settings)
}

impl Settings {
    fn merge(&mut self, incoming: SettingsFile) {
        if let Some(ocr) = incoming.ocr {
            if let Some(languages) = ocr.languages {
                if !languages.trim().is_empty() {
                    self.ocr_languages = languages;
                }
            }
            if let Some(oem) = ocr.oem {
                self.ocr_oem = oem;
            }
            if let Some(psm) = ocr.psm {
                self.ocr_psm = psm;
            }
            if let Some(dpi) = ocr.dpi {
                if dpi > 0 {
                    self.ocr_dpi = dpi;
                }
            }
        }
        if let Some(server) = incoming.server {
            if let Some(listen) = server.listen {
                if !listen.trim().is_empty() {
                    self.server_listen = listen;
                }
            }
        }
    }
}

fn ensure_home_settings_file() -> Result<()> {
    let Some(home) = home_dir() else {
        return Ok(());
    };
    fs::create_dir_all(&home)
        .with_context(|| format!("failed to create settings directory: {}", home.display()))?;
    let path = home.join("settings.toml");
    if !path.exists() {
        fs::write(&path, DEFAULT_SETTINGS_TOML)
            .with_context(|| format!("failed to write settings: {}", path.display()))?;
    }
    Ok(())
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().and_then(|home| {
        let home = home.trim();
        if home.is_empty() {
            None
        } else {
            Some(Path::new(home).join(".wh-reader-rust"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::with_temp_home;

    #[test]
    fn defaults_survive_an_empty_home() {
        with_temp_home(|_| {
            let settings = load_settings(None).expect("settings");
            assert_eq!(settings.ocr_languages, "eng");
            assert_eq!(settings.ocr_oem, 3);
            assert_eq!(settings.ocr_psm, 6);
            assert_eq!(settings.ocr_dpi, 300);
            assert_eq!(settings.server_listen, "127.0.0.1:8787");
        });
    }

    #[test]
    fn first_run_materializes_the_default_file() {
        with_temp_home(|home| {
            load_settings(None).expect("settings");
            assert!(home.join(".wh-reader-rust").join("settings.toml").exists());
        });
    }

    #[test]
    fn extra_settings_override_defaults() {
        with_temp_home(|home| {
            let path = home.join("extra.toml");
            std::fs::write(&path, "[ocr]\nlanguages = \"eng+jpn\"\npsm = 11\n").expect("write");
            let settings = load_settings(Some(&path)).expect("settings");
            assert_eq!(settings.ocr_languages, "eng+jpn");
            assert_eq!(settings.ocr_psm, 11);
            assert_eq!(settings.ocr_oem, 3);
        });
    }

    #[test]
    fn missing_extra_settings_file_is_an_error() {
        with_temp_home(|home| {
            let missing = home.join("nope.toml");
            assert!(load_settings(Some(&missing)).is_err());
        });
    }
}

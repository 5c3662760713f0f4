//! User defaults, stored as YAML.

use std::fs::File;
use std::io;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::password_generation::RetryPolicy;
use crate::slider::Geometry;
use crate::ClassSet;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Classes used when none are given on the command line.
    pub classes: ClassSet,
    pub length: usize,
    pub slider: SliderSettings,
    /// Cap on candidate draws before falling back to a constructed password. Unset means no cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<NonZeroU32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderSettings {
    pub max_characters: u32,
    pub track_width: f64,
    pub thumb_width: f64,
}

impl SliderSettings {
    pub fn geometry(&self) -> Geometry {
        Geometry {
            track_width: self.track_width,
            thumb_width: self.thumb_width,
        }
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            classes: ClassSet::all(),
            length: 16,
            slider: SliderSettings::default(),
            max_attempts: None,
        }
    }
}

impl Default for SliderSettings {
    fn default() -> SliderSettings {
        SliderSettings {
            max_characters: 20,
            track_width: 200.0,
            thumb_width: 20.0,
        }
    }
}

impl Settings {
    /// Load settings from the given file.
    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        let file = File::open(path).map_err(|err| SettingsErrorRepr::Io {
            path: path.to_owned(),
            source: err,
        })?;
        let settings: Settings = serde_yaml::from_reader(file)
            .map_err(|err| SettingsErrorRepr::Parse {
                path: path.to_owned(),
                source: err,
            })?;
        settings.validate()?;
        info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from the given file, or fall back to the defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Settings, SettingsError> {
        match Settings::load(path) {
            Err(SettingsError(SettingsErrorRepr::Io { source, .. }))
                if source.kind() == io::ErrorKind::NotFound =>
            {
                info!("no settings at {}; using defaults", path.display());
                Ok(Settings::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.slider.max_characters == 0 {
            return Err(SettingsErrorRepr::ZeroMaxCharacters.into());
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        match self.max_attempts {
            Some(max) => RetryPolicy::Bounded(max),
            None => RetryPolicy::Unbounded,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct SettingsError(SettingsErrorRepr);

impl From<SettingsErrorRepr> for SettingsError {
    fn from(err: SettingsErrorRepr) -> SettingsError {
        SettingsError(err)
    }
}

#[derive(Debug, thiserror::Error)]
enum SettingsErrorRepr {
    #[error("failed to read settings from {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("`slider.max_characters` must be at least 1")]
    ZeroMaxCharacters,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_settings(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_settings(
            "classes:\n  lower: true\n  digits: true\nlength: 12\nmax_attempts: 50\n",
        );
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(
            settings.classes,
            ClassSet {
                lower: true,
                digits: true,
                ..ClassSet::default()
            }
        );
        assert_eq!(settings.length, 12);
        assert_eq!(settings.slider, SliderSettings::default());
        assert_eq!(
            settings.retry_policy(),
            RetryPolicy::Bounded(NonZeroU32::new(50).unwrap())
        );
    }

    #[test]
    fn slider_geometry() {
        let file = write_settings(
            "slider:\n  max_characters: 32\n  track_width: 320\n  thumb_width: 16\n",
        );
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.slider.max_characters, 32);
        assert_eq!(
            settings.slider.geometry(),
            Geometry {
                track_width: 320.0,
                thumb_width: 16.0,
            }
        );
        assert_eq!(settings.retry_policy(), RetryPolicy::Unbounded);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("settings.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn bad_files_are_errors() {
        let file = write_settings("length: -3\n");
        assert!(Settings::load_or_default(file.path()).is_err());

        let file = write_settings("colour: blue\n");
        assert!(Settings::load(file.path()).is_err());

        let file = write_settings("slider:\n  max_characters: 0\n");
        let err = Settings::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_characters"));
    }

    #[test]
    fn defaults_round_trip_through_yaml() {
        let yaml = serde_yaml::to_string(&Settings::default()).unwrap();
        let parsed: Settings = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}

use crate::error::DecodeError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const INSTALLED_APPS_FILE: &str = "installedApps.json";
pub const OTHER_APPS_FILE: &str = "otherApps.json";

const BUNDLED_INSTALLED_APPS: &str = include_str!("../data/installedApps.json");
const BUNDLED_OTHER_APPS: &str = include_str!("../data/otherApps.json");

pub type AppId = i64;

/// A single icon on the home screen. `image` names an icon asset and is
/// resolved by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct App {
    pub id: AppId,
    pub name: String,
    pub image: String,
}

#[cfg(test)]
impl App {
    pub fn new(id: AppId, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(alias = "label")]
    pub name: String,
    pub apps: Vec<App>,
}

impl Section {
    pub fn new(name: impl Into<String>, apps: Vec<App>) -> Self {
        Self {
            name: name.into(),
            apps,
        }
    }
}

/// Read-only startup data: the installed sections and the apps that can be
/// added from the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub sections: Vec<Section>,
    pub other_apps: Vec<App>,
}

impl Catalog {
    /// Decodes the data files embedded in the binary.
    pub fn load() -> Result<Self, DecodeError> {
        Self::from_json(BUNDLED_INSTALLED_APPS, BUNDLED_OTHER_APPS)
    }

    /// Decodes `installedApps.json` and `otherApps.json` from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Self, DecodeError> {
        let installed = read_resource(dir, INSTALLED_APPS_FILE)?;
        let other = read_resource(dir, OTHER_APPS_FILE)?;
        Self::from_json(&installed, &other)
    }

    pub fn from_json(installed: &str, other: &str) -> Result<Self, DecodeError> {
        let mut sections: Vec<Section> =
            serde_json::from_str(installed).map_err(|source| DecodeError::Malformed {
                resource: INSTALLED_APPS_FILE.to_string(),
                source,
            })?;
        let other_apps: Vec<App> =
            serde_json::from_str(other).map_err(|source| DecodeError::Malformed {
                resource: OTHER_APPS_FILE.to_string(),
                source,
            })?;

        // The grid never holds an empty section.
        sections.retain(|section| {
            if section.apps.is_empty() {
                warn!("dropping empty section {:?} from {INSTALLED_APPS_FILE}", section.name);
            }
            !section.apps.is_empty()
        });

        let mut seen = HashSet::new();
        for app in sections.iter().flat_map(|section| &section.apps) {
            if !seen.insert(app.id) {
                return Err(DecodeError::DuplicateId {
                    resource: INSTALLED_APPS_FILE.to_string(),
                    id: app.id,
                });
            }
        }

        info!(
            "catalog loaded: {} sections, {} installed apps, {} other apps",
            sections.len(),
            seen.len(),
            other_apps.len()
        );

        Ok(Self {
            sections,
            other_apps,
        })
    }
}

fn read_resource(dir: &Path, name: &str) -> Result<String, DecodeError> {
    std::fs::read_to_string(dir.join(name)).map_err(|source| DecodeError::Missing {
        resource: dir.join(name).to_string_lossy().to_string(),
        source,
    })
}

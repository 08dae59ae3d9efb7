//! # Configuration
//!
//! The configuration is a JSON file naming the display [`Level`]s and the
//! ordered list of attributes to evaluate for every file:
//!
//! ```json
//! {
//!     "levels": {"good": {"color": "green", "flag": false}},
//!     "attributes": [
//!         {
//!             "title": "Video codec",
//!             "track_type": "Video",
//!             "track_attribute": "format",
//!             "default_level": "good",
//!             "render": "%s",
//!             "missing_value": "unknown",
//!             "preferences": [{"title": "HEVC", "pattern": "HEVC", "level": "good"}]
//!         },
//!         {"title": "Profile", "attributes": ["...nested attributes..."]}
//!     ]
//! }
//! ```
//!
//! An attribute with an `attributes` list is composite; any other attribute
//! must name a `track_type` and a `track_attribute`. A preference without a
//! `pattern` matches its own title.
//!
//! Mistakes (unknown level or color, invalid pattern, missing keys) are
//! reported by [`VideoprofConfig::make_attributes`] before any file is
//! analyzed.

use crate::attribute::{Attribute, CompositeAttribute, SingleAttribute, DEFAULT_RENDER};
use crate::error::{Result, VideoprofError};
use crate::level::Level;
use crate::preference::Preference;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::info;

const DEFAULT_CONFIG: &str = include_str!("default_config.json");

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoprofConfig {
    #[serde(default)]
    pub levels: BTreeMap<String, LevelConfig>,

    #[serde(default)]
    pub attributes: Vec<AttributeConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelConfig {
    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub flag: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeConfig {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_attribute: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_value: Option<String>,

    /// Child attributes; present only on composite attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeConfig>>,

    #[serde(default)]
    pub preferences: Vec<PreferenceConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreferenceConfig {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    pub level: String,
}

impl VideoprofConfig {
    /// The configuration bundled with the binary.
    pub fn bundled() -> Result<Self> {
        Ok(serde_json::from_str(DEFAULT_CONFIG)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Ensure directory exists
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Loads the config at `path`, writing the bundled default there first if
    /// the file does not exist yet.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        let config = Self::bundled()?;
        config.save(path)?;
        info!(path = %path.display(), "wrote default config");
        Ok(config)
    }

    /// Builds the attribute tree described by this config.
    pub fn make_attributes(&self) -> Result<Vec<Attribute>> {
        let levels = self.build_levels()?;
        self.attributes
            .iter()
            .map(|options| build_attribute(options, &levels))
            .collect()
    }

    fn build_levels(&self) -> Result<HashMap<&str, Level>> {
        self.levels
            .iter()
            .map(|(name, options)| {
                let level = Level::from_color_name(&options.color, options.flag)?;
                Ok((name.as_str(), level))
            })
            .collect()
    }
}

fn lookup_level(levels: &HashMap<&str, Level>, name: &str) -> Result<Level> {
    levels
        .get(name)
        .copied()
        .ok_or_else(|| VideoprofError::UnknownLevel(name.to_string()))
}

fn build_attribute(options: &AttributeConfig, levels: &HashMap<&str, Level>) -> Result<Attribute> {
    let default_level = match &options.default_level {
        Some(name) => lookup_level(levels, name)?,
        None => Level::default(),
    };
    let render = options
        .render
        .clone()
        .unwrap_or_else(|| DEFAULT_RENDER.to_string());

    let preferences = options
        .preferences
        .iter()
        .map(|p| {
            let pattern = p.pattern.as_deref().unwrap_or(&p.title);
            Preference::new(&p.title, pattern, lookup_level(levels, &p.level)?)
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(children) = &options.attributes {
        let children = children
            .iter()
            .map(|child| build_attribute(child, levels))
            .collect::<Result<Vec<_>>>()?;

        return Ok(Attribute::Composite(
            CompositeAttribute::new(&options.title, children)
                .with_default_level(default_level)
                .with_render(render)
                .with_preferences(preferences),
        ));
    }

    let required = |value: &Option<String>, key: &str| {
        value.clone().ok_or_else(|| {
            VideoprofError::Config(format!("Attribute '{}' is missing {}", options.title, key))
        })
    };
    let track_type = required(&options.track_type, "track_type")?;
    let track_attribute = required(&options.track_attribute, "track_attribute")?;

    let mut attribute = SingleAttribute::new(&options.title, track_type, track_attribute)
        .with_default_level(default_level)
        .with_render(render)
        .with_preferences(preferences);
    attribute.missing_value = options.missing_value.clone();

    Ok(Attribute::Single(attribute))
}

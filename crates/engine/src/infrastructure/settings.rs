//! Import settings loaded from the environment.
//!
//! Every field has a default, so an empty environment yields a working
//! configuration. Values that fail to parse are ignored with a warning.
//! CLI flags are applied on top by the binary.

use std::str::FromStr;

use tomebridge_domain::{MappingDefaults, Movement, DEFAULT_ACTOR_TYPE, UNNAMED_CHARACTER};

pub const ENV_IMPORT_FOLDER: &str = "TOMEBRIDGE_IMPORT_FOLDER";
pub const ENV_TARGET_FOLDER: &str = "TOMEBRIDGE_TARGET_FOLDER";
pub const ENV_INCLUDE_SUBFOLDERS: &str = "TOMEBRIDGE_INCLUDE_SUBFOLDERS";
pub const ENV_ACTOR_TYPE: &str = "TOMEBRIDGE_ACTOR_TYPE";
pub const ENV_SOURCE_LABEL: &str = "TOMEBRIDGE_SOURCE_LABEL";
pub const ENV_IMAGE_BASE: &str = "TOMEBRIDGE_IMAGE_BASE";
pub const ENV_PLACEHOLDER_NAME: &str = "TOMEBRIDGE_PLACEHOLDER_NAME";
pub const ENV_WALK_SPEED: &str = "TOMEBRIDGE_WALK_SPEED";
pub const ENV_MOVEMENT_UNITS: &str = "TOMEBRIDGE_MOVEMENT_UNITS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSettings {
    /// Staging folder that imports write into
    pub import_folder: String,
    /// Canonical folder that merges move into
    pub target_folder: String,
    pub include_subfolders: bool,
    pub actor_type: String,
    /// Recorded in each actor's import provenance flag
    pub source_label: String,
    /// Base path probed for images
    pub image_base: String,
    pub placeholder_name: String,
    pub walk_speed: u32,
    pub movement_units: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            import_folder: "Tome".to_string(),
            target_folder: "NPCs".to_string(),
            include_subfolders: false,
            actor_type: DEFAULT_ACTOR_TYPE.to_string(),
            source_label: "characters.json".to_string(),
            image_base: "assets/images/dnd/characters".to_string(),
            placeholder_name: UNNAMED_CHARACTER.to_string(),
            walk_speed: 30,
            movement_units: "ft".to_string(),
        }
    }
}

impl ImportSettings {
    /// Defaults overridden by `TOMEBRIDGE_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(val) = lookup(ENV_IMPORT_FOLDER) {
            settings.import_folder = val;
        }
        if let Some(val) = lookup(ENV_TARGET_FOLDER) {
            settings.target_folder = val;
        }
        if let Some(val) = lookup(ENV_ACTOR_TYPE) {
            settings.actor_type = val;
        }
        if let Some(val) = lookup(ENV_SOURCE_LABEL) {
            settings.source_label = val;
        }
        if let Some(val) = lookup(ENV_IMAGE_BASE) {
            settings.image_base = val;
        }
        if let Some(val) = lookup(ENV_PLACEHOLDER_NAME) {
            settings.placeholder_name = val;
        }
        if let Some(val) = lookup(ENV_MOVEMENT_UNITS) {
            settings.movement_units = val;
        }
        if let Some(flag) = parse_var::<bool>(&lookup, ENV_INCLUDE_SUBFOLDERS) {
            settings.include_subfolders = flag;
        }
        if let Some(speed) = parse_var::<u32>(&lookup, ENV_WALK_SPEED) {
            settings.walk_speed = speed;
        }

        settings
    }

    /// Constants stamped onto every imported actor.
    pub fn mapping_defaults(&self) -> MappingDefaults {
        MappingDefaults {
            actor_type: self.actor_type.clone(),
            placeholder_name: self.placeholder_name.clone(),
            source_label: self.source_label.clone(),
            movement: Movement {
                walk: self.walk_speed,
                units: self.movement_units.clone(),
            },
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let val = lookup(key)?;
    match val.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, val = %val, "Invalid environment value, using default");
            None
        }
    }
}

/// Load `.env.local` then `.env` from the working directory, if present.
///
/// Variables already set in the process take precedence.
pub fn load_dotenv() {
    for name in [".env.local", ".env"] {
        match dotenvy::from_filename(name) {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(file = name, error = %e, "Failed to load environment file"),
        }
    }
}

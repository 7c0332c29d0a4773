//! Session defaults for the course store.
//!
//! # Responsibility
//! - Hold creation defaults (subtitles, icons, fallback titles).
//! - Hold the reserved sentinel id used to stage a new lesson's icon.
//!
//! # Invariants
//! - Every field has a default, so partial config documents deserialize.
//! - The sentinel id is never blank and never looks like a generated id.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default sentinel id for the icon of a lesson that is not created yet.
pub const NEW_LESSON_ICON_TARGET: &str = "new-lesson-icon";

const GENERATED_ID_PREFIXES: &[&str] = &["course-", "sec-", "les-"];

/// Rejected store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required text field is blank after trim.
    BlankField(&'static str),
    /// Sentinel id could collide with generated entity ids.
    SentinelCollides(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "config field `{field}` must not be blank"),
            Self::SentinelCollides(value) => write!(
                f,
                "sentinel id `{value}` uses a prefix reserved for generated ids"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Creation defaults and reserved ids for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub course_subtitle: String,
    pub course_icon: String,
    /// Used when a section is created with a blank title.
    pub section_title: String,
    pub section_icon: String,
    pub lesson_icon: String,
    pub new_lesson_icon_target: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            course_subtitle: "Course module".to_string(),
            course_icon: "📚".to_string(),
            section_title: "New Section".to_string(),
            section_icon: "📑".to_string(),
            lesson_icon: "📄".to_string(),
            new_lesson_icon_target: NEW_LESSON_ICON_TARGET.to_string(),
        }
    }
}

impl StoreConfig {
    /// Checks the invariants above.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("section_title", &self.section_title),
            ("lesson_icon", &self.lesson_icon),
            ("new_lesson_icon_target", &self.new_lesson_icon_target),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::BlankField(field));
            }
        }
        if GENERATED_ID_PREFIXES
            .iter()
            .any(|prefix| self.new_lesson_icon_target.starts_with(prefix))
        {
            return Err(ConfigError::SentinelCollides(
                self.new_lesson_icon_target.clone(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, NEW_LESSON_ICON_TARGET};

    #[test]
    fn defaults_are_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.new_lesson_icon_target, NEW_LESSON_ICON_TARGET);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config: StoreConfig =
            serde_json::from_value(serde_json::json!({ "lesson_icon": "📝" })).unwrap();
        assert_eq!(config.lesson_icon, "📝");
        assert_eq!(config.course_subtitle, "Course module");
    }

    #[test]
    fn sentinel_must_not_look_generated() {
        let config = StoreConfig {
            new_lesson_icon_target: "les-draft".to_string(),
            ..StoreConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SentinelCollides("les-draft".to_string()))
        );
    }
}

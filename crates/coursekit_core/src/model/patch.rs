//! Partial-field updates.
//!
//! # Responsibility
//! - Carry the subset of mutable fields one UI action wants to overwrite.
//! - Merge a patch into a single entity with shallow, field-by-field semantics.
//!
//! # Invariants
//! - Fields left as `None` are never touched.
//! - A patch is checked in full before any field is written, so a rejected
//!   patch leaves the entity unchanged.

use crate::model::course::{Course, Lesson, Section, VideoRef};
use crate::model::id::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for one patch against one entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// Supplied title is blank after trim.
    BlankTitle,
    /// Supplied icon is blank after trim. Use `clear_icon` to remove one.
    BlankIcon,
    /// Patch names a field the target kind does not have.
    FieldNotApplicable {
        kind: EntityKind,
        field: &'static str,
    },
}

impl Display for PatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::BlankIcon => write!(f, "icon must not be blank"),
            Self::FieldNotApplicable { kind, field } => {
                write!(f, "field `{field}` does not exist on {kind}")
            }
        }
    }
}

impl Error for PatchError {}

/// Shallow partial update.
///
/// Clearable optional fields use `Option<Option<_>>`: outer `None` means
/// "not supplied", `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub icon: Option<Option<String>>,
    pub banner: Option<Option<String>>,
    pub is_open: Option<bool>,
    pub video: Option<Option<VideoRef>>,
    pub content: Option<Option<String>>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(Some(icon.into()));
        self
    }

    pub fn clear_icon(mut self) -> Self {
        self.icon = Some(None);
        self
    }

    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(Some(banner.into()));
        self
    }

    pub fn clear_banner(mut self) -> Self {
        self.banner = Some(None);
        self
    }

    pub fn with_open(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }

    pub fn with_video(mut self, video: VideoRef) -> Self {
        self.video = Some(Some(video));
        self
    }

    pub fn clear_video(mut self) -> Self {
        self.video = Some(None);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(Some(content.into()));
        self
    }

    /// Returns whether no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.supplied_fields().is_empty()
    }

    /// Names of the fields this patch overwrites, for logs.
    pub fn supplied_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("title");
        }
        if self.subtitle.is_some() {
            fields.push("subtitle");
        }
        if self.icon.is_some() {
            fields.push("icon");
        }
        if self.banner.is_some() {
            fields.push("banner");
        }
        if self.is_open.is_some() {
            fields.push("is_open");
        }
        if self.video.is_some() {
            fields.push("video");
        }
        if self.content.is_some() {
            fields.push("content");
        }
        fields
    }

    fn check(&self, kind: EntityKind, allowed: &[&'static str]) -> Result<(), PatchError> {
        if let Some(field) = self
            .supplied_fields()
            .into_iter()
            .find(|field| !allowed.contains(field))
        {
            return Err(PatchError::FieldNotApplicable { kind, field });
        }
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(PatchError::BlankTitle);
            }
        }
        if let Some(Some(icon)) = &self.icon {
            if icon.trim().is_empty() {
                return Err(PatchError::BlankIcon);
            }
        }
        Ok(())
    }
}

/// Entity that accepts a shallow patch merge.
pub trait Patchable {
    /// Merges `patch` into `self`, or rejects it without touching `self`.
    fn apply_patch(&mut self, patch: &Patch) -> Result<(), PatchError>;
}

impl Patchable for Course {
    fn apply_patch(&mut self, patch: &Patch) -> Result<(), PatchError> {
        patch.check(EntityKind::Course, &["title", "subtitle", "icon", "banner"])?;
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(subtitle) = &patch.subtitle {
            self.subtitle = subtitle.clone();
        }
        if let Some(icon) = &patch.icon {
            self.icon = icon.clone();
        }
        if let Some(banner) = &patch.banner {
            self.banner = banner.clone();
        }
        Ok(())
    }
}

impl Patchable for Section {
    fn apply_patch(&mut self, patch: &Patch) -> Result<(), PatchError> {
        patch.check(EntityKind::Section, &["title", "icon", "is_open"])?;
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(icon) = &patch.icon {
            self.icon = icon.clone();
        }
        if let Some(is_open) = patch.is_open {
            self.is_open = is_open;
        }
        Ok(())
    }
}

impl Patchable for Lesson {
    fn apply_patch(&mut self, patch: &Patch) -> Result<(), PatchError> {
        patch.check(EntityKind::Lesson, &["title", "icon", "video", "content"])?;
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(icon) = &patch.icon {
            self.icon = icon.clone();
        }
        if let Some(video) = &patch.video {
            self.video = video.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Patch, PatchError, Patchable};
    use crate::model::course::{Lesson, Section};
    use crate::model::id::EntityKind;

    #[test]
    fn patch_overwrites_only_supplied_fields() {
        let mut lesson = Lesson::new("Ownership", Some("📄".to_string()));
        lesson
            .apply_patch(&Patch::new().with_content("body"))
            .unwrap();

        assert_eq!(lesson.title, "Ownership");
        assert_eq!(lesson.icon.as_deref(), Some("📄"));
        assert_eq!(lesson.content.as_deref(), Some("body"));
    }

    #[test]
    fn rejected_patch_leaves_entity_untouched() {
        let mut section = Section::new("Intro", None);
        let before = section.clone();

        let err = section
            .apply_patch(&Patch::new().with_icon("🔥").with_content("nope"))
            .unwrap_err();

        assert_eq!(
            err,
            PatchError::FieldNotApplicable {
                kind: EntityKind::Section,
                field: "content",
            }
        );
        assert_eq!(section, before);
    }

    #[test]
    fn blank_title_is_rejected_and_title_is_trimmed_otherwise() {
        let mut lesson = Lesson::new("Old", None);
        assert_eq!(
            lesson.apply_patch(&Patch::new().with_title("   ")),
            Err(PatchError::BlankTitle)
        );

        lesson.apply_patch(&Patch::new().with_title("  New ")).unwrap();
        assert_eq!(lesson.title, "New");
    }

    #[test]
    fn clear_icon_removes_value() {
        let mut lesson = Lesson::new("L", Some("📄".to_string()));
        lesson.apply_patch(&Patch::new().clear_icon()).unwrap();
        assert_eq!(lesson.icon, None);
    }

    #[test]
    fn blank_icon_is_rejected_but_clearing_is_allowed() {
        let mut section = Section::new("S", Some("📑".to_string()));
        assert_eq!(
            section.apply_patch(&Patch::new().with_icon("  ")),
            Err(PatchError::BlankIcon)
        );
        assert_eq!(section.icon.as_deref(), Some("📑"));

        section.apply_patch(&Patch::new().clear_icon()).unwrap();
        assert_eq!(section.icon, None);
    }
}

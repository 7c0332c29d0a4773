//! Session store facade.
//!
//! # Responsibility
//! - Own the current snapshot and hand it out as an immutable `Arc`.
//! - Validate UI input before it reaches the tree algorithms.
//! - Keep selection, pending picker target and drag gesture in step with
//!   every new snapshot.
//!
//! # Invariants
//! - Every write goes through `tree::*` path-copy functions; the current
//!   snapshot is replaced, never edited.
//! - Unknown ids are silent no-ops returning the current snapshot.
//! - Rejected input returns `Err` and keeps the current snapshot.
//! - Selection is reconciled after each replacement.

use crate::config::{ConfigError, StoreConfig};
use crate::model::course::{Course, Lesson, Section};
use crate::model::id::{EntityId, EntityKind};
use crate::model::patch::{Patch, PatchError};
use crate::model::snapshot::Snapshot;
use crate::service::drag::{DragOutcome, DragSession, DragSlot, DragState, DropIndicator};
use crate::service::selection::{Selection, View};
use crate::service::target_router::{
    AnchorRef, Dispatch, LessonDraft, PendingTarget, RouterError, TargetRouter,
};
use crate::tree::{self, Located, TreeError};
use crate::video::{VideoError, VideoInput};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Result type used by store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Rejected store operation. The current snapshot is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Title is blank after trim.
    BlankTitle,
    /// Rename to the title the entity already has.
    UnchangedTitle(EntityId),
    /// Icon is blank after trim.
    BlankIcon,
    /// Lesson draft commit without an open draft.
    NoLessonDraft,
    /// Tree-level invalid input.
    Tree(TreeError),
    /// Malformed video input.
    Video(VideoError),
    /// Picker resolution failure.
    Router(RouterError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::UnchangedTitle(id) => write!(f, "title of {id} is unchanged"),
            Self::BlankIcon => write!(f, "icon must not be blank"),
            Self::NoLessonDraft => write!(f, "no lesson draft is open"),
            Self::Tree(err) => write!(f, "{err}"),
            Self::Video(err) => write!(f, "{err}"),
            Self::Router(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
            Self::Video(err) => Some(err),
            Self::Router(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TreeError> for StoreError {
    fn from(value: TreeError) -> Self {
        match value {
            TreeError::Patch(PatchError::BlankTitle) => Self::BlankTitle,
            TreeError::Patch(PatchError::BlankIcon) => Self::BlankIcon,
            other => Self::Tree(other),
        }
    }
}

impl From<VideoError> for StoreError {
    fn from(value: VideoError) -> Self {
        Self::Video(value)
    }
}

impl From<RouterError> for StoreError {
    fn from(value: RouterError) -> Self {
        Self::Router(value)
    }
}

/// In-memory course tree for one authoring session.
pub struct CourseStore {
    config: StoreConfig,
    snapshot: Arc<Snapshot>,
    selection: Selection,
    router: TargetRouter,
    drag: DragSession,
}

impl Default for CourseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseStore {
    /// Creates an empty store with default config.
    pub fn new() -> Self {
        Self::build(StoreConfig::default())
    }

    /// Creates an empty store with `config`.
    pub fn try_with_config(config: StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: StoreConfig) -> Self {
        let router = TargetRouter::new(
            config.new_lesson_icon_target.clone(),
            config.lesson_icon.clone(),
        );
        Self {
            config,
            snapshot: Arc::new(Snapshot::default()),
            selection: Selection::new(),
            router,
            drag: DragSession::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current snapshot. Hold it as long as needed; it never changes.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    // --- Locator -------------------------------------------------------

    pub fn find_by_id(&self, id: &EntityId) -> Option<Located<'_>> {
        tree::locate(&self.snapshot, id)
    }

    // --- Mutation ------------------------------------------------------

    /// Merges `patch` into entity `id`.
    pub fn apply_update(&mut self, id: &EntityId, patch: &Patch) -> StoreResult<Arc<Snapshot>> {
        if self.find_by_id(id).is_none() {
            debug!("event=apply_update module=store status=noop reason=not_found id={id}");
            return Ok(self.snapshot());
        }
        if patch.is_empty() {
            return Ok(self.snapshot());
        }
        let next = tree::apply_update(&self.snapshot, id, patch).map_err(|err| {
            warn!("event=apply_update module=store status=rejected id={id} error={err}");
            StoreError::from(err)
        })?;
        debug!(
            "event=apply_update module=store status=ok id={id} fields={}",
            patch.supplied_fields().join(",")
        );
        Ok(self.replace(next))
    }

    /// Renames entity `id`. Blank or unchanged titles are rejected.
    pub fn rename(&mut self, id: &EntityId, title: &str) -> StoreResult<Arc<Snapshot>> {
        let Some(hit) = self.find_by_id(id) else {
            debug!("event=rename module=store status=noop reason=not_found id={id}");
            return Ok(self.snapshot());
        };
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::BlankTitle);
        }
        if title == hit.title() {
            return Err(StoreError::UnchangedTitle(id.clone()));
        }
        self.apply_update(id, &Patch::new().with_title(title))
    }

    /// Flips a section's open state.
    pub fn toggle_section(&mut self, id: &EntityId) -> StoreResult<Arc<Snapshot>> {
        let is_open = match self.find_by_id(id) {
            None => {
                debug!("event=toggle_section module=store status=noop reason=not_found id={id}");
                return Ok(self.snapshot());
            }
            Some(Located::Section { section, .. }) => section.is_open,
            Some(other) => {
                return Err(StoreError::Tree(TreeError::WrongKind {
                    id: id.clone(),
                    expected: EntityKind::Section,
                    found: other.kind(),
                }));
            }
        };
        self.apply_update(id, &Patch::new().with_open(!is_open))
    }

    /// Sets or clears a course banner image reference.
    pub fn set_banner(
        &mut self,
        course_id: &EntityId,
        banner: Option<String>,
    ) -> StoreResult<Arc<Snapshot>> {
        let patch = match banner {
            Some(banner) => Patch::new().with_banner(banner),
            None => Patch::new().clear_banner(),
        };
        self.apply_update(course_id, &patch)
    }

    /// Validates `input` and attaches the resulting video to a lesson.
    pub fn attach_video(
        &mut self,
        lesson_id: &EntityId,
        input: &VideoInput,
    ) -> StoreResult<Arc<Snapshot>> {
        let video = input.parse().map_err(|err| {
            warn!(
                "event=attach_video module=store status=rejected id={} error=malformed_input",
                lesson_id
            );
            StoreError::from(err)
        })?;
        self.apply_update(lesson_id, &Patch::new().with_video(video))
    }

    pub fn detach_video(&mut self, lesson_id: &EntityId) -> StoreResult<Arc<Snapshot>> {
        self.apply_update(lesson_id, &Patch::new().clear_video())
    }

    /// Replaces a lesson body. Writing the same body is a no-op.
    pub fn update_lesson_content(
        &mut self,
        lesson_id: &EntityId,
        content: &str,
    ) -> StoreResult<Arc<Snapshot>> {
        if let Some(Located::Lesson { lesson, .. }) = self.find_by_id(lesson_id) {
            if lesson.content.as_deref() == Some(content) {
                return Ok(self.snapshot());
            }
        }
        self.apply_update(lesson_id, &Patch::new().with_content(content))
    }

    // --- Structure -----------------------------------------------------

    /// Creates an empty course with default subtitle and icon.
    pub fn create_course(&mut self, title: &str) -> StoreResult<EntityId> {
        let title = non_blank_title(title)?;
        let course = Course::new(
            title,
            self.config.course_subtitle.clone(),
            Some(self.config.course_icon.clone()),
        );
        self.import_course(course)
    }

    /// Appends a prebuilt course, keeping ids unique. Used for seeding.
    ///
    /// Ids equal to the new-lesson icon sentinel are rejected so picker
    /// routing stays unambiguous.
    pub fn import_course(&mut self, course: Course) -> StoreResult<EntityId> {
        let id = course.id.clone();
        let next = tree::ensure_not_reserved(&course, self.router.sentinel())
            .and_then(|()| tree::insert_course(&self.snapshot, course))
            .map_err(|err| {
                warn!("event=course_create module=store status=rejected id={id} error={err}");
                StoreError::from(err)
            })?;
        self.replace(next);
        info!("event=course_create module=store status=ok id={id}");
        Ok(id)
    }

    /// Appends an open, empty section to `course_id`.
    ///
    /// A blank title falls back to the configured default. Returns `None`
    /// when the course no longer exists.
    pub fn create_section(
        &mut self,
        course_id: &EntityId,
        title: &str,
    ) -> StoreResult<Option<EntityId>> {
        let title = match title.trim() {
            "" => self.config.section_title.clone(),
            trimmed => trimmed.to_string(),
        };
        let section = Section::new(title, Some(self.config.section_icon.clone()));
        let id = section.id.clone();
        let Some(next) = tree::insert_section(&self.snapshot, course_id, section)? else {
            debug!(
                "event=section_create module=store status=noop reason=not_found parent={}",
                course_id
            );
            return Ok(None);
        };
        self.replace(next);
        info!("event=section_create module=store status=ok id={id} parent={course_id}");
        Ok(Some(id))
    }

    /// Appends a lesson to `section_id` and selects it.
    ///
    /// Returns `None` when the section no longer exists.
    pub fn create_lesson(
        &mut self,
        section_id: &EntityId,
        title: &str,
        icon: &str,
    ) -> StoreResult<Option<EntityId>> {
        let title = non_blank_title(title)?;
        let icon = icon.trim();
        if icon.is_empty() {
            return Err(StoreError::BlankIcon);
        }
        let lesson = Lesson::new(title, Some(icon.to_string()));
        let id = lesson.id.clone();
        let Some(next) = tree::insert_lesson(&self.snapshot, section_id, lesson)? else {
            debug!(
                "event=lesson_create module=store status=noop reason=not_found parent={}",
                section_id
            );
            return Ok(None);
        };
        self.replace(next);
        self.selection.select_lesson(&self.snapshot, &id);
        info!("event=lesson_create module=store status=ok id={id} parent={section_id}");
        Ok(Some(id))
    }

    pub fn delete_course(&mut self, id: &EntityId) -> StoreResult<Arc<Snapshot>> {
        self.delete(id, EntityKind::Course)
    }

    pub fn delete_section(&mut self, id: &EntityId) -> StoreResult<Arc<Snapshot>> {
        self.delete(id, EntityKind::Section)
    }

    pub fn delete_lesson(&mut self, id: &EntityId) -> StoreResult<Arc<Snapshot>> {
        self.delete(id, EntityKind::Lesson)
    }

    fn delete(&mut self, id: &EntityId, kind: EntityKind) -> StoreResult<Arc<Snapshot>> {
        let Some(next) = tree::remove(&self.snapshot, id, kind)? else {
            debug!("event={kind}_delete module=store status=noop reason=not_found id={id}");
            return Ok(self.snapshot());
        };
        let removed = self.snapshot.ids().len() - next.ids().len();
        info!("event={kind}_delete module=store status=ok id={id} removed={removed}");
        Ok(self.replace(next))
    }

    // --- Reorder -------------------------------------------------------

    /// Reorders the children of `container_id` (course sections or section
    /// lessons) from `from` to `to`.
    pub fn reorder(
        &mut self,
        container_id: &EntityId,
        from: usize,
        to: usize,
    ) -> StoreResult<Arc<Snapshot>> {
        let next = tree::reorder_children(&self.snapshot, container_id, from, to).map_err(|err| {
            warn!(
                "event=reorder module=store status=rejected container={} error={}",
                container_id, err
            );
            StoreError::from(err)
        })?;
        let Some(next) = next else {
            debug!(
                "event=reorder module=store status=noop reason=not_found container={}",
                container_id
            );
            return Ok(self.snapshot());
        };
        if from == to {
            return Ok(self.snapshot());
        }
        debug!("event=reorder module=store status=ok container={container_id} from={from} to={to}");
        Ok(self.replace(next))
    }

    pub fn start_drag(&mut self, container_id: &EntityId, index: usize) {
        if let Some(replaced) = self.drag.start(container_id.clone(), index) {
            debug!(
                "event=drag_cancel module=drag status=ok reason=replaced container={}",
                replaced.container_id
            );
        }
    }

    /// Pointer over `index` of `container_id`. Returns whether the drop
    /// indicator is now shown there.
    pub fn drag_over(&mut self, container_id: &EntityId, index: usize) -> bool {
        self.drag.hover(container_id, index)
    }

    pub fn drag_leave(&mut self) {
        self.drag.leave();
    }

    /// Finishes the gesture and applies the resulting reorder, if any.
    pub fn drop_drag(
        &mut self,
        container_id: &EntityId,
        index: usize,
    ) -> StoreResult<Arc<Snapshot>> {
        match self.drag.drop(container_id, index) {
            DragOutcome::Reorder {
                container_id,
                from,
                to,
            } => self.reorder(&container_id, from, to),
            DragOutcome::NoChange => Ok(self.snapshot()),
        }
    }

    /// Ends the gesture without a drop. Returns whether a drag was active.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel()
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn drag_source(&self) -> Option<&DragSlot> {
        match self.drag.state() {
            DragState::Idle => None,
            DragState::Dragging { source } | DragState::Over { source, .. } => Some(source),
        }
    }

    pub fn drop_indicator(&self) -> Option<DropIndicator> {
        self.drag.drop_indicator()
    }

    // --- Selection -----------------------------------------------------

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Opens course `id`; unknown ids are ignored.
    pub fn select_course(&mut self, id: &EntityId) -> bool {
        let selected = self.selection.select_course(&self.snapshot, id);
        if !selected {
            debug!("event=select_course module=selection status=noop reason=not_found id={id}");
        }
        selected
    }

    /// Selects lesson `id`; unknown ids are ignored.
    pub fn select_lesson(&mut self, id: &EntityId) -> bool {
        let selected = self.selection.select_lesson(&self.snapshot, id);
        if !selected {
            debug!("event=select_lesson module=selection status=noop reason=not_found id={id}");
        }
        selected
    }

    pub fn navigate(&mut self, view: View) {
        self.selection.navigate(view);
    }

    pub fn current_course(&self) -> Option<&Arc<Course>> {
        self.selection.current_course(&self.snapshot)
    }

    pub fn current_section(&self) -> Option<&Arc<Section>> {
        self.selection.current_section(&self.snapshot)
    }

    pub fn current_lesson(&self) -> Option<&Arc<Lesson>> {
        self.selection.current_lesson(&self.snapshot)
    }

    // --- Pending target ------------------------------------------------

    /// Opens a picker writing to `id`, which may be the new-lesson sentinel.
    pub fn open_target(&mut self, id: &str, anchor: AnchorRef) {
        if self.router.open(id, anchor).is_some() {
            debug!("event=target_replace module=router status=ok");
        }
    }

    /// Routes a picked value to its target.
    pub fn resolve_target(&mut self, value: &str) -> StoreResult<Arc<Snapshot>> {
        match self.router.resolve(value)? {
            Dispatch::ApplyIcon { id, icon } => {
                self.apply_update(&id, &Patch::new().with_icon(icon))
            }
            Dispatch::Staged => Ok(self.snapshot()),
        }
    }

    /// Closes the picker without a value. Returns whether one was open.
    pub fn close_target(&mut self) -> bool {
        self.router.close().is_some()
    }

    pub fn pending_target(&self) -> Option<&PendingTarget> {
        self.router.pending()
    }

    /// Sentinel id that routes a picked icon to the lesson draft.
    pub fn new_lesson_icon_target(&self) -> &str {
        self.router.sentinel()
    }

    /// Starts a lesson draft in `section_id` with the default icon staged.
    pub fn begin_lesson_draft(&mut self, section_id: &EntityId) {
        self.router.begin_draft(section_id.clone());
    }

    pub fn lesson_draft(&self) -> Option<&LessonDraft> {
        self.router.draft()
    }

    pub fn staged_lesson_icon(&self) -> &str {
        self.router.staged_lesson_icon()
    }

    /// Creates the drafted lesson with the staged icon.
    ///
    /// A rejected title keeps the draft open for another attempt.
    pub fn commit_lesson_draft(&mut self, title: &str) -> StoreResult<Option<EntityId>> {
        let (draft, icon) = self.router.take_draft().ok_or(StoreError::NoLessonDraft)?;
        match self.create_lesson(&draft.section_id, title, &icon) {
            Err(err) => {
                self.router.restore_draft(draft);
                Err(err)
            }
            created => created,
        }
    }

    pub fn discard_lesson_draft(&mut self) -> bool {
        self.router.discard_draft().is_some()
    }

    fn replace(&mut self, next: Snapshot) -> Arc<Snapshot> {
        let previous = std::mem::replace(&mut self.snapshot, Arc::new(next));
        if let Some(container) = self.drag_source().map(|source| source.container_id.clone()) {
            // Captured indices are stale once the sibling list changed.
            if child_ids(&previous, &container) != child_ids(&self.snapshot, &container) {
                self.drag.cancel();
                debug!(
                    "event=drag_cancel module=drag status=ok reason=stale container={}",
                    container
                );
            }
        }
        if self.selection.reconcile(&self.snapshot) {
            debug!(
                "event=selection_reconcile module=selection status=ok view={:?}",
                self.selection.view()
            );
        }
        self.snapshot()
    }
}

fn child_ids<'a>(snapshot: &'a Snapshot, container_id: &EntityId) -> Option<Vec<&'a EntityId>> {
    match tree::locate(snapshot, container_id)? {
        Located::Course { course, .. } => {
            Some(course.sections.iter().map(|section| &section.id).collect())
        }
        Located::Section { section, .. } => {
            Some(section.lessons.iter().map(|lesson| &lesson.id).collect())
        }
        Located::Lesson { .. } => None,
    }
}

fn non_blank_title(title: &str) -> StoreResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::BlankTitle);
    }
    Ok(trimmed.to_string())
}

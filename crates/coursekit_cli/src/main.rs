//! CLI smoke entry point.
//!
//! # Responsibility
//! - Drive `coursekit_core` through one scripted authoring session.
//! - Print the resulting snapshot as JSON for quick local sanity checks.
//!
//! Usage: `coursekit_cli [config.json]`. Set `COURSEKIT_LOG_DIR` (absolute)
//! to enable file logging; `COURSEKIT_LOG_LEVEL` overrides the level.

use coursekit_core::{
    default_log_level, init_logging, AnchorRef, Course, CourseStore, EntityId, Lesson,
    Section, StoreConfig, VideoInput,
};
use log::info;
use std::error::Error;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "COURSEKIT_LOG_DIR";
const LOG_LEVEL_ENV: &str = "COURSEKIT_LOG_LEVEL";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("coursekit_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().into());
        init_logging(&level, &log_dir)?;
    }

    let config = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str::<StoreConfig>(&std::fs::read_to_string(path)?)?,
        None => StoreConfig::default(),
    };
    let mut store = CourseStore::try_with_config(config)?;
    println!("coursekit_core version={}", coursekit_core::core_version());

    let course_id = store.import_course(demo_course())?;
    store.select_course(&course_id);

    let section_id = store
        .create_section(&course_id, "Going further")?
        .ok_or("demo course vanished")?;
    store.begin_lesson_draft(&section_id);
    let sentinel = store.new_lesson_icon_target().to_string();
    store.open_target(&sentinel, AnchorRef::from("cli"));
    store.resolve_target("🎯")?;
    let lesson_id = store
        .commit_lesson_draft("Error handling")?
        .ok_or("draft section vanished")?;
    store.attach_video(
        &lesson_id,
        &VideoInput::RemoteUrl("https://youtu.be/dQw4w9WgXcQ".to_string()),
    )?;

    // Move "Ownership" to the end of the first section by drag.
    let first_section = EntityId::from("sec-demo-basics");
    store.start_drag(&first_section, 1);
    store.drag_over(&first_section, 2);
    store.drop_drag(&first_section, 2)?;

    let snapshot = store.snapshot();
    info!(
        "event=cli_session module=cli status=ok courses={} lessons={}",
        snapshot.courses().len(),
        snapshot
            .courses()
            .iter()
            .map(|course| course.lesson_count())
            .sum::<usize>()
    );
    println!("{}", serde_json::to_string_pretty(&*snapshot)?);
    Ok(())
}

fn demo_course() -> Course {
    Course::with_id(
        "course-demo".into(),
        "Rust in practice",
        "Course module",
        Some("🦀".to_string()),
    )
    .push_section(
        Section::with_id("sec-demo-basics".into(), "Basics", Some("📑".to_string()))
            .push_lesson(Lesson::with_id("les-demo-intro".into(), "Intro", None))
            .push_lesson(Lesson::with_id("les-demo-own".into(), "Ownership", None))
            .push_lesson(Lesson::with_id("les-demo-borrow".into(), "Borrowing", None)),
    )
}

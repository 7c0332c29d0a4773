use coursekit_core::{init_logging, logging_status, CourseStore, LoggingError};
use tempfile::TempDir;

// Logging state is process-wide, so every scenario lives in one test.
#[test]
fn init_is_idempotent_and_rejects_reconfiguration() {
    let dir = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    let log_dir = dir.path().join("logs");
    let log_dir = log_dir.to_str().unwrap();

    assert!(matches!(
        init_logging("info", "relative/logs"),
        Err(LoggingError::RelativeLogDir(_))
    ));
    assert!(logging_status().is_none());

    init_logging("info", log_dir).unwrap();
    init_logging(" INFO ", log_dir).unwrap();

    let (level, active_dir) = logging_status().unwrap();
    assert_eq!(level, "info");
    assert_eq!(active_dir.to_str().unwrap(), log_dir);
    assert!(active_dir.is_dir());

    assert!(matches!(
        init_logging("debug", log_dir),
        Err(LoggingError::AlreadyInitialized { .. })
    ));
    assert!(matches!(
        init_logging("info", other.path().to_str().unwrap()),
        Err(LoggingError::AlreadyInitialized { .. })
    ));

    let mut store = CourseStore::new();
    store.create_course("Logged").unwrap();
    log::logger().flush();

    let has_log_file = std::fs::read_dir(&active_dir)
        .unwrap()
        .filter_map(Result::ok)
        .any(|entry| entry.file_name().to_string_lossy().starts_with("coursekit"));
    assert!(has_log_file);
}

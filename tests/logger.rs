//! Tests for logger handles.

use modlog::{Level, Logger, MemoryOutput, Registry};

fn registry(output: &MemoryOutput) -> Registry {
    Registry::builder()
        .format("%{level} %{module} %{message}")
        .output(output.clone())
        .build()
        .unwrap()
}

#[test]
fn handle_is_send_sync_and_clone() {
    fn assert_traits<T: Send + Sync + Clone>() {}
    assert_traits::<Logger>();
    assert_traits::<Registry>();
}

#[test]
fn handle_reports_module_and_level() {
    let output = MemoryOutput::new();
    let registry = registry(&output);
    let logger = registry.logger("db.pool").unwrap();
    assert_eq!(logger.module(), "db.pool");
    assert_eq!(logger.level(), Level::Info);
    assert!(logger.is_enabled_for(Level::Info));
    assert!(!logger.is_enabled_for(Level::Debug));
}

#[test]
fn each_severity_method_uses_its_level() {
    let output = MemoryOutput::new();
    let registry = registry(&output);
    registry.set_level("m", "debug").unwrap();
    let logger = registry.logger("m").unwrap();

    logger.debug("d");
    logger.info("i");
    logger.notice("n");
    logger.warning("w");
    logger.error("e");
    logger.critical("c");

    assert_eq!(
        output.lines(),
        vec![
            "DEBUG m d".to_string(),
            "INFO m i".to_string(),
            "NOTICE m n".to_string(),
            "WARNING m w".to_string(),
            "ERROR m e".to_string(),
            "CRITICAL m c".to_string(),
        ]
    );
}

#[test]
fn log_macro_takes_level_expression() {
    let output = MemoryOutput::new();
    let registry = registry(&output);
    let logger = registry.logger("m").unwrap();
    let level = Level::Notice;
    modlog::log!(logger, level, "value={}", 7);
    modlog::warning!(&logger, "ref works");
    assert_eq!(
        output.lines(),
        vec!["NOTICE m value=7".to_string(), "WARNING m ref works".to_string()]
    );
}

#[test]
fn handles_survive_reset() {
    let output = MemoryOutput::new();
    let registry = registry(&output);
    let logger = registry.logger("m").unwrap();
    registry.set_level("m", "critical").unwrap();

    registry.reset();
    assert_eq!(logger.level(), Level::Info);
    assert!(!registry.is_registered("m"));
}

//! Tests for output destinations.

use modlog::output::Stream;
use modlog::{Destination, FileOutput, MemoryOutput, Output, TerminalOutput};
use std::fs;
use tempfile::TempDir;

#[test]
fn destination_from_text() {
    assert_eq!(Destination::from("stderr"), Destination::Stderr);
    assert_eq!(Destination::from(""), Destination::Stderr);
    assert_eq!(Destination::from("stdout"), Destination::Stdout);
    assert_eq!(
        Destination::from("/var/log/app.log"),
        Destination::File("/var/log/app.log".to_string())
    );
}

#[test]
fn file_output_creates_parents_and_appends() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a").join("b").join("out.log");

    {
        let output = FileOutput::open(path.to_string_lossy()).unwrap();
        output.write_line("one").unwrap();
        output.flush().unwrap();
    }
    {
        let output = FileOutput::open(path.to_string_lossy()).unwrap();
        output.write_line("two").unwrap();
    }

    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
}

#[test]
fn memory_output_shares_buffer_between_clones() {
    let output = MemoryOutput::new();
    let clone = output.clone();
    clone.write_line("x").unwrap();
    assert_eq!(output.lines(), vec!["x".to_string()]);
    output.clear();
    assert!(clone.is_empty());
}

#[test]
fn terminal_colors_toggle() {
    let output = TerminalOutput::new(Stream::Stdout);
    assert!(output.supports_color());
    assert!(!output.colors(false).supports_color());
    assert!(!MemoryOutput::new().supports_color());
}

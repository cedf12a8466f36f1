#![no_main]
use libfuzzer_sys::fuzz_target;
use modlog::fmt::Formatter;

fuzz_target!(|data: &str| {
    // Must return Ok or Err, never panic
    let _ = Formatter::parse(data);
});

#![no_main]
use libfuzzer_sys::fuzz_target;
use modlog::config::Config;

fuzz_target!(|data: &str| {
    let _ = data.parse::<Config>();
});

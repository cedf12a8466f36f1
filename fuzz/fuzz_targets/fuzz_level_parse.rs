#![no_main]
use libfuzzer_sys::fuzz_target;
use modlog::Level;

fuzz_target!(|data: &str| {
    if let Ok(level) = data.parse::<Level>() {
        assert_eq!(level.as_str().parse::<Level>(), Ok(level));
    }
});

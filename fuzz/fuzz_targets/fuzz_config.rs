#![no_main]
use libfuzzer_sys::fuzz_target;
use nodelog::Config;

fuzz_target!(|data: &str| {
    // Must not panic on any config content, including bad level names
    if let Ok(config) = Config::parse(data) {
        let _ = config.thresholds();
        let _ = config.teardown();
        let _ = config.internal_level();
        let _ = config.file_path();
    }
});

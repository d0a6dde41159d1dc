#![no_main]
use libfuzzer_sys::fuzz_target;
use nodelog::cli::parse_pipe_line;

fuzz_target!(|data: &str| {
    // Must not panic on any stdin line
    let _ = parse_pipe_line(data);
});

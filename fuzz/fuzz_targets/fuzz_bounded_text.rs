#![no_main]
use libfuzzer_sys::fuzz_target;
use nodelog::fmt::{MAX_TEXT_LEN, render_bounded};

fuzz_target!(|data: &str| {
    let text = render_bounded(format_args!("{data}{data}"));
    assert!(text.len() <= MAX_TEXT_LEN);
    assert!(format!("{data}{data}").starts_with(&text));
});

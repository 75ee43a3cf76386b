#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::{DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 * 1024 * 1024),
        ..Default::default()
    };

    // Both row-order modes must never panic
    let _ = DecodeRequest::new().with_limits(limits.clone()).decode_bytes(data);
    let _ = DecodeRequest::new()
        .with_limits(limits)
        .honor_top_down(true)
        .decode_bytes(data);
});

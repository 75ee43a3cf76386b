#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let limits = Limits {
        max_memory_bytes: Some(64 * 1024 * 1024),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new().with_limits(limits).decode_bytes(data) else {
        return;
    };

    let Ok(reencoded) = encode_bmp_to_vec(&decoded) else { return };
    let Ok(decoded2) = decode_bmp_bytes(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.as_bytes(), decoded2.as_bytes(), "roundtrip pixel mismatch");
    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    assert_eq!(decoded.h_res(), decoded2.h_res());
    assert_eq!(decoded.v_res(), decoded2.v_res());
});

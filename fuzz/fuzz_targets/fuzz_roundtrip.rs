#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpfx::*;

fuzz_target!(|data: &[u8]| {
    // Cap allocations so huge declared sizes don't dominate the run
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    // Empty grids decode but are not encodable
    let Ok(reencoded) = encode_bmp(&decoded, enough::Unstoppable) else {
        assert!(decoded.is_empty());
        return;
    };
    let Ok(decoded2) = decode_bmp(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");

    // A second encode is byte-identical
    let Ok(reencoded2) = encode_bmp(&decoded2, enough::Unstoppable) else {
        panic!("second encode failed");
    };
    assert_eq!(reencoded, reencoded2);
});

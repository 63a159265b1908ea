#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probing and both validation modes must never panic
    let _ = bmpfx::probe_bmp(data);
    let _ = bmpfx::decode_bmp(data, enough::Unstoppable);
    let _ = bmpfx::DecodeRequest::new(data)
        .with_permissiveness(bmpfx::BmpPermissiveness::Strict)
        .decode(enough::Unstoppable);
});

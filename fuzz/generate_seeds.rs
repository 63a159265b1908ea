#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp).unwrap();

    // 32-bit 2x1, alpha bytes dropped on decode
    let mut bmp32 = vec![0u8; 62];
    bmp32[0] = b'B'; bmp32[1] = b'M';
    bmp32[2..6].copy_from_slice(&62u32.to_le_bytes());
    bmp32[10..14].copy_from_slice(&54u32.to_le_bytes());
    bmp32[14..18].copy_from_slice(&40u32.to_le_bytes());
    bmp32[18..22].copy_from_slice(&2i32.to_le_bytes());
    bmp32[22..26].copy_from_slice(&1i32.to_le_bytes());
    bmp32[26..28].copy_from_slice(&1u16.to_le_bytes());
    bmp32[28..30].copy_from_slice(&32u16.to_le_bytes());
    bmp32[54..62].copy_from_slice(&[0x10, 0x20, 0x30, 0xff, 0x40, 0x50, 0x60, 0x80]);
    fs::write(format!("{dir}/bmp32_2x1.bmp"), bmp32).unwrap();

    // 1x1 missing its padding byte: declared size 57, expected 58
    let mut unpadded = fs::read(format!("{dir}/bmp_1x1.bmp")).unwrap();
    unpadded.truncate(57);
    unpadded[2..6].copy_from_slice(&57u32.to_le_bytes());
    fs::write(format!("{dir}/bmp_unpadded.bmp"), unpadded).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}

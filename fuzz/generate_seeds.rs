#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp24(width: i32, height: i32, pixel_bytes: &[u8]) -> Vec<u8> {
    let mut bmp = vec![0u8; 54];
    let file_size = 54 + pixel_bytes.len() as u32;
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&file_size.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[34..38].copy_from_slice(&(pixel_bytes.len() as u32).to_le_bytes());
    bmp[38..42].copy_from_slice(&2835u32.to_le_bytes());
    bmp[42..46].copy_from_slice(&2835u32.to_le_bytes());
    bmp.extend_from_slice(pixel_bytes);
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1: 3 pixel bytes + 1 pad
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp24(1, 1, &[0xff, 0x00, 0x00, 0x00])).unwrap();

    // 2x2: 6 pixel bytes + 2 pad per row
    let rows = [0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0, 0, 0x70, 0x80, 0x90, 0xa0, 0xb0, 0xc0, 0, 0];
    fs::write(format!("{dir}/bmp_2x2.bmp"), bmp24(2, 2, &rows)).unwrap();

    // Top-down 4x1, no padding needed
    fs::write(format!("{dir}/bmp_4x1_topdown.bmp"), bmp24(4, -1, &[0x7f; 12])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut truncated = bmp24(2, 2, &rows);
    truncated.truncate(60);
    fs::write(format!("{dir}/bmp_truncated.bin"), truncated).unwrap();

    println!("Generated seed corpus in {dir}/");
}

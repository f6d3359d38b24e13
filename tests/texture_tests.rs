// Host-side tests for the texture cache and CPU-side texture decoding.
// The main crate is wasm-only, so we include the pure-Rust decode module directly.

#![allow(dead_code)]
mod texture_decode {
    include!("../src/texture_decode.rs");
}

use configurator_core::{TextureCache, TextureError, TextureLookup, TextureSlot};
use image::{Rgba, RgbaImage};
use std::io::Cursor;
use texture_decode::*;

fn fetch_failed(path: &str) -> TextureError {
    TextureError::Fetch {
        path: path.to_string(),
        reason: "HTTP 404".into(),
    }
}

#[test]
fn cache_requests_each_path_once() {
    let mut cache: TextureCache<u32> = TextureCache::new();
    assert!(cache.request("a.png"));
    assert!(!cache.request("a.png"));
    assert!(matches!(cache.slot("a.png"), Some(TextureSlot::Pending)));
    assert!(!cache.is_ready("a.png"));
    assert_eq!(cache.generation(), 0);
}

#[test]
fn resolution_order_does_not_matter() {
    let mut cache: TextureCache<u32> = TextureCache::new();
    cache.request("a.png");
    cache.request("b.png");
    cache.resolve("b.png", Ok(2));
    cache.resolve("a.png", Ok(1));
    assert_eq!(cache.get("a.png"), Some(&1));
    assert_eq!(cache.get("b.png"), Some(&2));
    assert_eq!(cache.generation(), 2);
}

#[test]
fn failed_textures_stay_unset_and_are_not_retried() {
    let mut cache: TextureCache<u32> = TextureCache::new();
    cache.request("missing.png");
    cache.resolve("missing.png", Err(fetch_failed("missing.png")));
    assert!(cache.is_failed("missing.png"));
    assert!(!cache.is_ready("missing.png"));
    assert_eq!(cache.get("missing.png"), None);
    assert!(!cache.request("missing.png"));
    assert_eq!(cache.generation(), 1);
}

#[test]
fn texture_errors_name_the_path() {
    let msg = fetch_failed("textures/wood/ao.png").to_string();
    assert!(msg.contains("textures/wood/ao.png"));
    assert!(msg.contains("404"));
}

#[test]
fn mip_counts_follow_the_longest_side() {
    assert_eq!(mip_level_count(1, 1), 1);
    assert_eq!(mip_level_count(2, 1), 2);
    assert_eq!(mip_level_count(256, 256), 9);
    assert_eq!(mip_level_count(300, 200), 9);
    assert_eq!(mip_level_count(0, 0), 1);
}

#[test]
fn mip_chain_halves_down_to_one_texel() {
    let img = RgbaImage::from_pixel(4, 2, Rgba([200, 100, 50, 255]));
    let tex = MipChainBuilder::new(img).finish();
    assert_eq!(tex.mip_level_count(), 3);
    assert_eq!(tex.level_size(0), (4, 2));
    assert_eq!(tex.level_size(1), (2, 1));
    assert_eq!(tex.level_size(2), (1, 1));
    let lens: Vec<usize> = tex.levels.iter().map(|l| l.len()).collect();
    assert_eq!(lens, vec![32, 8, 4]);
    // a flat image stays flat at every level
    assert_eq!(&tex.levels[2][..], &[200, 100, 50, 255]);
}

#[test]
fn mip_chain_builds_one_level_per_step() {
    let img = RgbaImage::from_pixel(8, 4, Rgba([0, 0, 0, 255]));
    let mut mips = MipChainBuilder::new(img);
    let mut steps = 0;
    while mips.step() {
        steps += 1;
    }
    // 8x4 -> 4x2 -> 2x1 -> 1x1
    assert_eq!(steps, 3);
    assert!(!mips.step());
    let tex = mips.finish();
    assert_eq!(tex.mip_level_count(), 4);
    let lens: Vec<usize> = tex.levels.iter().map(|l| l.len()).collect();
    assert_eq!(lens, vec![128, 32, 8, 4]);
}

#[test]
fn single_texel_needs_no_steps() {
    let mut mips = MipChainBuilder::new(RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 4])));
    assert!(!mips.step());
    let tex = mips.finish();
    assert_eq!(tex.levels, vec![vec![1, 2, 3, 4]]);
}

#[test]
fn decodes_png_bytes() {
    let img = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    let tex = MipChainBuilder::new(decode_rgba("t.png", &bytes).unwrap()).finish();
    assert_eq!((tex.width, tex.height), (8, 8));
    assert_eq!(tex.mip_level_count(), 4);
    assert_eq!(&tex.levels[0][..4], &[10, 20, 30, 255]);
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = decode_rgba("broken.jpg", b"not an image").unwrap_err();
    assert!(matches!(err, TextureError::Decode { ref path, .. } if path == "broken.jpg"));
}

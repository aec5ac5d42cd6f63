//! Integration tests for raster image loading.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use img_triage_adapters::FsImageSource;
use img_triage_core::{ImageInfo, ImageSource};
use std::fs;
use std::path::Path;

fn sample_rgb() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(8, 8, |x, y| {
        Rgb([(x * 30) as u8, (y * 30) as u8, 90])
    }))
}

fn write_fixtures(dir: &Path, names: &[&str]) {
    for name in names {
        sample_rgb().save(dir.join(name)).unwrap();
    }
}

fn load_single(path: &Path) -> ImageInfo {
    let source = FsImageSource::new(vec![path.to_path_buf()], false);
    let images: Vec<_> = source.images().collect();
    assert_eq!(images.len(), 1);
    images.into_iter().next().unwrap().expect("should load")
}

#[test]
fn test_load_each_format() {
    let temp = tempfile::tempdir().unwrap();
    let names = ["test.png", "test.jpg", "test.bmp", "test.tiff", "test.gif", "test.webp"];
    write_fixtures(temp.path(), &names);

    for name in names {
        let info = load_single(&temp.path().join(name));
        assert_eq!(info.width, 8, "{name}");
        assert_eq!(info.height, 8, "{name}");
        assert!(info.id.ends_with(name));
        assert!(info.as_rgb8().is_some(), "{name} should be normalized to RGB8");
    }
}

#[test]
fn test_grayscale_file_expanded_to_rgb() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("gray.png");
    GrayImage::from_pixel(4, 4, Luma([77u8])).save(&path).unwrap();

    let info = load_single(&path);
    let rgb = info.as_rgb8().expect("RGB8");
    assert!(rgb.pixels().all(|p| p.0 == [77, 77, 77]));
}

#[test]
fn test_alpha_dropped() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("alpha.png");
    RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 128]))
        .save(&path)
        .unwrap();

    let info = load_single(&path);
    assert_eq!(info.as_rgb8().expect("RGB8").get_pixel(0, 0).0, [10, 20, 30]);
}

#[test]
fn test_directory_sorted_order() {
    let temp = tempfile::tempdir().unwrap();
    write_fixtures(temp.path(), &["c.png", "a.png", "b.png"]);
    fs::write(temp.path().join("notes.txt"), "not an image").unwrap();

    let source = FsImageSource::new(vec![temp.path().to_path_buf()], false);
    let ids: Vec<_> = source.images().map(|r| r.unwrap().id).collect();

    assert_eq!(ids.len(), 3);
    assert!(ids[0].ends_with("a.png"));
    assert!(ids[1].ends_with("b.png"));
    assert!(ids[2].ends_with("c.png"));
    assert_eq!(source.count_hint(), Some(3));
}

#[test]
fn test_recursion_flag() {
    let temp = tempfile::tempdir().unwrap();
    let nested = temp.path().join("nested");
    fs::create_dir(&nested).unwrap();
    write_fixtures(temp.path(), &["top.png"]);
    write_fixtures(&nested, &["deep.png"]);

    let flat = FsImageSource::new(vec![temp.path().to_path_buf()], false);
    assert_eq!(flat.count_hint(), Some(1));

    let recursive = FsImageSource::new(vec![temp.path().to_path_buf()], true);
    assert_eq!(recursive.count_hint(), Some(2));
}

#[test]
fn test_explicit_paths_keep_argument_order() {
    let temp = tempfile::tempdir().unwrap();
    write_fixtures(temp.path(), &["z.png", "y.png"]);

    let source = FsImageSource::new(
        vec![temp.path().join("z.png"), temp.path().join("y.png")],
        false,
    );
    let ids: Vec<_> = source.images().map(|r| r.unwrap().id).collect();
    assert!(ids[0].ends_with("z.png"));
    assert!(ids[1].ends_with("y.png"));
}

#[test]
fn test_corrupt_file_yields_error_with_path() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("broken.jpg");
    fs::write(&path, b"definitely not a jpeg").unwrap();

    let source = FsImageSource::new(vec![path], false);
    let err = source.images().next().unwrap().unwrap_err();
    assert!(format!("{err:#}").contains("broken.jpg"));
}

#[test]
fn test_missing_path_is_ignored() {
    let temp = tempfile::tempdir().unwrap();
    let source = FsImageSource::new(vec![temp.path().join("missing.png")], false);
    assert_eq!(source.count_hint(), Some(0));
    assert_eq!(source.images().count(), 0);
}

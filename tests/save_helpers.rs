//! 保存入口的行为测试：字节往返、Base64 前缀等价、目录创建开关、覆盖写入。

use std::fs;
use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use image_saver::image_handler::{ImageConfig, ImageError, ImageSaver, PayloadKind, SaveTarget};
use proptest::prelude::*;

fn saver() -> ImageSaver {
    ImageSaver::new(ImageConfig::default()).expect("saver init failed")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bytes_are_written_verbatim(bytes in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("deep").join("blob.bin");

        prop_assert!(saver().save_from_bytes(&bytes, &path, true));
        prop_assert_eq!(fs::read(&path).expect("read back"), bytes);
    }

    #[test]
    fn base64_roundtrips_with_and_without_data_url_prefix(
        bytes in proptest::collection::vec(any::<u8>(), 0..2048),
        mime in "(image/png|image/jpeg|application/octet-stream)",
    ) {
        let dir = tempfile::tempdir().expect("tempdir");
        let plain = general_purpose::STANDARD.encode(&bytes);
        let data_url = format!("data:{};base64,{}", mime, plain);

        let plain_path = dir.path().join("plain.bin");
        let prefixed_path = dir.path().join("prefixed.bin");
        let saver = saver();

        prop_assert!(saver.save_from_base64(&plain, &plain_path, true));
        prop_assert!(saver.save_from_base64(&data_url, &prefixed_path, true));
        prop_assert_eq!(fs::read(&plain_path).expect("read plain"), bytes.clone());
        prop_assert_eq!(fs::read(&prefixed_path).expect("read prefixed"), bytes);
    }
}

#[test]
fn missing_parent_is_not_created_when_disabled() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent").join("x.bin");
    let saver = saver();

    assert!(!saver.save_from_bytes(b"abc", &path, false));
    assert!(!saver.save_from_base64("YWJj", &path, false));
    assert!(!path.parent().expect("parent").exists());

    let result = saver.try_save_from_bytes(b"abc", &SaveTarget::new(&path).create_dirs(false));
    assert!(matches!(result, Err(ImageError::FileSystem(_))));
}

#[test]
fn shorter_second_write_truncates_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("same.bin");
    let saver = saver();

    assert!(saver.save_from_bytes(&[7u8; 1024], &path, true));
    assert!(saver.save_from_bytes(b"short", &path, true));

    assert_eq!(fs::read(&path).expect("read back"), b"short");
}

#[test]
fn decoded_image_is_encoded_by_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut img = RgbImage::new(5, 4);
    img.put_pixel(1, 2, Rgb([200, 10, 30]));
    let image = DynamicImage::ImageRgb8(img);
    let saver = saver();

    let png_path = dir.path().join("out.png");
    let saved = saver
        .try_save_decoded_image(&image, &SaveTarget::new(&png_path), None)
        .expect("png save");
    assert_eq!(saved.kind, PayloadKind::Decoded);
    assert_eq!(saved.mime_type, Some("image/png"));

    let reopened = image::open(&png_path).expect("reopen").to_rgb8();
    assert_eq!(reopened.get_pixel(1, 2), &Rgb([200, 10, 30]));

    let jpg_path = dir.path().join("out.jpg");
    assert!(saver.save_decoded_image(&image, &jpg_path, None, true));
    let header = fs::read(&jpg_path).expect("read jpg");
    assert_eq!(&header[..3], &[0xFF, 0xD8, 0xFF]);
}

#[test]
fn explicit_format_wins_over_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("looks_like.jpg");
    let image = DynamicImage::ImageRgb8(RgbImage::new(2, 2));

    assert!(saver().save_decoded_image(&image, &path, Some(ImageFormat::Png), true));

    let bytes = fs::read(&path).expect("read back");
    let format = image::guess_format(&bytes).expect("guess");
    assert_eq!(format, ImageFormat::Png);

    let mut cursor = Cursor::new(bytes);
    let decoded = image::load(&mut cursor, ImageFormat::Png).expect("decode");
    assert_eq!((decoded.width(), decoded.height()), (2, 2));
}

#[tokio::test]
async fn unreachable_url_returns_false_and_leaves_nothing() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("x.png");
    let url = format!("http://127.0.0.1:{}/x.png", port);

    assert!(!saver().save_from_url(&url, &path, true).await);
    assert!(!path.exists());
}

#[tokio::test]
async fn non_http_scheme_is_invalid_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = SaveTarget::new(dir.path().join("x.png"));

    let result = saver().try_save_from_url("ftp://example.com/x.png", &target).await;

    assert!(matches!(result, Err(ImageError::InvalidInput(_))));
    assert!(!target.path.exists());
}

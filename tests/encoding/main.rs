use std::path::PathBuf;

use draw_png::{decode, encode, load_image, save_image, Color, ColorType, Image, PngReader, PngWriter};

const ADAM7_RGB8: &[u8] = include_bytes!("../decoding/adam7_rgb8.png");
const PALETTE2: &[u8] = include_bytes!("../decoding/palette2.png");

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("draw-png-{}-{name}", std::process::id()))
}

fn checkerboard(width: usize, height: usize) -> Image {
    let mut image = Image::new(width, height);
    for y in 0..height {
        for x in 0..width {
            if (x + y) % 2 == 0 {
                image.set_pixel_color(Color::WHITE, x, y);
            } else {
                image.set_pixel_color(Color::new(x as u8, y as u8, 128), x, y);
            }
        }
    }
    image
}

#[test]
fn saved_images_load_back() {
    let path = temp_path("checkerboard.png");
    let image = checkerboard(17, 5);
    save_image(&image, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, image);
}

#[test]
fn writes_rgb8_without_interlacing() {
    let original = decode(ADAM7_RGB8).unwrap();
    let reader = PngReader::from_bytes(&encode(&original).unwrap()).unwrap();
    let header = reader.header();
    assert_eq!((header.width, header.height), (9, 9));
    assert_eq!(header.color_type(), ColorType::Truecolor);
    assert_eq!(header.bit_depth(), 8);
    assert!(!header.is_interlaced());
    assert_eq!(reader.load_image(), original);
}

#[test]
fn palette_images_are_written_as_rgb() {
    let original = decode(PALETTE2).unwrap();
    let reader = PngReader::from_bytes(&encode(&original).unwrap()).unwrap();
    assert_eq!(reader.header().color_type(), ColorType::Truecolor);
    assert_eq!(reader.load_image(), original);
}

#[test]
fn every_compression_level_decodes() {
    let image = checkerboard(8, 8);
    for level in 0..=PngWriter::<Vec<u8>>::MAX_COMPRESSION_LEVEL {
        let mut writer = PngWriter::new(Vec::new()).compression_level(level);
        writer.save_image(&image).unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(decode(&bytes).unwrap(), image, "level {level}");
    }
}

#[test]
fn single_pixel_image() {
    let image = Image::from_raw(1, 1, vec![1, 2, 3]).unwrap();
    assert_eq!(decode(&encode(&image).unwrap()).unwrap(), image);
}

#[test]
fn empty_images_cannot_be_saved() {
    let err = encode(&Image::new(0, 0)).unwrap_err();
    assert_eq!(err.to_string(), "Cannot encode an image with no pixels (0x0)");
}

#[test]
fn reports_unwritable_destination() {
    let path = temp_path("no-such-dir").join("out.png");
    let err = save_image(&checkerboard(2, 2), &path).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Unable to open file {} for writing", path.display())
    );
}

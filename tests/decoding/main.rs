use draw_png::{decode, is_png, load_image, Color, ColorType, Image, PngReader};

const RGB8_FILTERS: &[u8] = include_bytes!("rgb8_filters.png");
const RGB8_MULTI_IDAT: &[u8] = include_bytes!("rgb8_multi_idat.png");
const ADAM7_RGB8: &[u8] = include_bytes!("adam7_rgb8.png");
const RGBA8: &[u8] = include_bytes!("rgba8.png");
const GREY1: &[u8] = include_bytes!("grey1.png");
const GREY16: &[u8] = include_bytes!("grey16.png");
const GREY_ALPHA8: &[u8] = include_bytes!("grey_alpha8.png");
const PALETTE2: &[u8] = include_bytes!("palette2.png");
const PALETTE_OUT_OF_RANGE: &[u8] = include_bytes!("palette_out_of_range.png");
const BAD_CRC: &[u8] = include_bytes!("bad_crc.png");
const NO_IDAT: &[u8] = include_bytes!("no_idat.png");

fn fixture_path(name: &str) -> String {
    format!("{}/tests/decoding/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn hex_pixels(image: &Image) -> String {
    let mut rows = Vec::new();
    for y in 0..image.height() {
        let row: Vec<_> = (0..image.width())
            .map(|x| {
                let Color { r, g, b } = image.get_pixel_color(x, y);
                format!("{r:02x}{g:02x}{b:02x}")
            })
            .collect();
        rows.push(row.join(" "));
    }
    rows.join(" / ")
}

fn assert_gradient(image: &Image) {
    assert_eq!((image.width(), image.height()), (4, 4));
    for y in 0..4 {
        for x in 0..4 {
            let expected = Color::new(x as u8 * 60, y as u8 * 60, x as u8 * 16 + y as u8);
            assert_eq!(image.get_pixel_color(x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn decodes_every_filter_type() {
    let reader = PngReader::from_bytes(RGB8_FILTERS).unwrap();
    let header = reader.header();
    assert_eq!(header.color_type(), ColorType::Truecolor);
    assert_eq!(header.bit_depth(), 8);
    assert!(!header.is_interlaced());
    assert_gradient(&reader.load_image());
}

#[test]
fn joins_split_image_data() {
    assert_gradient(&decode(RGB8_MULTI_IDAT).unwrap());
}

#[test]
fn deinterlaces_adam7() {
    let reader = PngReader::from_bytes(ADAM7_RGB8).unwrap();
    assert!(reader.header().is_interlaced());
    let image = reader.load_image();
    assert_eq!((image.width(), image.height()), (9, 9));
    for y in 0..9 {
        for x in 0..9 {
            let expected = Color::new(x as u8 * 20, y as u8 * 20, (x + y) as u8);
            assert_eq!(image.get_pixel_color(x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn strips_alpha() {
    let image = decode(RGBA8).unwrap();
    insta::assert_snapshot!(hex_pixels(&image), @"0a141e 28323c");

    let image = decode(GREY_ALPHA8).unwrap();
    insta::assert_snapshot!(hex_pixels(&image), @"070707 c8c8c8");
}

#[test]
fn expands_greyscale_to_rgb() {
    let image = decode(GREY1).unwrap();
    let values: Vec<Vec<u8>> = (0..2)
        .map(|y| (0..8).map(|x| image.get_pixel_color(x, y).r).collect())
        .collect();
    assert_eq!(
        values,
        [
            [255, 0, 255, 255, 0, 0, 0, 255],
            [0, 255, 0, 0, 255, 255, 255, 0],
        ]
    );
    assert_eq!(image.get_pixel_color(2, 0), Color::WHITE);

    let image = decode(GREY16).unwrap();
    insta::assert_snapshot!(hex_pixels(&image), @"121212 ababab");
}

#[test]
fn expands_palette_indices() {
    let reader = PngReader::from_bytes(PALETTE2).unwrap();
    assert_eq!(reader.header().color_type(), ColorType::IndexedColor);
    assert_eq!(reader.header().bit_depth(), 2);
    insta::assert_snapshot!(hex_pixels(&reader.load_image()), @"090807 0000ff 00ff00 ff0000");
}

#[test]
fn rejects_palette_index_past_the_end() {
    let err = decode(PALETTE_OUT_OF_RANGE).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Palette index 3 is out of range for 2 entries"
    );
}

#[test]
fn rejects_corrupt_crc() {
    let err = decode(BAD_CRC).unwrap_err();
    assert!(err.to_string().starts_with("CRC mismatch in IHDR chunk"));
}

#[test]
fn rejects_missing_image_data() {
    let err = decode(NO_IDAT).unwrap_err();
    assert_eq!(err.to_string(), "Couldn't find an IDAT");
}

#[test]
fn rejects_truncated_files() {
    assert!(decode(&RGB8_FILTERS[..RGB8_FILTERS.len() - 20]).is_err());
    assert!(decode(&RGB8_FILTERS[..8]).is_err());
}

#[test]
fn rejects_bad_signature() {
    assert!(is_png(RGB8_FILTERS));
    let mut bytes = RGB8_FILTERS.to_vec();
    bytes[1] = b'Q';
    assert!(!is_png(&bytes));
    assert!(decode(&bytes).is_err());
}

#[test]
fn loads_from_disk() {
    let image = load_image(fixture_path("rgb8_filters.png")).unwrap();
    assert_gradient(&image);
}

#[test]
fn reports_unreadable_and_non_png_files() {
    let missing = fixture_path("missing.png");
    let err = PngReader::open(&missing).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Unable to open file {missing} for reading")
    );

    let source = fixture_path("main.rs");
    let err = PngReader::open(&source).unwrap_err();
    assert_eq!(err.to_string(), format!("File {source} is not a png file"));
}

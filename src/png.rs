use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{bail, Context};

use crate::{
    chunks::ihdr::IHDRChunk,
    decoder::{is_png, PNGDecoder},
    encoder::encode_image,
    image::Image,
    image_data::decompress_data,
    pixel::to_rgb_image,
};

/// A decoded PNG, normalised to 8-bit RGB. The source header is kept so
/// callers can see what the file originally held.
#[derive(Debug)]
pub struct PngReader {
    header: IHDRChunk,
    image: Image,
}

impl PngReader {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Unable to open file {} for reading", path.display()))?;
        if !is_png(&bytes) {
            bail!("File {} is not a png file", path.display());
        }
        log::info!("Reading {}", path.display());
        Self::from_bytes(&bytes).with_context(|| format!("Failed to decode {}", path.display()))
    }

    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let decoder = PNGDecoder::new(bytes)?.parse_ihdr()?;
        let header = decoder.header();
        log::debug!(
            "Decoding {}x{} {:?} image at {} bits",
            header.width,
            header.height,
            header.color_type(),
            header.bit_depth()
        );
        let stream = decoder.read_image_data()?;
        let (data, passes) = decompress_data(&stream.compressed, &stream.header)?;
        let image = to_rgb_image(&data, &stream.header, stream.palette.as_ref(), passes)?;
        Ok(Self {
            header: stream.header,
            image,
        })
    }

    pub fn header(&self) -> &IHDRChunk {
        &self.header
    }

    pub fn load_image(self) -> Image {
        self.image
    }
}

/// Writes 8-bit RGB PNGs to any sink.
#[derive(Debug)]
pub struct PngWriter<W: Write> {
    writer: W,
    compression_level: u8,
}

impl PngWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Unable to open file {} for writing", path.display()))?;
        log::info!("Writing {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> PngWriter<W> {
    pub const DEFAULT_COMPRESSION_LEVEL: u8 = 2;
    /// Highest level miniz_oxide accepts.
    pub const MAX_COMPRESSION_LEVEL: u8 = 10;

    pub fn new(writer: W) -> Self {
        Self {
            writer,
            compression_level: Self::DEFAULT_COMPRESSION_LEVEL,
        }
    }

    pub fn compression_level(mut self, level: u8) -> Self {
        self.compression_level = level.min(Self::MAX_COMPRESSION_LEVEL);
        self
    }

    pub fn save_image(&mut self, image: &Image) -> anyhow::Result<()> {
        let bytes = encode_image(image, self.compression_level)?;
        self.writer
            .write_all(&bytes)
            .context("Failed to write png data")
    }

    pub fn finish(mut self) -> anyhow::Result<W> {
        self.writer.flush().context("Failed to flush png data")?;
        Ok(self.writer)
    }
}

pub fn load_image<P: AsRef<Path>>(path: P) -> anyhow::Result<Image> {
    Ok(PngReader::open(path)?.load_image())
}

pub fn save_image<P: AsRef<Path>>(image: &Image, path: P) -> anyhow::Result<()> {
    let mut writer = PngWriter::create(path)?;
    writer.save_image(image)?;
    writer.finish()?;
    Ok(())
}

pub fn decode(bytes: &[u8]) -> anyhow::Result<Image> {
    Ok(PngReader::from_bytes(bytes)?.load_image())
}

pub fn encode(image: &Image) -> anyhow::Result<Vec<u8>> {
    let mut writer = PngWriter::new(Vec::new());
    writer.save_image(image)?;
    writer.finish()
}

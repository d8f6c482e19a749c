mod chunks;
mod crc;
mod decoder;
mod encoder;
mod filters;
mod image;
mod image_data;
mod interlacing;
mod pixel;
mod png;
mod scanlines;
mod utils;
mod window;

pub use chunks::ihdr::{ColorType, IHDRChunk};
pub use decoder::is_png;
pub use image::Image;
pub use pixel::Color;
pub use png::{decode, encode, load_image, save_image, PngReader, PngWriter};
pub use window::{BlankWindow, WindowConfig};

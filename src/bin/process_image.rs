use anyhow::bail;
use draw_png::{PngReader, PngWriter};

const USAGE: &str = "usage: process-image [-v] <input.png> [output.png]";

fn main() -> anyhow::Result<()> {
    let mut args: Vec<_> = std::env::args().skip(1).collect();
    let verbosity = if args.first().map(String::as_str) == Some("-v") {
        args.remove(0);
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .init();

    let (input, output) = match args.as_slice() {
        [input] => (input.as_str(), "output.png"),
        [input, output] => (input.as_str(), output.as_str()),
        _ => bail!(USAGE),
    };

    let reader = PngReader::open(input)?;
    let header = reader.header();
    log::info!(
        "{input}: {}x{}, {:?} at {} bits{}",
        header.width,
        header.height,
        header.color_type(),
        header.bit_depth(),
        if header.is_interlaced() { ", interlaced" } else { "" }
    );
    let image = reader.load_image();

    let mut writer = PngWriter::create(output)?;
    writer.save_image(&image)?;
    writer.finish()?;
    Ok(())
}

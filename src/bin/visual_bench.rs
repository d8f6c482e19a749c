use anyhow::Context;
use draw_png::{load_image, save_image};
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .init();
    let input_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/png-suite/"));
    let output_dir = Path::new("benchmark");
    fs::create_dir_all(output_dir).context("Failed to create benchmark folder")?;

    // Files starting with `x` are the suite's deliberately corrupt images.
    let mut test_images: Vec<_> = fs::read_dir(&input_dir)
        .with_context(|| format!("Failed to read {}", input_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path.extension() == Some(OsStr::new("png"))
                && !path
                    .file_name()
                    .and_then(|file_name| file_name.to_str())
                    .map(|file_name| file_name.starts_with('x'))
                    .unwrap_or(true)
        })
        .collect();
    test_images.sort();
    let mut processed_images = Vec::with_capacity(test_images.len());

    for image_path in test_images {
        let Some(test_name) = image_path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let orig_name = output_dir.join(format!("{test_name}-orig.png"));
        let draw_name = output_dir.join(format!("{test_name}-draw.png"));
        fs::copy(&image_path, &orig_name).with_context(|| {
            format!(
                "Failed to copy from {} to {}",
                image_path.display(),
                orig_name.display()
            )
        })?;
        let image = load_image(&image_path)?;
        save_image(&image, &draw_name)?;
        processed_images.push(serde_json::json!({
            "name": test_name,
            "width": image.width(),
            "height": image.height(),
        }));
    }
    let now = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)?;
    let results = serde_json::json!({
        "date": now,
        "processed_images": processed_images,
    });
    fs::write(output_dir.join("test_results.json"), results.to_string())?;
    Ok(())
}

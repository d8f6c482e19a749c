use draw_png::{BlankWindow, WindowConfig};

fn main() -> anyhow::Result<()> {
    let verbose = std::env::args().skip(1).any(|arg| arg == "-v");
    let verbosity = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .init();

    let window = BlankWindow::open(&WindowConfig::default())?;
    window.wait_for_keypress(std::io::stdin().lock())?;
    window.close()
}

use std::io::Read;

use anyhow::{anyhow, Context};
use x11rb::{
    connection::Connection,
    protocol::xproto::{ConnectionExt, CreateWindowAux, Window, WindowClass},
    rust_connection::RustConnection,
    COPY_DEPTH_FROM_PARENT,
};

/// Where and how large to open the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Display name such as `:0`. `None` uses `$DISPLAY`.
    pub display: Option<String>,
    /// Screen number. `None` uses the screen the display name selects.
    pub screen: Option<usize>,
    pub width: u16,
    pub height: u16,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            display: None,
            screen: None,
            width: 1,
            height: 1,
        }
    }
}

/// A mapped, black, top-level window. Nothing is ever drawn into it.
pub struct BlankWindow {
    connection: RustConnection,
    window: Window,
}

impl BlankWindow {
    pub fn open(config: &WindowConfig) -> anyhow::Result<Self> {
        let (connection, preferred_screen) =
            x11rb::connect(config.display.as_deref()).context("Unable to connect to X")?;
        let screen_number = config.screen.unwrap_or(preferred_screen);
        let screen = connection
            .setup()
            .roots
            .get(screen_number)
            .ok_or_else(|| anyhow!("X display has no screen {screen_number}"))?;

        let window = connection
            .generate_id()
            .context("Unable to allocate a window id")?;
        connection.create_window(
            COPY_DEPTH_FROM_PARENT,
            window,
            screen.root,
            0,
            0,
            config.width.max(1),
            config.height.max(1),
            0,
            WindowClass::INPUT_OUTPUT,
            screen.root_visual,
            &CreateWindowAux::new().background_pixel(screen.black_pixel),
        )?;
        connection.map_window(window)?;
        connection.flush()?;
        log::info!(
            "Mapped window {window:#x} on screen {screen_number} ({}x{})",
            config.width.max(1),
            config.height.max(1)
        );

        Ok(Self { connection, window })
    }

    pub fn id(&self) -> Window {
        self.window
    }

    /// Blocks until one byte arrives on `input` or it reaches end of file.
    pub fn wait_for_keypress<R: Read>(&self, mut input: R) -> anyhow::Result<()> {
        let mut byte = [0; 1];
        let read = input
            .read(&mut byte)
            .context("Failed to read a keypress")?;
        log::debug!("Read {read} byte(s) from input");
        Ok(())
    }

    /// Destroys the window and disconnects.
    pub fn close(self) -> anyhow::Result<()> {
        self.connection.destroy_window(self.window)?;
        self.connection.flush()?;
        log::info!("Closed window {:#x}", self.window);
        Ok(())
    }
}

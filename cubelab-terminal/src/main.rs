/// cubelab terminal demo
///
/// Usage: cubelab-terminal [demo] [--texture <image>]
///
/// Demos: colored, directional, point-vertex, point-fragment, textured.
/// Controls:
///   - Arrow Keys / WASD: Rotate the cube one degree
///   - Space: Reset rotation
///   - Q/ESC: Quit

use cubelab_core::{DemoKind, Surface, Texture};
use cubelab_terminal::TerminalApp;
use std::env;
use std::io;

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

fn load_texture(path: &str) -> io::Result<Texture> {
    let image = image::open(path)
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to read image {path}: {e}"),
            )
        })?
        .to_rgba8();
    let (width, height) = image.dimensions();
    Texture::from_rgba(width, height, image.into_raw())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut kind = DemoKind::Colored;
    let mut texture_path = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--texture" => {
                let path = args
                    .next()
                    .ok_or_else(|| invalid_input("--texture needs a path".to_string()))?;
                texture_path = Some(path);
            }
            name => kind = name.parse().map_err(|e| invalid_input(format!("{e}")))?,
        }
    }

    let config = kind.config();
    let texture = match (config.surface, texture_path) {
        (Surface::Texture, Some(path)) => Some(load_texture(&path)?),
        (Surface::Texture, None) => Some(Texture::checkerboard(64, 8)),
        (Surface::VertexColor, Some(path)) => {
            log::warn!("{kind} does not sample a texture, ignoring {path}");
            None
        }
        (Surface::VertexColor, None) => None,
    };

    log::info!("starting {kind} demo");

    let mut app = TerminalApp::new(config, texture)?;
    app.run()?;

    Ok(())
}

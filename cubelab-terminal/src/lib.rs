/// Terminal frontend for the cube demos
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use cubelab_core::{DemoConfig, FrameMatrices, Key, Mesh, RotationState, Texture};
use std::io::{self, stdout, Write};

pub mod renderer;

pub use renderer::TerminalRenderer;

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Rotate(Key),
    Quit,
}

impl Command {
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            KeyCode::Up | KeyCode::Char('w') => Some(Self::Rotate(Key::Up)),
            KeyCode::Down | KeyCode::Char('s') => Some(Self::Rotate(Key::Down)),
            KeyCode::Left | KeyCode::Char('a') => Some(Self::Rotate(Key::Left)),
            KeyCode::Right | KeyCode::Char('d') => Some(Self::Rotate(Key::Right)),
            KeyCode::Char(' ') => Some(Self::Rotate(Key::Space)),
            _ => None,
        }
    }
}

/// Main application struct for terminal rendering of one demo
pub struct TerminalApp {
    mesh: Mesh,
    config: DemoConfig,
    texture: Option<Texture>,
    rotation: RotationState,
    renderer: TerminalRenderer,
    running: bool,
}

impl TerminalApp {
    pub fn new(config: DemoConfig, texture: Option<Texture>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(config, texture, width as usize, height as usize))
    }

    /// Build an app for a fixed cell grid
    pub fn with_size(
        config: DemoConfig,
        texture: Option<Texture>,
        width: usize,
        height: usize,
    ) -> Self {
        let mut app = Self {
            mesh: Mesh::cube(),
            config,
            texture,
            rotation: RotationState::zero(),
            renderer: TerminalRenderer::new(width, height),
            running: true,
        };
        app.resize(width, height);
        app
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn renderer(&self) -> &TerminalRenderer {
        &self.renderer
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        // The top row holds the status line
        self.renderer = TerminalRenderer::new(width, height.saturating_sub(1));
        let (w, h) = self.renderer.viewport();
        self.config = self.config.with_aspect(w, h);
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.render_frame();
        self.present()?;

        while self.running {
            // Redraw only when something changed
            let dirty = match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(width, height) => {
                    log::debug!("terminal resized to {width}x{height}");
                    self.resize(width as usize, height as usize);
                    true
                }
                _ => false,
            };

            if dirty {
                self.render_frame();
                self.present()?;
            }
        }

        Ok(())
    }

    /// Apply a key event, returning whether a redraw is needed
    pub fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) -> bool {
        if kind == KeyEventKind::Release {
            return false;
        }

        match Command::from_key_code(code) {
            Some(Command::Quit) => {
                self.running = false;
                false
            }
            Some(Command::Rotate(key)) => {
                self.rotation.apply(key);
                log::trace!("{key:?} -> x: {}, y: {}", self.rotation.x, self.rotation.y);
                true
            }
            None => false,
        }
    }

    /// Rasterize the current state into the renderer's buffers
    pub fn render_frame(&mut self) {
        let frame =
            FrameMatrices::compute(&self.config.camera, &self.rotation, self.config.model_scale);

        self.renderer.clear();
        self.renderer
            .render(&self.mesh, &self.config, frame, self.texture.as_ref());
    }

    fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "cubelab {} | x: {:.0} y: {:.0} | Arrows/WASD=Rotate Space=Reset Q=Quit",
                self.config.kind, self.rotation.x, self.rotation.y
            )),
            ResetColor,
            cursor::MoveTo(0, 1),
        )?;

        self.renderer.draw(&mut stdout, self.config.clear_color)?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use cubelab_core::DemoKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_command_mapping() {
        assert_eq!(Command::from_key_code(KeyCode::Right), Some(Command::Rotate(Key::Right)));
        assert_eq!(Command::from_key_code(KeyCode::Char('w')), Some(Command::Rotate(Key::Up)));
        assert_eq!(Command::from_key_code(KeyCode::Char(' ')), Some(Command::Rotate(Key::Space)));
        assert_eq!(Command::from_key_code(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(Command::from_key_code(KeyCode::Enter), None);
    }

    #[test]
    fn test_handle_key_updates_rotation() {
        let mut app = TerminalApp::with_size(DemoKind::PointVertex.config(), None, 60, 30);
        assert!(app.handle_key(press(KeyCode::Right)));
        assert!(app.handle_key(press(KeyCode::Up)));
        assert_eq!(app.rotation(), RotationState::new(-1.0, 1.0));

        // Unrecognised keys do not trigger a redraw
        assert!(!app.handle_key(press(KeyCode::Char('x'))));

        let mut release = press(KeyCode::Left);
        release.kind = KeyEventKind::Release;
        assert!(!app.handle_key(release));
        assert_eq!(app.rotation(), RotationState::new(-1.0, 1.0));

        assert!(app.handle_key(press(KeyCode::Char(' '))));
        assert_eq!(app.rotation(), RotationState::zero());

        assert!(!app.handle_key(press(KeyCode::Char('q'))));
        assert!(!app.is_running());
    }

    #[test]
    fn test_render_frame_after_resize() {
        let texture = Some(Texture::checkerboard(8, 2));
        let mut app = TerminalApp::with_size(DemoKind::Textured.config(), texture, 40, 21);
        app.render_frame();
        assert_eq!(app.renderer().height(), 20);
        assert!(app.renderer().cell(20, 10).is_some());

        app.resize(100, 51);
        app.render_frame();
        assert_eq!(app.renderer().width(), 100);
        assert!(app.renderer().cell(50, 25).is_some());
    }
}

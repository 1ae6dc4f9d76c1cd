/// cubelab web - WebGL renderer for the cube demos
///
/// Each call to [`start_demo`] acquires a context, builds the demo's program
/// and buffers, draws once, and redraws on arrow keys (space resets).

use std::cell::RefCell;
use std::rc::Rc;

use cubelab_core::{DemoKind, Key, Surface};
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent, WebGlRenderingContext};

pub mod buffer;
pub mod context;
pub mod demo;
pub mod error;
pub mod program;
pub mod shaders;
pub mod texture;

pub use demo::CubeDemo;
pub use error::RenderError;

pub type Gl = WebGlRenderingContext;

/// Image used by the textured demo when no URL is given
pub const DEFAULT_TEXTURE_URL: &str = "resources/cube.png";

/// A running demo. Dropping it uninstalls its keyboard handler and releases
/// the demo, so a texture still loading for it is discarded on arrival.
#[wasm_bindgen]
pub struct DemoHandle {
    demo: Rc<RefCell<CubeDemo>>,
    document: Document,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

#[wasm_bindgen]
impl DemoHandle {
    /// Feed a `KeyboardEvent.key` value as if it were pressed.
    pub fn press(&self, key: &str) -> bool {
        match Key::from_dom_key(key) {
            Some(key) => self.demo.borrow_mut().handle_key(key),
            None => false,
        }
    }

    pub fn redraw(&self) {
        self.demo.borrow().draw();
    }

    #[wasm_bindgen(getter)]
    pub fn demo(&self) -> String {
        self.demo.borrow().config().kind.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn rotation_x(&self) -> f32 {
        self.demo.borrow().rotation().x
    }

    #[wasm_bindgen(getter)]
    pub fn rotation_y(&self) -> f32 {
        self.demo.borrow().rotation().y
    }

    #[wasm_bindgen(getter)]
    pub fn ready(&self) -> bool {
        self.demo.borrow().is_ready()
    }
}

impl Drop for DemoHandle {
    fn drop(&mut self) {
        // A newer demo may have replaced the handler already
        let ours: &Function = self.keydown.as_ref().unchecked_ref();
        if self.document.onkeydown().as_ref() == Some(ours) {
            self.document.set_onkeydown(None);
        }
    }
}

/// Start the demo `name` on the canvas with id `canvas_id`.
///
/// `texture_url` is only read by the textured demo and defaults to
/// [`DEFAULT_TEXTURE_URL`].
#[wasm_bindgen]
pub fn start_demo(
    canvas_id: &str,
    name: &str,
    texture_url: Option<String>,
) -> Result<DemoHandle, JsValue> {
    let handle = run(canvas_id, name, texture_url.as_deref()).map_err(|error| {
        log::error!("{error}");
        error
    })?;
    Ok(handle)
}

fn run(canvas_id: &str, name: &str, texture_url: Option<&str>) -> Result<DemoHandle, RenderError> {
    let kind = name
        .parse::<DemoKind>()
        .map_err(|error| RenderError::UnknownDemo(error.to_string()))?;

    let canvas = context::canvas(canvas_id)?;
    let gl = context::webgl_context(&canvas)?;
    let config = kind.config().with_aspect(canvas.width(), canvas.height());

    let demo = Rc::new(RefCell::new(CubeDemo::new(gl.clone(), config)?));

    match config.surface {
        Surface::VertexColor => demo.borrow().draw(),
        Surface::Texture => {
            let url = texture_url.unwrap_or(DEFAULT_TEXTURE_URL);
            texture::load_image_texture(&gl, &demo, url)?;
        }
    }

    let keydown = {
        let demo = Rc::clone(&demo);
        Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            log::debug!("key: {:?}, keyCode: {}", event.key(), event.key_code());
            let key = Key::from_dom_key(&event.key())
                .or_else(|| Key::from_key_code(event.key_code()));
            if let Some(key) = key {
                if demo.borrow_mut().handle_key(key) {
                    event.prevent_default();
                }
            }
        })
    };

    let document = context::document()?;
    document.set_onkeydown(Some(keydown.as_ref().unchecked_ref()));

    Ok(DemoHandle {
        demo,
        document,
        keydown,
    })
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;

    Ok(())
}

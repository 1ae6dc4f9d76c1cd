/// Canvas and WebGL context lookup
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::error::RenderError;
use crate::Gl;

/// Context names tried in order
const CONTEXT_NAMES: [&str; 2] = ["webgl", "experimental-webgl"];

pub fn document() -> Result<web_sys::Document, RenderError> {
    web_sys::window()
        .ok_or(RenderError::MissingWindow)?
        .document()
        .ok_or(RenderError::MissingDocument)
}

pub fn canvas(id: &str) -> Result<HtmlCanvasElement, RenderError> {
    document()?
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| RenderError::CanvasNotFound(id.to_string()))
}

/// First WebGL 1 context the canvas hands out
pub fn webgl_context(canvas: &HtmlCanvasElement) -> Result<Gl, RenderError> {
    for name in CONTEXT_NAMES {
        let context = match canvas.get_context(name) {
            Ok(Some(context)) => context,
            Ok(None) => continue,
            Err(error) => {
                log::debug!("get WebGL context with {name} threw {error:?}");
                continue;
            }
        };
        if let Ok(gl) = context.dyn_into::<Gl>() {
            log::info!("get WebGL context with {name} success");
            return Ok(gl);
        }
    }
    Err(RenderError::ContextUnavailable)
}

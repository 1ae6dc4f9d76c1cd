/// Image texture loading
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use crate::demo::CubeDemo;
use crate::error::RenderError;
use crate::Gl;

/// Load `url` into a new texture for `demo`, then draw.
///
/// Returns once the request is started; the demo stays idle until the image
/// arrives. A demo dropped before then is skipped.
pub fn load_image_texture(
    gl: &Gl,
    demo: &Rc<RefCell<CubeDemo>>,
    url: &str,
) -> Result<(), RenderError> {
    let texture = gl.create_texture().ok_or(RenderError::CreateTexture)?;
    let image = Rc::new(HtmlImageElement::new()?);

    {
        let demo = Rc::downgrade(demo);
        let image_ref = Rc::clone(&image);
        let url = url.to_string();
        let onload = Closure::once(move || {
            let attached = with_live(&demo, |demo| {
                log::info!("load image {url} success");
                match demo.attach_image(texture, &image_ref) {
                    Ok(()) => demo.draw(),
                    Err(error) => log::error!("{error}"),
                }
            });
            if !attached {
                log::debug!("image {url} arrived after its demo was stopped");
            }
        });
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        // Fires at most once; the browser owns it from here
        onload.forget();
    }

    {
        let url = url.to_string();
        let onerror = Closure::once(move || log::error!("load image {url} failed"));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    }

    image.set_src(url);
    Ok(())
}

/// Run `f` on the target if it is still alive. Returns whether it ran.
fn with_live<T>(target: &Weak<RefCell<T>>, f: impl FnOnce(&mut T)) -> bool {
    match target.upgrade() {
        Some(target) => {
            f(&mut target.borrow_mut());
            true
        }
        None => false,
    }
}

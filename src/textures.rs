use crate::constants::TEXTURE_BASE_URL;
use crate::core::TextureError;
use crate::texture_decode::{decode_rgba, DecodedTexture, MipChainBuilder};
use js_sys::{Promise, Uint8Array};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Decoded textures waiting for the next frame to upload them.
pub type TextureInbox = Rc<RefCell<Vec<(String, Result<DecodedTexture, TextureError>)>>>;

fn fetch_error(path: &str, reason: impl std::fmt::Debug) -> TextureError {
    TextureError::Fetch {
        path: path.to_string(),
        reason: format!("{:?}", reason),
    }
}

async fn fetch_bytes(path: &str) -> Result<Vec<u8>, TextureError> {
    let window = web::window().ok_or_else(|| fetch_error(path, "no window"))?;
    let url = format!("{}{}", TEXTURE_BASE_URL, path);
    let resp_value = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|e| fetch_error(path, e))?;
    let resp: web::Response = resp_value.dyn_into().map_err(|e| fetch_error(path, e))?;
    if !resp.ok() {
        return Err(fetch_error(path, format!("HTTP {}", resp.status())));
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| fetch_error(path, e))?)
        .await
        .map_err(|e| fetch_error(path, e))?;
    Ok(Uint8Array::new(&buf).to_vec())
}

/// Resolves on a fresh macrotask, letting pending animation frames run first.
async fn yield_to_browser() {
    let Some(window) = web::window() else {
        return;
    };
    let promise = Promise::new(&mut |resolve, _reject| {
        _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0);
    });
    _ = JsFuture::from(promise).await;
}

async fn load_texture(path: &str) -> Result<DecodedTexture, TextureError> {
    let bytes = fetch_bytes(path).await?;
    let image = decode_rgba(path, &bytes)?;
    yield_to_browser().await;
    let mut mips = MipChainBuilder::new(image);
    while mips.step() {
        yield_to_browser().await;
    }
    Ok(mips.finish())
}

/// Fetches and decodes `path` in the background; the outcome lands in `inbox`.
pub fn spawn_fetch(path: &'static str, inbox: TextureInbox) {
    spawn_local(async move {
        let result = load_texture(path).await;
        if result.is_ok() {
            log::info!("[textures] loaded {}", path);
        }
        inbox.borrow_mut().push((path.to_string(), result));
    });
}

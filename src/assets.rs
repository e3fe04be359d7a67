//! Sprite loading
//!
//! The character is drawn from a single RGBA image. Natively it is decoded with
//! `image`; in the browser the `HtmlImageElement` has already decoded it and the
//! pixels are read back through a scratch 2D canvas.

use thiserror::Error;

/// Failure loading the character sprite
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read sprite {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode sprite: {0}")]
    Decode(String),

    #[error("sprite has no pixels")]
    Empty,

    #[error("browser API unavailable: {0}")]
    Browser(String),
}

/// Decoded RGBA8 image, rows top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Sprite {
    /// Default sprite path, relative to the served/working directory
    pub const DEFAULT_PATH: &'static str = "assets/kiro-logo.png";

    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, AssetError> {
        if width == 0 || height == 0 {
            return Err(AssetError::Empty);
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(AssetError::Decode(format!(
                "expected {} bytes for {}x{}, got {}",
                expected,
                width,
                height,
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Decode an encoded image (PNG) held in memory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::Decode(e.to_string()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Self::from_rgba(width, height, img.into_raw())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let sprite = Self::decode(&bytes)?;
        log::info!(
            "Sprite loaded: {} ({}x{})",
            path.display(),
            sprite.width,
            sprite.height
        );
        Ok(sprite)
    }

    /// Read back the pixels of a loaded image element
    #[cfg(target_arch = "wasm32")]
    pub fn from_image_element(img: &web_sys::HtmlImageElement) -> Result<Self, AssetError> {
        use wasm_bindgen::JsCast;

        let browser = |e: wasm_bindgen::JsValue| AssetError::Browser(format!("{e:?}"));

        let (width, height) = (img.natural_width(), img.natural_height());
        if width == 0 || height == 0 {
            return Err(AssetError::Empty);
        }

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AssetError::Browser("no document".into()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(browser)?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| AssetError::Browser("not a canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")
            .map_err(browser)?
            .ok_or_else(|| AssetError::Browser("no 2d context".into()))?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .map_err(|_| AssetError::Browser("not a 2d context".into()))?;
        ctx.draw_image_with_html_image_element(img, 0.0, 0.0)
            .map_err(browser)?;
        let data = ctx
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .map_err(browser)?;

        Self::from_rgba(width, height, data.data().0)
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

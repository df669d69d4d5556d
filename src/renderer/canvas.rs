//! 2D canvas backend

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::draw_list::{DrawCommand, build_frame};
use crate::animation::SpriteAnimation;
use crate::assets::LoadedAssets;
use crate::consts::{TEXT_FILL, TEXT_FONT};
use crate::sim::GameState;

/// Paints frames onto a canvas using preloaded sprites
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    assets: LoadedAssets,
}

impl CanvasRenderer {
    /// Grab the canvas' 2D context. `None` if the browser refuses one.
    pub fn new(canvas: &HtmlCanvasElement, assets: LoadedAssets) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        ctx.set_fill_style_str(TEXT_FILL);
        ctx.set_font(TEXT_FONT);
        Some(Self { ctx, assets })
    }

    pub fn render(&self, state: &GameState, animation: &SpriteAnimation) {
        for command in build_frame(state, animation) {
            if let Err(e) = self.paint(&command) {
                log::warn!("Draw failed for {:?}: {:?}", command, e);
            }
        }
    }

    fn paint(&self, command: &DrawCommand) -> Result<(), wasm_bindgen::JsValue> {
        match command {
            DrawCommand::Clear { width, height } => {
                self.ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
            }
            DrawCommand::Image { sprite, x, y } => {
                if let Some(image) = self.assets.sprite(*sprite) {
                    self.ctx
                        .draw_image_with_html_image_element(image, *x as f64, *y as f64)?;
                }
            }
            DrawCommand::SubImage { sprite, src, dst } => {
                if let Some(image) = self.assets.sprite(*sprite) {
                    self.ctx
                        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                            image,
                            src.x as f64,
                            src.y as f64,
                            src.width as f64,
                            src.height as f64,
                            dst.x as f64,
                            dst.y as f64,
                            dst.width as f64,
                            dst.height as f64,
                        )?;
                }
            }
            DrawCommand::Text { text, x, y } => {
                self.ctx.fill_text(text, *x as f64, *y as f64)?;
            }
        }
        Ok(())
    }
}

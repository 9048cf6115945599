//! Canvas heat surface stacked over the Leaflet container.

use anyhow::anyhow;
use beach_sync::heat::HeatFrame;
use beach_sync::{ContainerSize, HeatSurface};
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

// Above Leaflet's map pane, below its controls. Clicks pass through to the
// markers.
const CANVAS_Z_INDEX: &str = "600";

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    size: ContainerSize,
}

impl CanvasSurface {
    /// Create the canvas and append it to the element with id `host_id`.
    pub fn mount(host_id: &str) -> anyhow::Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| anyhow!("no document"))?;
        let host = document
            .get_element_by_id(host_id)
            .ok_or_else(|| anyhow!("map container '{}' not found", host_id))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow!("creating canvas failed: {:?}", e))?
            .dyn_into()
            .map_err(|_| anyhow!("created element is not a canvas"))?;
        canvas.set_class_name("beach-heat-layer");

        let style = canvas.style();
        for (name, value) in [
            ("position", "absolute"),
            ("top", "0"),
            ("left", "0"),
            ("z-index", CANVAS_Z_INDEX),
            ("pointer-events", "none"),
        ] {
            style
                .set_property(name, value)
                .map_err(|e| anyhow!("styling canvas failed: {:?}", e))?;
        }

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("getContext failed: {:?}", e))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into()
            .map_err(|_| anyhow!("unexpected canvas context type"))?;

        host.append_child(&canvas)
            .map_err(|e| anyhow!("attaching canvas failed: {:?}", e))?;

        Ok(Self {
            canvas,
            context,
            size: ContainerSize { width: 0, height: 0 },
        })
    }
}

impl HeatSurface for CanvasSurface {
    fn resize(&mut self, size: ContainerSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", size.width));
        let _ = style.set_property("height", &format!("{}px", size.height));
        self.size = size;
    }

    fn draw(&mut self, frame: &HeatFrame) {
        if frame.width != self.size.width || frame.height != self.size.height {
            self.resize(ContainerSize {
                width: frame.width,
                height: frame.height,
            });
        }
        let image = match web_sys::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&frame.rgba),
            frame.width,
            frame.height,
        ) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Heat frame rejected by canvas: {:?}", e);
                return;
            }
        };
        if let Err(e) = self.context.put_image_data(&image, 0.0, 0.0) {
            log::warn!("Drawing heat frame failed: {:?}", e);
        }
    }

    fn clear(&mut self) {
        self.context.clear_rect(
            0.0,
            0.0,
            self.size.width as f64,
            self.size.height as f64,
        );
    }

    fn detach(&mut self) {
        self.canvas.remove();
    }
}

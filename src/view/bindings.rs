use wasm_bindgen::prelude::*;

use crate::model::{Bbox, Coordinate};

use super::view::{BoundsLimitOption, MapView, ZoomOption};

fn to_js_error(error: crate::error::GeoViewError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn bbox_to_vec(bbox: &Bbox) -> Vec<f64> {
    vec![bbox.x(), bbox.y(), bbox.width(), bbox.height()]
}

/// Browser handle on a [`MapView`]. Options are passed by name, bounds as
/// `[x, y, width, height]`.
#[wasm_bindgen(js_name = MapView)]
pub struct JsMapView {
    inner: MapView,
}

#[wasm_bindgen(js_class = MapView)]
impl JsMapView {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> JsMapView {
        let mut inner = MapView::default();
        inner.set_size(width, height);
        JsMapView { inner }
    }

    pub fn set_size(&mut self, width: u32, height: u32) -> bool {
        self.inner.set_size(width, height)
    }

    pub fn set_max_bounds(&mut self, x: f64, y: f64, width: f64, height: f64) -> bool {
        self.inner.set_max_bounds(Some(Bbox::new(x, y, width, height)))
    }

    pub fn clear_max_bounds(&mut self) -> bool {
        self.inner.set_max_bounds(None)
    }

    pub fn set_resolutions(&mut self, resolutions: Vec<f64>) -> bool {
        self.inner.set_resolutions(resolutions)
    }

    pub fn set_maximum_scale(&mut self, maximum_scale: f64) -> bool {
        self.inner.set_maximum_scale(maximum_scale)
    }

    pub fn set_view_bounds_limit_option(&mut self, option: &str) -> Result<bool, JsValue> {
        let option: BoundsLimitOption = option.parse().map_err(to_js_error)?;
        Ok(self.inner.set_view_bounds_limit_option(option))
    }

    pub fn set_center_position(&mut self, x: f64, y: f64) -> bool {
        self.inner.set_center_position(Coordinate::new(x, y))
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> bool {
        self.inner.translate(dx, dy)
    }

    pub fn set_current_scale(&mut self, scale: f64, option: &str) -> Result<bool, JsValue> {
        let option: ZoomOption = option.parse().map_err(to_js_error)?;
        Ok(self.inner.set_current_scale(scale, option))
    }

    pub fn scale_at(&mut self, factor: f64, option: &str, x: f64, y: f64) -> Result<bool, JsValue> {
        let option: ZoomOption = option.parse().map_err(to_js_error)?;
        Ok(self.inner.scale_at(factor, option, Coordinate::new(x, y)))
    }

    pub fn apply_bounds(&mut self, x: f64, y: f64, width: f64, height: f64, option: &str) -> Result<bool, JsValue> {
        let option: ZoomOption = option.parse().map_err(to_js_error)?;
        Ok(self.inner.apply_bounds(&Bbox::new(x, y, width, height), option))
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.current_scale()
    }

    #[wasm_bindgen(getter)]
    pub fn center_x(&self) -> f64 {
        self.inner.center_position().x
    }

    #[wasm_bindgen(getter)]
    pub fn center_y(&self) -> f64 {
        self.inner.center_position().y
    }

    pub fn bounds(&self) -> Vec<f64> {
        bbox_to_vec(&self.inner.bounds())
    }

    /// World position of a pixel, as `[x, y]`.
    pub fn view_to_world(&self, x: f64, y: f64) -> Vec<f64> {
        let world = self.inner.view_to_world(&Coordinate::new(x, y));
        vec![world.x, world.y]
    }
}

pub mod bindings;
#[allow(clippy::module_inception)]
pub mod view;

pub use view::{
    BoundsLimitOption, HandlerRegistration, MapView, MapViewChangedEvent, MapViewConfig, ZoomOption,
};

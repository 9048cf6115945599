//! The base map as seen by the synchronizers.

use beach_core::GeoPoint;
use std::rc::Rc;

/// Position in container pixels, origin at the map's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Map container size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSize {
    pub width: u32,
    pub height: u32,
}

impl ContainerSize {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Viewport events that invalidate projected pixel positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportEvent {
    Resize,
    ZoomEnd,
    MoveEnd,
    DragEnd,
}

impl ViewportEvent {
    pub const ALL: [ViewportEvent; 4] = [
        ViewportEvent::Resize,
        ViewportEvent::ZoomEnd,
        ViewportEvent::MoveEnd,
        ViewportEvent::DragEnd,
    ];

    /// Leaflet event name.
    pub fn name(self) -> &'static str {
        match self {
            ViewportEvent::Resize => "resize",
            ViewportEvent::ZoomEnd => "zoomend",
            ViewportEvent::MoveEnd => "moveend",
            ViewportEvent::DragEnd => "dragend",
        }
    }
}

/// Handle returned by [`MapViewport::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerKey(pub u64);

pub type ViewportHandler = Rc<dyn Fn(ViewportEvent)>;

/// Projection and viewport events of the base map.
///
/// Methods take `&self`; implementations keep their listener bookkeeping
/// behind interior mutability since handlers are registered from shared
/// owners.
pub trait MapViewport {
    /// Project a coordinate to container pixels. `None` while the map is not
    /// ready to answer.
    fn project(&self, at: GeoPoint) -> Option<PixelPoint>;

    /// Current container size. `None` while the map is not ready.
    fn container_size(&self) -> Option<ContainerSize>;

    fn subscribe(&self, event: ViewportEvent, handler: ViewportHandler) -> ListenerKey;

    fn unsubscribe(&self, key: ListenerKey);
}

use super::config::{HeatmapConfig, REPAINT_DEBOUNCE_MS};
use super::render::{HeatFrame, HeatRenderer, HeatSample};
use crate::debounce::{Debouncer, Scheduler};
use crate::derive::HeatPoint;
use crate::viewport::{ContainerSize, ListenerKey, MapViewport, ViewportEvent};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// The rendering surface the overlay paints into.
///
/// In the browser this is a canvas stacked over the map container that
/// ignores pointer input.
pub trait HeatSurface {
    fn resize(&mut self, size: ContainerSize);
    fn draw(&mut self, frame: &HeatFrame);
    fn clear(&mut self);
    /// Remove the surface from the page. Called once, on teardown.
    fn detach(&mut self);
}

/// Keeps a heat surface painted with the current points.
///
/// Created by [`HeatOverlay::activate`], which takes the surface and
/// subscribes to viewport events. Dropping the overlay (or calling
/// [`HeatOverlay::teardown`]) cancels the pending repaint, unsubscribes every
/// listener and detaches the surface.
pub struct HeatOverlay<V, S, T>
where
    V: MapViewport + 'static,
    S: HeatSurface + 'static,
    T: Scheduler + 'static,
{
    inner: Rc<RefCell<OverlayInner<V, S, T>>>,
    viewport: Rc<V>,
    listeners: Vec<ListenerKey>,
}

struct OverlayInner<V, S, T>
where
    V: MapViewport + 'static,
    S: HeatSurface + 'static,
    T: Scheduler + 'static,
{
    viewport: Rc<V>,
    surface: Option<S>,
    surface_size: Option<ContainerSize>,
    renderer: HeatRenderer,
    points: Rc<[HeatPoint]>,
    debouncer: Debouncer<T>,
    repaints: usize,
}

impl<V, S, T> HeatOverlay<V, S, T>
where
    V: MapViewport + 'static,
    S: HeatSurface + 'static,
    T: Scheduler + 'static,
{
    pub fn activate(viewport: Rc<V>, surface: S, scheduler: T, config: HeatmapConfig) -> Self {
        let inner = Rc::new(RefCell::new(OverlayInner {
            viewport: viewport.clone(),
            surface: Some(surface),
            surface_size: None,
            renderer: HeatRenderer::new(config),
            points: Rc::from(Vec::new()),
            debouncer: Debouncer::new(scheduler, REPAINT_DEBOUNCE_MS),
            repaints: 0,
        }));
        inner.borrow_mut().sync_surface_size();

        let listeners = ViewportEvent::ALL
            .iter()
            .map(|&event| {
                let weak = Rc::downgrade(&inner);
                viewport.subscribe(
                    event,
                    Rc::new(move |event| OverlayInner::on_viewport_event(&weak, event)),
                )
            })
            .collect();

        info!("Heat overlay activated");
        Self {
            inner,
            viewport,
            listeners,
        }
    }

    /// Replace the points and repaint immediately.
    pub fn set_points(&self, points: Rc<[HeatPoint]>) {
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            warn!("Heat overlay busy, dropping point update");
            return;
        };
        inner.points = points;
        inner.repaint();
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().surface.is_some()
    }

    pub fn has_pending_repaint(&self) -> bool {
        self.inner.borrow().debouncer.is_pending()
    }

    /// Number of frames drawn so far.
    pub fn repaint_count(&self) -> usize {
        self.inner.borrow().repaints
    }

    /// Release listeners, the pending repaint and the surface. Idempotent.
    pub fn teardown(&mut self) {
        for key in self.listeners.drain(..) {
            self.viewport.unsubscribe(key);
        }
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            // Only reachable if teardown runs from inside a repaint.
            warn!("Heat overlay torn down while repainting");
            return;
        };
        inner.debouncer.cancel();
        inner.points = Rc::from(Vec::new());
        if let Some(mut surface) = inner.surface.take() {
            surface.clear();
            surface.detach();
            info!("Heat overlay released");
        }
    }
}

impl<V, S, T> Drop for HeatOverlay<V, S, T>
where
    V: MapViewport + 'static,
    S: HeatSurface + 'static,
    T: Scheduler + 'static,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<V, S, T> OverlayInner<V, S, T>
where
    V: MapViewport + 'static,
    S: HeatSurface + 'static,
    T: Scheduler + 'static,
{
    fn on_viewport_event(weak: &Weak<RefCell<Self>>, event: ViewportEvent) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let Ok(mut inner) = inner.try_borrow_mut() else {
            debug!("Heat overlay busy, skipping {} event", event.name());
            return;
        };
        if inner.surface.is_none() {
            return;
        }
        if event == ViewportEvent::Resize {
            let before = inner.surface_size;
            if inner.sync_surface_size().is_some() && inner.surface_size != before {
                // Resizing wiped the surface; fill it now, the debounced
                // repaint below still follows once the map settles.
                inner.repaint();
            }
        }

        let weak = weak.clone();
        inner.debouncer.schedule(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let Ok(mut inner) = inner.try_borrow_mut() else {
                return;
            };
            inner.debouncer.mark_fired();
            inner.repaint();
        });
    }

    /// Match the surface to the container. Returns the size when known.
    fn sync_surface_size(&mut self) -> Option<ContainerSize> {
        let size = self.viewport.container_size().filter(|s| !s.is_empty())?;
        let surface = self.surface.as_mut()?;
        if self.surface_size != Some(size) {
            surface.resize(size);
            self.surface_size = Some(size);
        }
        Some(size)
    }

    /// Project, render and draw. A no-op while the map cannot answer yet;
    /// the next data change or viewport event retries.
    fn repaint(&mut self) -> bool {
        let Some(size) = self.sync_surface_size() else {
            debug!("Heat overlay repaint skipped: viewport not ready");
            return false;
        };

        let mut samples = Vec::with_capacity(self.points.len());
        for point in self.points.iter() {
            let Some(pixel) = self.viewport.project(point.at) else {
                debug!("Heat overlay repaint skipped: projection not ready");
                return false;
            };
            samples.push(HeatSample {
                x: pixel.x,
                y: pixel.y,
                value: point.intensity,
            });
        }

        let frame = self.renderer.render(&samples, size);
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        surface.draw(&frame);
        self.repaints += 1;
        true
    }
}

//! Recording fakes for the browser-facing traits.

use crate::debounce::Scheduler;
use crate::heat::{HeatFrame, HeatSurface};
use crate::markers::{MarkerLayer, SelectHandler};
use crate::viewport::{ContainerSize, ListenerKey, MapViewport, PixelPoint, ViewportEvent, ViewportHandler};
use beach_core::{GeoPoint, SiteId};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

struct ScheduledTask {
    id: u64,
    due: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualClock {
    now: u64,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

/// Scheduler driven by [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    /// Move time forward, running every task that comes due, in order.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now + ms;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due_index = clock
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);
                due_index.map(|i| {
                    let task = clock.tasks.remove(i);
                    clock.now = task.due;
                    task
                })
            };
            match next {
                Some(task) => (task.task)(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().tasks.len()
    }
}

impl Scheduler for ManualScheduler {
    type Token = u64;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> u64 {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + delay_ms as u64;
        clock.tasks.push(ScheduledTask { id, due, task });
        id
    }

    fn cancel(&self, token: u64) {
        self.clock.borrow_mut().tasks.retain(|t| t.id != token);
    }
}

/// Flat projection: 1 degree = 100 px, (0, 0) at the container center.
pub struct FakeViewport {
    size: Cell<Option<ContainerSize>>,
    offset: Cell<(f64, f64)>,
    next_key: Cell<u64>,
    listeners: RefCell<BTreeMap<ListenerKey, (ViewportEvent, ViewportHandler)>>,
}

impl FakeViewport {
    const SCALE: f64 = 100.0;

    pub fn ready(width: u32, height: u32) -> Self {
        Self {
            size: Cell::new(Some(ContainerSize { width, height })),
            offset: Cell::new((0.0, 0.0)),
            next_key: Cell::new(0),
            listeners: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn set_size(&self, size: Option<ContainerSize>) {
        self.size.set(size);
    }

    pub fn pan(&self, dx: f64, dy: f64) {
        let (x, y) = self.offset.get();
        self.offset.set((x + dx, y + dy));
    }

    pub fn emit(&self, event: ViewportEvent) {
        let handlers: Vec<ViewportHandler> = self
            .listeners
            .borrow()
            .values()
            .filter(|(e, _)| *e == event)
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listener_count_for(&self, event: ViewportEvent) -> usize {
        self.listeners
            .borrow()
            .values()
            .filter(|(e, _)| *e == event)
            .count()
    }
}

impl MapViewport for FakeViewport {
    fn project(&self, at: GeoPoint) -> Option<PixelPoint> {
        let size = self.size.get()?;
        let (dx, dy) = self.offset.get();
        Some(PixelPoint {
            x: size.width as f64 / 2.0 + at.lng * Self::SCALE + dx,
            y: size.height as f64 / 2.0 - at.lat * Self::SCALE + dy,
        })
    }

    fn container_size(&self) -> Option<ContainerSize> {
        self.size.get()
    }

    fn subscribe(&self, event: ViewportEvent, handler: ViewportHandler) -> ListenerKey {
        let key = ListenerKey(self.next_key.get());
        self.next_key.set(key.0 + 1);
        self.listeners.borrow_mut().insert(key, (event, handler));
        key
    }

    fn unsubscribe(&self, key: ListenerKey) {
        self.listeners.borrow_mut().remove(&key);
    }
}

#[derive(Default)]
struct SurfaceLog {
    sizes: Vec<ContainerSize>,
    frames: Vec<HeatFrame>,
    // What a canvas would display: resizing or clearing wipes it.
    showing: Option<HeatFrame>,
    detaches: usize,
}

/// Surface that keeps every size and frame it receives.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn sizes(&self) -> Vec<ContainerSize> {
        self.log.borrow().sizes.clone()
    }

    pub fn frames(&self) -> usize {
        self.log.borrow().frames.len()
    }

    pub fn last_frame(&self) -> Option<HeatFrame> {
        self.log.borrow().frames.last().cloned()
    }

    /// The frame currently on screen, `None` once a resize or clear wiped it.
    pub fn showing(&self) -> Option<HeatFrame> {
        self.log.borrow().showing.clone()
    }

    pub fn is_detached(&self) -> bool {
        self.log.borrow().detaches > 0
    }

    pub fn detach_count(&self) -> usize {
        self.log.borrow().detaches
    }
}

impl HeatSurface for RecordingSurface {
    fn resize(&mut self, size: ContainerSize) {
        let mut log = self.log.borrow_mut();
        log.sizes.push(size);
        log.showing = None;
    }

    fn draw(&mut self, frame: &HeatFrame) {
        let mut log = self.log.borrow_mut();
        log.frames.push(frame.clone());
        log.showing = Some(frame.clone());
    }

    fn clear(&mut self) {
        self.log.borrow_mut().showing = None;
    }

    fn detach(&mut self) {
        self.log.borrow_mut().detaches += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerOp {
    Add(String),
    Remove(String),
    Bind(String, String),
    SetOpen(String, String),
}

/// Marker layer that records operations and simulates clicks and open popups.
#[derive(Default)]
pub struct RecordingLayer {
    pub ops: Vec<LayerOp>,
    markers: HashMap<SiteId, (GeoPoint, SelectHandler)>,
    open: HashSet<SiteId>,
}

impl RecordingLayer {
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn position(&self, id: &str) -> Option<GeoPoint> {
        self.markers.get(id).map(|(at, _)| *at)
    }

    pub fn click(&self, id: &str) {
        if let Some((_, handler)) = self.markers.get(id) {
            handler(SiteId::from(id));
        }
    }

    pub fn open_popup(&mut self, id: &str) {
        self.open.insert(SiteId::from(id));
    }

    pub fn take_ops(&mut self) -> Vec<LayerOp> {
        std::mem::take(&mut self.ops)
    }
}

impl MarkerLayer for RecordingLayer {
    fn add_marker(&mut self, id: &SiteId, at: GeoPoint, on_click: SelectHandler) {
        self.ops.push(LayerOp::Add(id.to_string()));
        self.markers.insert(id.clone(), (at, on_click));
    }

    fn remove_marker(&mut self, id: &SiteId) {
        self.ops.push(LayerOp::Remove(id.to_string()));
        self.markers.remove(id);
        self.open.remove(id);
    }

    fn bind_popup(&mut self, id: &SiteId, html: &str) {
        self.ops.push(LayerOp::Bind(id.to_string(), html.to_string()));
    }

    fn is_popup_open(&self, id: &SiteId) -> bool {
        self.open.contains(id)
    }

    fn set_open_popup_content(&mut self, id: &SiteId, html: &str) {
        self.ops.push(LayerOp::SetOpen(id.to_string(), html.to_string()));
    }
}

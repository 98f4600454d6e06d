use std::time::{Duration, Instant};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const DEFAULT_ZOOM: f64 = 1.0;
pub const DEFAULT_SCROLL_COOLDOWN: Duration = Duration::from_millis(10);

/// Owns the shared zoom factor and keeps every track and the scrollbar
/// proxy on one horizontal offset.
///
/// Offsets are in columns of the zoomed content. A sync window opened by one
/// scroll swallows any scroll arriving before it closes, so a track echoing
/// back the offset it was just given cannot start another round.
#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    zoom: f64,
    viewport: u16,
    offsets: Vec<u16>,
    proxy_offset: u16,
    cooldown: Duration,
    syncing_until: Option<Instant>,
}

impl ScrollCoordinator {
    pub fn new(track_count: usize, cooldown: Duration) -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            viewport: 0,
            offsets: vec![0; track_count],
            proxy_offset: 0,
            cooldown,
            syncing_until: None,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Clamps to [MIN_ZOOM, MAX_ZOOM]; non-finite input is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.clamp_offsets();
    }

    pub fn zoom_in(&mut self, step: f64) {
        self.set_zoom(self.zoom + step);
    }

    pub fn zoom_out(&mut self, step: f64) {
        self.set_zoom(self.zoom - step);
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom(DEFAULT_ZOOM);
    }

    pub fn zoom_label(&self) -> String {
        format!("{}%", (self.zoom * 100.0).round() as i64)
    }

    pub fn set_viewport(&mut self, columns: u16) {
        self.viewport = columns;
        self.clamp_offsets();
    }

    pub fn viewport(&self) -> u16 {
        self.viewport
    }

    /// Width of each track's inner content, `zoom * 100%` of the viewport.
    /// The proxy scrollbar spans the same width.
    pub fn content_width(&self) -> u16 {
        (f64::from(self.viewport) * self.zoom).round() as u16
    }

    pub fn max_offset(&self) -> u16 {
        self.content_width().saturating_sub(self.viewport)
    }

    pub fn track_count(&self) -> usize {
        self.offsets.len()
    }

    pub fn track_offset(&self, track: usize) -> u16 {
        self.offsets.get(track).copied().unwrap_or(self.proxy_offset)
    }

    pub fn proxy_offset(&self) -> u16 {
        self.proxy_offset
    }

    pub fn is_syncing(&self, now: Instant) -> bool {
        self.syncing_until.is_some_and(|until| now < until)
    }

    /// A track moved to `offset`. Returns false when swallowed by the guard.
    pub fn scroll_track(&mut self, track: usize, offset: u16, now: Instant) -> bool {
        if track >= self.offsets.len() {
            return false;
        }
        self.propagate(offset, now)
    }

    /// The scrollbar proxy moved to `offset`.
    pub fn scroll_proxy(&mut self, offset: u16, now: Instant) -> bool {
        self.propagate(offset, now)
    }

    /// Relative scroll of the proxy, for keys and the wheel.
    pub fn scroll_by(&mut self, delta: i32, now: Instant) -> bool {
        let target = (i32::from(self.proxy_offset) + delta).clamp(0, i32::from(u16::MAX));
        self.scroll_proxy(target as u16, now)
    }

    fn propagate(&mut self, offset: u16, now: Instant) -> bool {
        if self.is_syncing(now) {
            return false;
        }
        self.syncing_until = Some(now + self.cooldown);
        let offset = offset.min(self.max_offset());
        self.proxy_offset = offset;
        self.offsets.iter_mut().for_each(|o| *o = offset);
        true
    }

    fn clamp_offsets(&mut self) {
        let max = self.max_offset();
        self.proxy_offset = self.proxy_offset.min(max);
        self.offsets.iter_mut().for_each(|o| *o = (*o).min(max));
    }
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new(0, DEFAULT_SCROLL_COOLDOWN)
    }
}

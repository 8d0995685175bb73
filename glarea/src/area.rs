use std::time::{Duration, Instant};

use crate::timeout::{TimeoutQueue, TimerId};

/// The drawing surface as seen from inside a callback.
///
/// Owned by the event loop. Callbacks use it to read the current size,
/// queue a redraw and manage periodic timeouts.
#[derive(Debug)]
pub struct Area {
    width: u32,
    height: u32,
    redraw_queued: bool,
    timeouts: TimeoutQueue,
}

impl Area {
    pub fn new(width: u32, height: u32) -> Self {
        Area {
            width,
            height,
            // The first frame is drawn without anyone asking.
            redraw_queued: true,
            timeouts: TimeoutQueue::new(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width over height. A minimized window reports 1.0.
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn queue_draw(&mut self) {
        self.redraw_queued = true;
    }

    pub fn redraw_queued(&self) -> bool {
        self.redraw_queued
    }

    /// Calls [`crate::GlArea::timeout`] every `period` until it returns
    /// `ControlFlow::Break` or the timer is removed.
    pub fn add_timeout(&mut self, period: Duration) -> TimerId {
        let id = self.timeouts.add(period, Instant::now());
        log::debug!("timeout {id:?} added, period {period:?}");
        id
    }

    pub fn remove_timeout(&mut self, id: TimerId) -> bool {
        self.timeouts.remove(id)
    }

    pub fn timeout_count(&self) -> usize {
        self.timeouts.len()
    }

    /// Queues a redraw when the size actually changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.redraw_queued = true;
        }
    }

    pub(crate) fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_queued)
    }

    pub(crate) fn timeouts(&self) -> &TimeoutQueue {
        &self.timeouts
    }

    pub(crate) fn timeouts_mut(&mut self) -> &mut TimeoutQueue {
        &mut self.timeouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_area_draws_once() {
        let mut area = Area::new(640, 480);
        assert!(area.take_redraw());
        assert!(!area.take_redraw());
        area.queue_draw();
        assert!(area.redraw_queued());
    }

    #[test]
    fn aspect_ratio_follows_size() {
        let mut area = Area::new(640, 480);
        assert_eq!(area.aspect_ratio(), 640.0 / 480.0);

        area.take_redraw();
        area.resize(800, 800);
        assert_eq!(area.size(), (800, 800));
        assert_eq!(area.aspect_ratio(), 1.0);
        assert!(area.take_redraw());
    }

    #[test]
    fn zero_height_does_not_divide() {
        let area = Area::new(640, 0);
        assert_eq!(area.aspect_ratio(), 1.0);
    }

    #[test]
    fn timeouts_are_counted() {
        let mut area = Area::new(640, 480);
        let id = area.add_timeout(Duration::from_secs(1));
        assert_eq!(area.timeout_count(), 1);
        assert!(area.remove_timeout(id));
        assert_eq!(area.timeout_count(), 0);
    }
}

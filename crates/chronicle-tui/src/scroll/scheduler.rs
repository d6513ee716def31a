//! Frame scheduling abstraction
//!
//! The engine never calls a timing primitive directly. It asks a
//! [`FrameScheduler`] for "one callback next frame" and gets a handle it can
//! cancel. Whoever drives the display later hands due handles back to the
//! engine via `on_frame`.

/// Identifies one requested frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

pub trait FrameScheduler {
    /// Arrange for one frame callback and return its handle
    fn request_frame(&mut self) -> FrameHandle;

    /// Forget a requested callback; unknown handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Monotonic clock in milliseconds
    fn now(&self) -> f64;
}

/// Deterministic scheduler driven by an explicit clock
///
/// Requested frames become due on the next [`FrameQueue::take_due`] call.
/// Frames requested while due frames are being dispatched wait for the
/// following call, matching display-refresh callbacks.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    now_ms: f64,
    next_id: u64,
    pending: Vec<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    /// Move the clock forward by `delta_ms`
    pub fn advance(&mut self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.now_ms += delta_ms;
        }
    }

    /// Set the clock, never moving it backwards
    pub fn advance_to(&mut self, now_ms: f64) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }

    /// Drain every frame requested so far
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|pending| *pending != handle);
    }

    fn now(&self) -> f64 {
        self.now_ms
    }
}

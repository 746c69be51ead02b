//! Frame loop lifecycle
//!
//! The host's frame primitive (`requestAnimationFrame` in the browser) is
//! wrapped in a [`FrameScheduler`]. [`FrameLoop`] tracks the one outstanding
//! request so that teardown cancels it exactly once and a callback that
//! still arrives afterwards does nothing.

/// Handle for one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub i64);

/// Host frame primitive
pub trait FrameScheduler {
    /// Schedule the frame callback for the next display refresh
    fn request_frame(&mut self) -> Option<FrameRequest>;
    /// Cancel a scheduled callback
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Owns the pending frame request for one mounted game
#[derive(Debug)]
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameRequest>,
    frames: u64,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            frames: 0,
        }
    }

    /// Mount: schedule the first frame. No-op if already running.
    pub fn start(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Frame loop failed to start: scheduler refused the request");
        }
        self.pending.is_some()
    }

    /// Frame callback: run one frame and schedule the next.
    ///
    /// Returns false (and runs nothing) if the loop was torn down.
    pub fn on_frame<F: FnOnce()>(&mut self, frame: F) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        frame();
        self.frames += 1;
        self.pending = self.scheduler.request_frame();
        true
    }

    /// Teardown: cancel the outstanding request. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
            log::info!("Frame loop stopped after {} frames", self.frames);
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames run since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Scheduler for hosts without a display (native runner, tests).
/// Requests are just numbered; the caller drives frames itself.
#[derive(Debug, Default)]
pub struct HeadlessScheduler {
    next: i64,
    /// Requests cancelled so far, in order
    pub cancelled: Vec<FrameRequest>,
}

impl FrameScheduler for HeadlessScheduler {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        self.next += 1;
        Some(FrameRequest(self.next))
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.cancelled.push(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records cancellations somewhere that outlives the loop
    struct SharedScheduler {
        next: i64,
        cancelled: Rc<RefCell<Vec<FrameRequest>>>,
    }

    impl FrameScheduler for SharedScheduler {
        fn request_frame(&mut self) -> Option<FrameRequest> {
            self.next += 1;
            Some(FrameRequest(self.next))
        }

        fn cancel_frame(&mut self, request: FrameRequest) {
            self.cancelled.borrow_mut().push(request);
        }
    }

    struct RefusingScheduler;

    impl FrameScheduler for RefusingScheduler {
        fn request_frame(&mut self) -> Option<FrameRequest> {
            None
        }

        fn cancel_frame(&mut self, _request: FrameRequest) {
            panic!("nothing was ever scheduled");
        }
    }

    #[test]
    fn test_frames_run_only_while_mounted() {
        let mut frames = FrameLoop::new(HeadlessScheduler::default());
        let mut ticks = 0;

        // Not started yet
        assert!(!frames.on_frame(|| ticks += 1));
        assert_eq!(ticks, 0);

        assert!(frames.start());
        for _ in 0..3 {
            assert!(frames.on_frame(|| ticks += 1));
        }
        assert_eq!(ticks, 3);
        assert_eq!(frames.frames(), 3);
        assert!(frames.is_running());
    }

    #[test]
    fn test_no_frame_after_teardown() {
        let mut frames = FrameLoop::new(HeadlessScheduler::default());
        frames.start();
        frames.on_frame(|| {});
        frames.stop();

        let mut ran = false;
        assert!(!frames.on_frame(|| ran = true));
        assert!(!ran);
        assert!(!frames.is_running());
    }

    #[test]
    fn test_cancel_exactly_once() {
        let mut frames = FrameLoop::new(HeadlessScheduler::default());
        frames.start();
        frames.on_frame(|| {});
        frames.stop();
        frames.stop();
        // Only the request scheduled by the last frame was cancelled
        assert_eq!(frames.scheduler().cancelled, vec![FrameRequest(2)]);
    }

    #[test]
    fn test_drop_cancels_pending_frame() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        {
            let mut frames = FrameLoop::new(SharedScheduler {
                next: 0,
                cancelled: cancelled.clone(),
            });
            frames.start();
        }
        assert_eq!(*cancelled.borrow(), vec![FrameRequest(1)]);
    }

    #[test]
    fn test_drop_after_stop_does_not_cancel_again() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        {
            let mut frames = FrameLoop::new(SharedScheduler {
                next: 0,
                cancelled: cancelled.clone(),
            });
            frames.start();
            frames.stop();
        }
        assert_eq!(cancelled.borrow().len(), 1);
    }

    #[test]
    fn test_restart_after_teardown() {
        let mut frames = FrameLoop::new(HeadlessScheduler::default());
        frames.start();
        frames.stop();
        assert!(frames.start());
        assert!(!frames.start()); // already running
        let mut ran = false;
        assert!(frames.on_frame(|| ran = true));
        assert!(ran);
    }

    #[test]
    fn test_refused_request_leaves_loop_stopped() {
        let mut frames = FrameLoop::new(RefusingScheduler);
        assert!(!frames.start());
        assert!(!frames.is_running());
        frames.stop();
    }
}

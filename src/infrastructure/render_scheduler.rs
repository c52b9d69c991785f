//! At most one redraw per animation frame, however many input events arrive.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

type FrameCallback = Box<dyn FnOnce() + 'static>;
type RedrawHook = Rc<dyn Fn() + 'static>;

/// Something that runs a callback before the next paint.
pub trait FrameRequester {
    fn request_frame(&self, callback: FrameCallback);
}

/// `requestAnimationFrame` through leptos.
#[derive(Clone, Copy, Default)]
pub struct AnimationFrameRequester;

impl FrameRequester for AnimationFrameRequester {
    fn request_frame(&self, callback: FrameCallback) {
        leptos::request_animation_frame(callback);
    }
}

/// Frames that only run when the owner says so. Used off-browser.
#[derive(Clone, Default)]
pub struct QueuedFrameRequester {
    queue: Rc<RefCell<VecDeque<FrameCallback>>>,
}

impl QueuedFrameRequester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_frames(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run every callback queued before this call; returns how many ran.
    pub fn run_frame(&self) -> usize {
        let frame: Vec<FrameCallback> = self.queue.borrow_mut().drain(..).collect();
        let count = frame.len();
        for callback in frame {
            callback();
        }
        count
    }
}

impl FrameRequester for QueuedFrameRequester {
    fn request_frame(&self, callback: FrameCallback) {
        self.queue.borrow_mut().push_back(callback);
    }
}

pub struct RenderScheduler {
    pending: Rc<Cell<bool>>,
    redraw: Rc<RefCell<Option<RedrawHook>>>,
    requester: Box<dyn FrameRequester>,
}

impl RenderScheduler {
    pub fn new(requester: Box<dyn FrameRequester>) -> Self {
        Self { pending: Rc::new(Cell::new(false)), redraw: Rc::new(RefCell::new(None)), requester }
    }

    pub fn for_browser() -> Self {
        Self::new(Box::new(AnimationFrameRequester))
    }

    /// The hook reads current state when the frame fires, not when scheduled.
    pub fn set_redraw(&self, hook: impl Fn() + 'static) {
        *self.redraw.borrow_mut() = Some(Rc::new(hook));
    }

    pub fn clear_redraw(&self) {
        *self.redraw.borrow_mut() = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Returns `false` when a frame was already pending.
    pub fn schedule_render(&self) -> bool {
        if self.pending.replace(true) {
            return false;
        }
        let pending = Rc::clone(&self.pending);
        let redraw = Rc::clone(&self.redraw);
        self.requester.request_frame(Box::new(move || {
            pending.set(false);
            // Clone out so the hook may replace itself or schedule again.
            let hook = redraw.borrow().clone();
            if let Some(hook) = hook {
                hook();
            }
        }));
        true
    }
}

//! Dirty flag to frame: any number of invalidations before the next frame
//! collapse into a single render.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::render::{AnimationFrame, request_animation_frame};

/// Source of "next frame" callbacks.
pub trait FrameRequester {
    fn request_frame(&mut self, callback: Box<dyn FnOnce()>);
}

/// `requestAnimationFrame` through gloo. The handle of the last request is
/// kept so the frame is not cancelled by drop.
#[derive(Default)]
pub struct AnimationFrameRequester {
    last: Option<AnimationFrame>,
}

impl AnimationFrameRequester {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameRequester for AnimationFrameRequester {
    fn request_frame(&mut self, callback: Box<dyn FnOnce()>) {
        self.last = Some(request_animation_frame(move |_timestamp| callback()));
    }
}

/// Frames queued until `run_pending` is called. Headless hosts and tests drive
/// this by hand.
#[derive(Clone, Default)]
pub struct QueuedFrames {
    queue: Rc<RefCell<Vec<Box<dyn FnOnce()>>>>,
}

impl QueuedFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run every frame queued so far and return how many ran.
    pub fn run_pending(&self) -> usize {
        let frames = std::mem::take(&mut *self.queue.borrow_mut());
        let count = frames.len();
        for frame in frames {
            frame();
        }
        count
    }
}

impl FrameRequester for QueuedFrames {
    fn request_frame(&mut self, callback: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push(callback);
    }
}

pub struct RenderScheduler {
    requester: Box<dyn FrameRequester>,
    pending: Rc<Cell<bool>>,
    requested: usize,
}

impl RenderScheduler {
    pub fn new(requester: Box<dyn FrameRequester>) -> Self {
        Self { requester, pending: Rc::new(Cell::new(false)), requested: 0 }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Frames requested over the scheduler's lifetime.
    pub fn frames_requested(&self) -> usize {
        self.requested
    }

    /// Queue `render` for the next frame unless a frame is already pending.
    /// Returns whether a new frame was requested.
    pub fn schedule(&mut self, render: impl FnOnce() + 'static) -> bool {
        if self.pending.replace(true) {
            return false;
        }
        self.requested += 1;
        let pending = Rc::clone(&self.pending);
        self.requester.request_frame(Box::new(move || {
            pending.set(false);
            render();
        }));
        true
    }
}

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use gtk4::glib;
use log::warn;

use crate::game::{Scheduler, TaskId};

/// Runs session tasks as one-shot main-loop timeouts.
#[derive(Default)]
pub struct GlibScheduler {
    sources: Rc<RefCell<HashMap<TaskId, glib::SourceId>>>,
    handler: Option<Rc<dyn Fn(TaskId)>>,
}

impl GlibScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the task id when a timeout fires.
    pub fn set_handler(&mut self, handler: Rc<dyn Fn(TaskId)>) {
        self.handler = Some(handler);
    }
}

impl Scheduler for GlibScheduler {
    fn schedule(&mut self, id: TaskId, delay: Duration) {
        let Some(handler) = self.handler.clone() else {
            warn!("task {:?} scheduled before the main loop was wired", id);
            return;
        };
        let sources = self.sources.clone();
        let source = glib::timeout_add_local_once(delay, move || {
            // The source is spent once this runs; forget it before dispatching.
            sources.borrow_mut().remove(&id);
            handler(id);
        });
        self.sources.borrow_mut().insert(id, source);
    }

    fn cancel(&mut self, id: TaskId) {
        let source = self.sources.borrow_mut().remove(&id);
        if let Some(source) = source {
            source.remove();
        }
    }
}

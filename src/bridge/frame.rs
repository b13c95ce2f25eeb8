//! Computation frames and their lifetime bookkeeping.
//!
//! A [`Frame`] owns one launched step logic together with:
//!
//! - the destination stack, whose bottom entry is the caller's
//!   [`ResultStage`] and whose other entries belong to resumptions that are
//!   still on the call stack;
//! - `ref_count`, the number of live [`FrameRef`] handles (the launch
//!   handle, the adapter's handle while it calls `bind`, and every
//!   continuation that has not been dropped);
//! - `suspend_depth`, 1 while the step logic is parked on an `.await` and 0
//!   while it runs.
//!
//! The step logic is dropped exactly once: when it returns its final value
//! (`Completed`), or when it is parked and the last handle goes away
//! (`Reclaimed`).

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use futures::task::noop_waker_ref;
use smallvec::SmallVec;

use super::error::{ProtocolError, escalate};
use super::stage::ResultStage;
use super::suspend::Mailbox;
use crate::typeclass::Effect;

/// The boxed `async` block a frame drives.
pub(crate) type StepLogic<M> = Pin<Box<dyn Future<Output = M>>>;

/// A slot waiting for exactly one composed effect value.
pub(crate) type Destination<M> = Rc<ResultStage<M>>;

static NEXT_FRAME_ID: AtomicU64 = AtomicU64::new(1);

/// Where a frame is in its life.
///
/// `Completed` and `Reclaimed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum FrameStatus {
    /// The step logic is executing.
    Running,
    /// The step logic is parked on an awaited effect value.
    Suspended,
    /// The step logic produced its final value and was dropped.
    Completed,
    /// The step logic was dropped while parked because nothing could resume it.
    Reclaimed,
}

pub(crate) struct Frame<M: Effect> {
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    id: u64,
    logic: RefCell<Option<StepLogic<M>>>,
    mailbox: Rc<Mailbox<M>>,
    destinations: RefCell<SmallVec<[Destination<M>; 4]>>,
    ref_count: Cell<usize>,
    suspend_depth: Cell<usize>,
    status: Cell<FrameStatus>,
}

impl<M: Effect> Frame<M> {
    #[cfg(test)]
    pub(crate) fn status(&self) -> FrameStatus {
        self.status.get()
    }

    pub(crate) fn destination_depth(&self) -> usize {
        self.destinations.borrow().len()
    }

    /// Pushes a destination and returns the new stack depth.
    pub(crate) fn push_destination(&self, destination: Destination<M>) -> usize {
        let mut destinations = self.destinations.borrow_mut();
        destinations.push(destination);
        destinations.len()
    }

    /// Writes `value` into the top destination and pops it.
    pub(crate) fn pop_and_write(&self, value: M) {
        let destination = self.destinations.borrow_mut().pop();
        let Some(destination) = destination else {
            escalate(ProtocolError::StackImbalance)
        };
        if let Err(error) = destination.write(value) {
            escalate(error);
        }
    }

    pub(crate) fn on_suspend(&self) {
        if self.suspend_depth.get() != 0 {
            escalate(ProtocolError::DoubleSuspend);
        }
        self.suspend_depth.set(1);
        self.status.set(FrameStatus::Suspended);
        lifecycle!(self, "suspend");
        self.maybe_destroy();
    }

    pub(crate) fn on_resume(&self) {
        if self.suspend_depth.get() == 0 {
            escalate(ProtocolError::ReentrantResume);
        }
        self.suspend_depth.set(0);
        self.status.set(FrameStatus::Running);
        lifecycle!(self, "resume");
    }

    /// Fails unless the frame is parked and can be resumed.
    pub(crate) fn ensure_resumable(&self) {
        match self.status.get() {
            FrameStatus::Suspended => {}
            FrameStatus::Running => escalate(ProtocolError::ReentrantResume),
            FrameStatus::Completed | FrameStatus::Reclaimed => {
                escalate(ProtocolError::UseAfterReclaim)
            }
        }
    }

    fn inc_ref(&self) {
        self.ref_count.set(self.ref_count.get() + 1);
        lifecycle!(self, "inc_ref");
    }

    fn dec_ref(&self) {
        self.ref_count.set(self.ref_count.get().saturating_sub(1));
        lifecycle!(self, "dec_ref");
        self.maybe_destroy();
    }

    fn maybe_destroy(&self) {
        if self.status.get() == FrameStatus::Suspended
            && self.suspend_depth.get() > 0
            && self.ref_count.get() == 0
        {
            self.reclaim();
        }
    }

    fn reclaim(&self) {
        self.status.set(FrameStatus::Reclaimed);
        // Taken first so the step logic's destructors run with no borrow held.
        let logic = self
            .logic
            .try_borrow_mut()
            .ok()
            .and_then(|mut logic| logic.take());
        lifecycle!(self, "reclaim");
        drop(logic);
    }

    fn complete(&self) {
        self.status.set(FrameStatus::Completed);
        let logic = self.logic.borrow_mut().take();
        lifecycle!(self, "complete");
        drop(logic);
    }
}

/// A counted handle to a frame.
///
/// Cloning increments the frame's reference count and dropping decrements
/// it; the drop that takes a parked frame to zero reclaims it.
pub(crate) struct FrameRef<M: Effect> {
    frame: Rc<Frame<M>>,
}

impl<M: Effect> FrameRef<M> {
    /// Creates a running frame whose only handle is the returned one.
    pub(crate) fn launch(logic: StepLogic<M>, mailbox: Rc<Mailbox<M>>) -> Self {
        let frame = Frame {
            id: NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed),
            logic: RefCell::new(Some(logic)),
            mailbox,
            destinations: RefCell::new(SmallVec::new()),
            ref_count: Cell::new(1),
            suspend_depth: Cell::new(0),
            status: Cell::new(FrameStatus::Running),
        };
        lifecycle!(frame, "launch");
        Self {
            frame: Rc::new(frame),
        }
    }

    /// Runs the step logic until it suspends or completes, and writes what it
    /// produced into the current destination.
    ///
    /// On suspension the parked effect value is bound to a continuation for
    /// the rest of the step logic; the composed value is what gets written.
    pub(crate) fn advance(&self) {
        let polled = {
            let Ok(mut logic) = self.logic.try_borrow_mut() else {
                escalate(ProtocolError::ReentrantResume)
            };
            let Some(future) = logic.as_mut() else {
                escalate(ProtocolError::UseAfterReclaim)
            };
            let mut context = Context::from_waker(noop_waker_ref());
            future.as_mut().poll(&mut context)
        };

        match polled {
            Poll::Ready(value) => {
                // A request left behind belongs to an await the logic abandoned.
                if self.mailbox.take().is_some() {
                    escalate(ProtocolError::ForeignAwait);
                }
                self.complete();
                self.pop_and_write(value);
            }
            Poll::Pending => {
                let Some(suspension) = self.mailbox.take() else {
                    escalate(ProtocolError::ForeignAwait)
                };
                let composed = suspension.suspend(self.clone());
                self.pop_and_write(composed);
            }
        }
    }
}

impl<M: Effect> std::ops::Deref for FrameRef<M> {
    type Target = Frame<M>;

    fn deref(&self) -> &Frame<M> {
        &self.frame
    }
}

impl<M: Effect> Clone for FrameRef<M> {
    fn clone(&self) -> Self {
        self.frame.inc_ref();
        Self {
            frame: Rc::clone(&self.frame),
        }
    }
}

impl<M: Effect> Drop for FrameRef<M> {
    fn drop(&mut self) {
        self.frame.dec_ref();
    }
}

/// Launches `logic` and returns the value deposited in the caller's stage.
///
/// If the step logic never suspends, that is its final value lifted into the
/// effect. Otherwise it is the value composed by the first suspension's
/// `bind`, which already contains every later step that `bind` chose to run.
pub(crate) fn launch<M: Effect>(logic: StepLogic<M>, mailbox: Rc<Mailbox<M>>) -> M {
    let stage = Rc::new(ResultStage::new());
    let frame = FrameRef::launch(logic, mailbox);
    frame.push_destination(Rc::clone(&stage));
    frame.advance();
    if frame.destination_depth() != 0 {
        escalate(ProtocolError::StackImbalance);
    }
    drop(frame);
    stage.read().unwrap_or_else(|error| escalate(error))
}

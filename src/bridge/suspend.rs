//! The suspension adapter.
//!
//! Awaiting [`Perform`] happens in two halves. Inside the poll, the future
//! only parks its effect value in the frame's [`Mailbox`] and returns
//! `Pending`. Once the poll has unwound, the frame takes the parked request
//! and calls [`Suspension::suspend`], which binds the effect value to a
//! continuation for the rest of the step logic. Splitting it this way lets
//! `bind` resume the step logic synchronously without polling a future that
//! is still being polled.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use super::continuation::Continuation;
use super::error::{ProtocolError, escalate};
use super::frame::FrameRef;
use super::stage::ResultStage;
use crate::typeclass::{Effect, TypeConstructor};

/// A parked await, erased over the awaited value's inner type.
pub(crate) trait Suspension<M: Effect> {
    /// Binds the awaited value to the rest of the step logic and returns the
    /// composed effect value.
    fn suspend(self: Box<Self>, frame: FrameRef<M>) -> M;
}

/// Hand-off point between a frame and its step logic.
///
/// The step logic only ever sees the mailbox, never the frame, so the frame
/// does not own a handle to itself.
pub(crate) struct Mailbox<M: Effect> {
    request: RefCell<Option<Box<dyn Suspension<M>>>>,
}

impl<M: Effect> Mailbox<M> {
    pub(crate) const fn new() -> Self {
        Self {
            request: RefCell::new(None),
        }
    }

    fn post(&self, suspension: Box<dyn Suspension<M>>) {
        if self.request.borrow_mut().replace(suspension).is_some() {
            escalate(ProtocolError::ForeignAwait);
        }
    }

    pub(crate) fn take(&self) -> Option<Box<dyn Suspension<M>>> {
        self.request.borrow_mut().take()
    }

    fn has_request(&self) -> bool {
        self.request.borrow().is_some()
    }
}

struct Awaited<E: Effect> {
    effect: E,
    resumed_value: Rc<ResultStage<E::Inner>>,
}

impl<E, M> Suspension<M> for Awaited<E>
where
    M: Effect,
    E: Effect + TypeConstructor<WithType<M::Inner> = M>,
{
    fn suspend(self: Box<Self>, frame: FrameRef<M>) -> M {
        let Self {
            effect,
            resumed_value,
        } = *self;
        frame.on_suspend();
        let continuation = Continuation::new(frame, resumed_value);
        effect.bind::<M::Inner, _>(move |value| continuation.resume(value))
    }
}

enum PerformState<E: Effect> {
    Unpolled(E),
    Parked(Rc<ResultStage<E::Inner>>),
    Finished,
}

/// The future returned by [`Co::perform`](super::Co::perform).
///
/// Resolves to the value the effect passes to its continuation. If the
/// effect never calls the continuation, this future is never resolved and
/// the step logic is dropped at its `.await`.
///
/// Once polled it must be awaited to the end. Dropping it while its effect
/// value is still waiting for the frame (for example as the losing branch of
/// a `select`) panics with [`ProtocolError::ForeignAwait`].
#[must_use = "an effect value does nothing unless it is `.await`ed"]
pub struct Perform<E: Effect, M: Effect> {
    state: PerformState<E>,
    mailbox: Rc<Mailbox<M>>,
}

impl<E: Effect, M: Effect> Perform<E, M> {
    pub(crate) fn new(effect: E, mailbox: Rc<Mailbox<M>>) -> Self {
        Self {
            state: PerformState::Unpolled(effect),
            mailbox,
        }
    }
}

// No field is ever pinned: the effect value is moved out on first poll.
impl<E: Effect, M: Effect> Unpin for Perform<E, M> {}

impl<E: Effect, M: Effect> Drop for Perform<E, M> {
    fn drop(&mut self) {
        if matches!(self.state, PerformState::Parked(_))
            && self.mailbox.has_request()
            && !std::thread::panicking()
        {
            escalate(ProtocolError::ForeignAwait);
        }
    }
}

impl<E, M> Future for Perform<E, M>
where
    M: Effect,
    E: Effect + TypeConstructor<WithType<M::Inner> = M>,
{
    type Output = E::Inner;

    fn poll(self: Pin<&mut Self>, _context: &mut Context<'_>) -> Poll<E::Inner> {
        let this = self.get_mut();
        match std::mem::replace(&mut this.state, PerformState::Finished) {
            PerformState::Unpolled(effect) => {
                let resumed_value = Rc::new(ResultStage::new());
                this.mailbox.post(Box::new(Awaited {
                    effect,
                    resumed_value: Rc::clone(&resumed_value),
                }));
                this.state = PerformState::Parked(resumed_value);
                Poll::Pending
            }
            PerformState::Parked(resumed_value) => match resumed_value.read() {
                Ok(value) => Poll::Ready(value),
                Err(error) => escalate(error),
            },
            PerformState::Finished => panic!("`Perform` polled after completion"),
        }
    }
}

impl<E: Effect, M: Effect> std::fmt::Debug for Perform<E, M> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            PerformState::Unpolled(_) => "unpolled",
            PerformState::Parked(_) => "parked",
            PerformState::Finished => "finished",
        };
        formatter
            .debug_struct("Perform")
            .field("state", &state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::task::noop_waker_ref;
    use rstest::rstest;

    #[rstest]
    fn first_poll_parks_the_effect_in_the_mailbox() {
        let mailbox: Rc<Mailbox<Option<i32>>> = Rc::new(Mailbox::new());
        let mut perform = Perform::new(Some(3_u8), Rc::clone(&mailbox));
        let mut context = Context::from_waker(noop_waker_ref());

        assert!(Pin::new(&mut perform).poll(&mut context).is_pending());
        assert_eq!(format!("{perform:?}"), "Perform { state: \"parked\", .. }");
        assert!(mailbox.take().is_some());
        assert!(mailbox.take().is_none());
    }

    #[test]
    #[should_panic(expected = "exactly one effect value")]
    fn two_parked_requests_fail_loudly() {
        let mailbox: Rc<Mailbox<Option<i32>>> = Rc::new(Mailbox::new());
        let mut first = Perform::new(Some(1_i32), Rc::clone(&mailbox));
        let mut second = Perform::new(Some(2_i32), Rc::clone(&mailbox));
        let mut context = Context::from_waker(noop_waker_ref());

        let _ = Pin::new(&mut first).poll(&mut context);
        let _ = Pin::new(&mut second).poll(&mut context);
    }

    #[test]
    #[should_panic(expected = "exactly one effect value")]
    fn dropping_a_request_the_frame_never_took_fails_loudly() {
        let mailbox: Rc<Mailbox<Option<i32>>> = Rc::new(Mailbox::new());
        let mut perform = Perform::new(Some(1_i32), Rc::clone(&mailbox));
        let mut context = Context::from_waker(noop_waker_ref());

        let _ = Pin::new(&mut perform).poll(&mut context);
        drop(perform);
    }

    #[rstest]
    fn dropping_a_parked_await_after_the_frame_took_it_is_silent() {
        let mailbox: Rc<Mailbox<Option<i32>>> = Rc::new(Mailbox::new());
        let mut perform = Perform::new(Some(1_i32), Rc::clone(&mailbox));
        let mut context = Context::from_waker(noop_waker_ref());

        let _ = Pin::new(&mut perform).poll(&mut context);
        let request = mailbox.take();
        drop(perform);
        assert!(request.is_some());
    }

    #[test]
    #[should_panic(expected = "read before it was written")]
    fn polling_a_parked_await_without_a_value_fails_loudly() {
        let mailbox: Rc<Mailbox<Option<i32>>> = Rc::new(Mailbox::new());
        let mut perform = Perform::new(Some(1_i32), mailbox);
        let mut context = Context::from_waker(noop_waker_ref());

        let _ = Pin::new(&mut perform).poll(&mut context);
        let _ = Pin::new(&mut perform).poll(&mut context);
    }
}

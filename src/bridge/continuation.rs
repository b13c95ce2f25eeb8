//! One-shot continuations handed to `bind`.

use std::cell::Cell;
use std::rc::Rc;

use super::error::{ProtocolError, escalate};
use super::frame::FrameRef;
use super::stage::ResultStage;
use crate::typeclass::Effect;

/// "The rest of the step logic" after one awaited value of type `A`.
///
/// Holding a continuation keeps its frame resumable. Calling it delivers the
/// awaited value, runs the step logic up to its next suspension (or its end),
/// and returns the effect value that run produced.
pub(crate) struct Continuation<M: Effect, A> {
    frame: FrameRef<M>,
    resumed_value: Rc<ResultStage<A>>,
    invoked: Cell<bool>,
}

impl<M: Effect, A> Continuation<M, A> {
    pub(crate) fn new(frame: FrameRef<M>, resumed_value: Rc<ResultStage<A>>) -> Self {
        Self {
            frame,
            resumed_value,
            invoked: Cell::new(false),
        }
    }

    /// Resumes the frame with `value`.
    ///
    /// # Panics
    ///
    /// On a second call, or when the frame already completed or was
    /// reclaimed.
    pub(crate) fn resume(&self, value: A) -> M {
        if self.invoked.replace(true) {
            escalate(ProtocolError::DoubleInvoke);
        }
        let frame = &self.frame;
        frame.ensure_resumable();

        let destination = Rc::new(ResultStage::new());
        let depth = frame.push_destination(Rc::clone(&destination));
        frame.on_resume();
        if let Err(error) = self.resumed_value.write(value) {
            escalate(error);
        }
        frame.advance();

        if frame.destination_depth() != depth - 1 {
            escalate(ProtocolError::StackImbalance);
        }
        destination.read().unwrap_or_else(|error| escalate(error))
    }
}

#[cfg(test)]
mod tests {
    use crate::bridge::run;
    use crate::effect::State;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[rstest]
    fn continuation_is_called_once_per_step() {
        let trace = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&trace);
        let counter: State<u32, u32> = run(move |co| async move {
            let first = co.perform(State::<u32, u32>::get()).await;
            recorder.borrow_mut().push(first);
            co.perform(State::put(first + 1)).await;
            let second = co.perform(State::<u32, u32>::get()).await;
            recorder.borrow_mut().push(second);
            second * 10
        });

        assert!(trace.borrow().is_empty());
        assert_eq!(counter.run(4), (50, 5));
        assert_eq!(*trace.borrow(), vec![4, 5]);
    }

    #[test]
    #[should_panic(expected = "invoked more than once")]
    fn running_a_bridged_state_twice_fails_loudly() {
        let counter: State<u32, u32> = run(|co| async move {
            let value = co.perform(State::<u32, u32>::get()).await;
            value + 1
        });
        assert_eq!(counter.run(1), (2, 1));
        counter.run(1);
    }
}

//! Launching step logic.

use std::future::Future;
use std::rc::Rc;

use static_assertions::assert_not_impl_any;

use super::frame::{StepLogic, launch};
use super::suspend::{Mailbox, Perform};
use crate::typeclass::{Effect, TypeConstructor};

/// The await primitive available inside step logic.
///
/// A `Co<M>` is handed to the closure passed to [`run`] or [`run_effect`].
/// Every effect value awaited through it must belong to the same effect
/// family as the computation's result `M`: inside a `Result<T, E>`
/// computation only `Result<_, E>` values can be performed, inside a
/// `State<S, A>` computation only `State<S, _>` values.
///
/// # Examples
///
/// ```rust
/// use monad_bridge::bridge::{Co, run};
///
/// async fn twice(co: &Co<Result<u32, String>>, value: u32) -> u32 {
///     co.perform(value.checked_mul(2).ok_or_else(|| "overflow".to_string())).await
/// }
///
/// let quadrupled: Result<u32, String> = run(|co| async move {
///     let doubled = twice(&co, 5).await;
///     twice(&co, doubled).await
/// });
/// assert_eq!(quadrupled, Ok(20));
/// ```
pub struct Co<M: Effect> {
    mailbox: Rc<Mailbox<M>>,
}

assert_not_impl_any!(Co<Option<u8>>: Send, Sync);

impl<M: Effect> Co<M> {
    pub(crate) const fn new(mailbox: Rc<Mailbox<M>>) -> Self {
        Self { mailbox }
    }

    /// Awaits `effect`, suspending the step logic until the effect's `bind`
    /// calls the continuation with a value.
    ///
    /// If `bind` never calls it (an absent value, an error), the `.await`
    /// never returns: the remaining steps do not run, and the computation's
    /// result is whatever `bind` composed instead.
    pub fn perform<E>(&self, effect: E) -> Perform<E, M>
    where
        E: Effect + TypeConstructor<WithType<M::Inner> = M>,
    {
        Perform::new(effect, Rc::clone(&self.mailbox))
    }
}

impl<M: Effect> Clone for Co<M> {
    fn clone(&self) -> Self {
        Self {
            mailbox: Rc::clone(&self.mailbox),
        }
    }
}

impl<M: Effect> std::fmt::Debug for Co<M> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("Co").finish_non_exhaustive()
    }
}

/// Runs step logic whose final value is already an effect value.
///
/// This is the form to use when the last step should be returned as is,
/// for example an error produced without awaiting it.
///
/// # Examples
///
/// ```rust
/// use monad_bridge::bridge::run_effect;
///
/// let checked: Result<i32, String> = run_effect(|co| async move {
///     let x = co.perform(Ok::<i32, String>(7)).await;
///     if x > 5 { Err(format!("{x} is too large")) } else { Ok(x) }
/// });
/// assert_eq!(checked, Err("7 is too large".to_string()));
/// ```
pub fn run_effect<M, F, Fut>(step_logic: F) -> M
where
    M: Effect,
    F: FnOnce(Co<M>) -> Fut,
    Fut: Future<Output = M> + 'static,
{
    let mailbox = Rc::new(Mailbox::new());
    let logic: StepLogic<M> = Box::pin(step_logic(Co::new(Rc::clone(&mailbox))));
    launch(logic, mailbox)
}

/// Runs step logic and lifts its final value with [`Effect::pure`].
///
/// The result is the same value that hand-nested `bind` calls over the
/// awaited effects would produce.
///
/// # Examples
///
/// ```rust
/// use monad_bridge::bridge::run;
/// use monad_bridge::effect::State;
///
/// let next: State<u32, u32> = run(|co| async move {
///     let current = co.perform(State::<u32, u32>::get()).await;
///     co.perform(State::put(current + 1)).await;
///     current
/// });
/// assert_eq!(next.run(7), (7, 8));
/// ```
pub fn run<M, F, Fut>(step_logic: F) -> M
where
    M: Effect,
    F: FnOnce(Co<M>) -> Fut,
    Fut: Future<Output = M::Inner> + 'static,
{
    run_effect(|co| {
        let body = step_logic(co);
        async move { M::pure(body.await) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::Identity;
    use rstest::rstest;

    #[rstest]
    fn step_logic_without_awaits_is_lifted_with_pure() {
        let value: Option<&str> = run(|_| async { "done" });
        assert_eq!(value, Some("done"));
    }

    #[rstest]
    fn run_effect_returns_the_final_effect_unchanged() {
        let value: Option<i32> = run_effect(|_| async { None });
        assert_eq!(value, None);
    }

    #[rstest]
    fn identity_runs_steps_in_order() {
        let result: Identity<Vec<&str>> = run(|co| async move {
            let mut steps = vec![co.perform(Identity::new("a")).await];
            steps.push(co.perform(Identity::new("b")).await);
            steps.push(co.perform(Identity::new("c")).await);
            steps
        });
        assert_eq!(result.into_inner(), vec!["a", "b", "c"]);
    }

    #[rstest]
    fn awaited_values_may_change_type_between_steps() {
        let rendered: Option<String> = run(|co| async move {
            let count = co.perform(Some(3_usize)).await;
            let unit = co.perform(Some('x')).await;
            unit.to_string().repeat(count)
        });
        assert_eq!(rendered.as_deref(), Some("xxx"));
    }

    #[rstest]
    fn co_can_be_cloned_into_helpers() {
        async fn add(co: Co<Option<i32>>, left: Option<i32>, right: Option<i32>) -> i32 {
            co.perform(left).await + co.perform(right).await
        }

        let total: Option<i32> = run(|co| async move { add(co.clone(), Some(1), Some(2)).await * 10 });
        assert_eq!(total, Some(30));
    }
}

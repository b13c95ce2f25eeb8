//! State effect - computations that thread an implicit state value.
//!
//! A `State<S, A>` wraps a transition `S -> (A, S)`. `bind` does not run
//! anything: it builds a new transition that runs the first one, feeds the
//! result to the continuation and runs whatever that returns with the
//! updated state. This makes `State` the effect that *defers* every
//! continuation until [`State::run`] is called, which is the interesting
//! case for the bridge.
//!
//! # Laws
//!
//! ## Monad Laws
//!
//! - Left Identity: `State::pure(a).flat_map(f) == f(a)`
//! - Right Identity: `m.flat_map(State::pure) == m`
//! - Associativity: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
//!
//! ## State Laws
//!
//! - Get Put: `get().flat_map(put) == pure(())`
//! - Put Get: `put(s).then(get())` returns `s`
//! - Put Put: `put(s1).then(put(s2)) == put(s2)`
//!
//! # Examples
//!
//! ```rust
//! use monad_bridge::effect::State;
//!
//! let tick: State<i32, i32> = State::get()
//!     .flat_map(|current| State::put(current + 1).then(State::pure(current)));
//!
//! assert_eq!(tick.run(10), (10, 11));
//! ```

use std::rc::Rc;

use crate::typeclass::{Effect, TypeConstructor};

/// A computation from an initial state to a result and a final state.
///
/// Cloning is cheap: the transition sits behind an `Rc`. A plain `State`
/// can be run any number of times; one produced by
/// [`bridge::run`](crate::bridge::run) holds one-shot continuations and
/// aborts if run twice.
///
/// # Examples
///
/// ```rust
/// use monad_bridge::effect::State;
///
/// let state: State<i32, i32> = State::new(|s: i32| (s * 2, s + 1));
/// assert_eq!(state.run(10), (20, 11));
/// ```
pub struct State<S, A> {
    /// The wrapped state transition function.
    run_function: Rc<dyn Fn(S) -> (A, S)>,
}

impl<S, A> State<S, A>
where
    S: 'static,
    A: 'static,
{
    /// Creates a new State from a state transition function.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(S) -> (A, S) + 'static,
    {
        Self {
            run_function: Rc::new(function),
        }
    }

    /// Runs the computation, returning the result and the final state.
    ///
    /// ```rust
    /// use monad_bridge::effect::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s + 1, s * 2));
    /// assert_eq!(state.run(10), (11, 20));
    /// ```
    pub fn run(&self, initial_state: S) -> (A, S) {
        (self.run_function)(initial_state)
    }

    /// Runs the computation and keeps only the result.
    pub fn eval(&self, initial_state: S) -> A {
        self.run(initial_state).0
    }

    /// Runs the computation and keeps only the final state.
    pub fn exec(&self, initial_state: S) -> S {
        self.run(initial_state).1
    }

    /// Creates a State that returns a constant value and leaves the state alone.
    pub fn pure(value: A) -> Self
    where
        A: Clone,
    {
        Self::new(move |state| (value.clone(), state))
    }

    /// Chains this State with a function that produces another State.
    ///
    /// ```rust
    /// use monad_bridge::effect::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s, s + 1));
    /// let chained = state.flat_map(|value| State::new(move |s: i32| (value + s, s * 2)));
    /// // First: (10, 11), then with state 11: (10 + 11, 22)
    /// assert_eq!(chained.run(10), (21, 22));
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> State<S, B>
    where
        F: Fn(A) -> State<S, B> + 'static,
        B: 'static,
    {
        let original_function = self.run_function;
        State::new(move |state| {
            let (result, intermediate_state) = (original_function)(state);
            function(result).run(intermediate_state)
        })
    }

    /// Sequences two States, discarding the first result.
    #[must_use]
    pub fn then<B>(self, next: State<S, B>) -> State<S, B>
    where
        B: 'static,
    {
        self.flat_map(move |_| next.clone())
    }
}

impl<St> State<St, St>
where
    St: Clone + 'static,
{
    /// Creates a State that returns the current state without modifying it.
    #[must_use]
    pub fn get() -> Self {
        Self::new(|state: St| (state.clone(), state))
    }
}

impl<S> State<S, ()>
where
    S: 'static,
{
    /// Creates a State that replaces the current state.
    ///
    /// ```rust
    /// use monad_bridge::effect::State;
    ///
    /// let state: State<i32, ()> = State::put(100);
    /// assert_eq!(state.exec(42), 100);
    /// ```
    pub fn put(new_state: S) -> Self
    where
        S: Clone,
    {
        Self::new(move |_| ((), new_state.clone()))
    }

    /// Creates a State that transforms the current state.
    pub fn modify<F>(modifier: F) -> Self
    where
        F: Fn(S) -> S + 'static,
    {
        Self::new(move |state| ((), modifier(state)))
    }
}

impl<S, A> State<S, A>
where
    S: 'static,
    A: 'static,
{
    /// Creates a State that projects a value out of the current state.
    pub fn gets<F>(projection: F) -> Self
    where
        F: Fn(&S) -> A + 'static,
    {
        Self::new(move |state| (projection(&state), state))
    }
}

impl<S: 'static, A: 'static> TypeConstructor for State<S, A> {
    type Inner = A;
    type WithType<B: 'static> = State<S, B>;
}

impl<S, A> Effect for State<S, A>
where
    S: 'static,
    A: Clone + 'static,
{
    fn pure(value: A) -> Self {
        Self::pure(value)
    }

    fn bind<B, F>(self, function: F) -> State<S, B>
    where
        B: 'static,
        F: Fn(A) -> State<S, B> + 'static,
    {
        self.flat_map(function)
    }
}

impl<S, A> Clone for State<S, A> {
    fn clone(&self) -> Self {
        Self {
            run_function: Rc::clone(&self.run_function),
        }
    }
}

impl<S, A> std::fmt::Display for State<S, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<State>")
    }
}

impl<S, A> std::fmt::Debug for State<S, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("State").finish_non_exhaustive()
    }
}

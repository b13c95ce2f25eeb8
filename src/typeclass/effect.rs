//! The effect contract: `pure` and `bind`.
//!
//! An [`Effect`] is a monad in everything but name. The bridge in
//! [`crate::bridge`] needs nothing else from a concrete effect: it lifts the
//! final value with [`Effect::pure`] and stitches every awaited step into
//! the rest of the computation with [`Effect::bind`].
//!
//! # Laws
//!
//! ## Left Identity
//!
//! ```text
//! M::pure(a).bind(f) == f(a)
//! ```
//!
//! ## Right Identity
//!
//! ```text
//! m.bind(M::pure) == m
//! ```
//!
//! ## Associativity
//!
//! ```text
//! m.bind(f).bind(g) == m.bind(|x| f(x).bind(g))
//! ```
//!
//! # Invocation discipline
//!
//! `bind` may call its function zero times (short-circuit), exactly once
//! before returning, or exactly once at some later point. It must never call
//! it twice: the bridge hands `bind` one-shot continuations and aborts on a
//! second invocation.
//!
//! # Examples
//!
//! ```rust
//! use monad_bridge::typeclass::Effect;
//!
//! let halved = Some(10).bind(|n| if n % 2 == 0 { Some(n / 2) } else { None });
//! assert_eq!(halved, Some(5));
//!
//! let failed: Result<i32, &str> = Err("boom").bind(|n: i32| Ok(n + 1));
//! assert_eq!(failed, Err("boom"));
//! ```

use super::higher::TypeConstructor;
use super::identity::Identity;

/// A type class for effects that can sequence dependent steps.
///
/// The function passed to [`bind`](Effect::bind) is `Fn + 'static` rather
/// than `FnOnce`: effects that defer their continuation (such as
/// [`State`](crate::effect::State)) store it behind an `Rc` and may be run
/// more than once. One-shot behaviour is enforced at runtime by the bridge,
/// not by the signature.
///
/// # Examples
///
/// ```rust
/// use monad_bridge::typeclass::Effect;
///
/// let value: Option<i32> = Effect::pure(3);
/// assert_eq!(value.bind(|n| Some(n * 2)), Some(6));
/// ```
pub trait Effect: TypeConstructor + Sized + 'static {
    /// Lifts a plain value into the effect with no other consequence.
    fn pure(value: Self::Inner) -> Self;

    /// Sequences this effect with a dependent next step.
    ///
    /// # Arguments
    ///
    /// * `function` - The rest of the computation, given this step's value
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monad_bridge::typeclass::Effect;
    ///
    /// assert_eq!(Some(5).bind(|n| Some(n + 1)), Some(6));
    /// assert_eq!(None::<i32>.bind(|n| Some(n + 1)), None);
    /// ```
    fn bind<B, F>(self, function: F) -> Self::WithType<B>
    where
        B: 'static,
        F: Fn(Self::Inner) -> Self::WithType<B> + 'static;

    /// Applies a function to the value inside the effect.
    ///
    /// Derived from `bind` and `pure`, so every effect gets it for free.
    ///
    /// ```rust
    /// use monad_bridge::typeclass::Effect;
    ///
    /// assert_eq!(Effect::map(Some(20), |n: i32| n + 1), Some(21));
    /// ```
    fn map<B, F>(self, function: F) -> Self::WithType<B>
    where
        B: 'static,
        F: Fn(Self::Inner) -> B + 'static,
        Self::WithType<B>: Effect<Inner = B>,
    {
        self.bind(move |value| <Self::WithType<B> as Effect>::pure(function(value)))
    }
}

// =============================================================================
// Option<A>: short-circuit on absence
// =============================================================================

impl<A: 'static> Effect for Option<A> {
    #[inline]
    fn pure(value: A) -> Self {
        Some(value)
    }

    #[inline]
    fn bind<B, F>(self, function: F) -> Option<B>
    where
        B: 'static,
        F: Fn(A) -> Option<B> + 'static,
    {
        self.and_then(function)
    }
}

// =============================================================================
// Result<T, E>: short-circuit on error
// =============================================================================

impl<T: 'static, E: 'static> Effect for Result<T, E> {
    #[inline]
    fn pure(value: T) -> Self {
        Ok(value)
    }

    #[inline]
    fn bind<B, F>(self, function: F) -> Result<B, E>
    where
        B: 'static,
        F: Fn(T) -> Result<B, E> + 'static,
    {
        self.and_then(function)
    }
}

// =============================================================================
// Identity<A>: no effect at all
// =============================================================================

impl<A: 'static> Effect for Identity<A> {
    #[inline]
    fn pure(value: A) -> Self {
        Self::new(value)
    }

    #[inline]
    fn bind<B, F>(self, function: F) -> Identity<B>
    where
        B: 'static,
        F: Fn(A) -> Identity<B> + 'static,
    {
        function(self.into_inner())
    }
}

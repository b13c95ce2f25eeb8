//! `bind!` macro for hand-nested `bind` chains.
//!
//! `bind!` writes out exactly the nesting that the bridge is meant to hide:
//! every `pattern <= expression;` becomes one [`Effect::bind`] call whose
//! function holds the rest of the block. It is the reference a bridged
//! computation is compared against.
//!
//! # Syntax
//!
//! - `pattern <= expression;` - Bind: passes the effect's value to the rest
//! - `let pattern = expression;` - Pure let binding
//! - `expression` - Final expression (already an effect value)
//!
//! `<-` is not a single token in `macro_rules!`, so `<=` stands in for it.
//!
//! # Examples
//!
//! ```rust
//! use monad_bridge::bind;
//! use monad_bridge::effect::State;
//!
//! let computation: State<i32, i32> = bind! {
//!     current <= State::<i32, i32>::get();
//!     _ <= State::put(current + 1);
//!     updated <= State::<i32, i32>::get();
//!     State::pure(updated * 10)
//! };
//!
//! assert_eq!(computation.run(0), (10, 1));
//! ```
//!
//! # Expansion
//!
//! ```rust,ignore
//! bind! { x <= m; rest }
//! // becomes
//! Effect::bind(m, move |x| bind! { rest })
//! ```
//!
//! [`Effect::bind`]: crate::typeclass::Effect::bind

/// Chains effect values with nested [`Effect::bind`](crate::typeclass::Effect::bind) calls.
///
/// Every bound function is `Fn`, so values captured by an inner step must be
/// `Copy` or cloned before they are moved.
///
/// # Examples
///
/// ```rust
/// use monad_bridge::bind;
///
/// let result = bind! {
///     x <= Some(5);
///     y <= Some(10);
///     Some(x + y)
/// };
/// assert_eq!(result, Some(15));
///
/// let result: Option<i32> = bind! {
///     x <= Some(5);
///     y <= None::<i32>;
///     Some(x + y)
/// };
/// assert_eq!(result, None);
/// ```
#[macro_export]
macro_rules! bind {
    ($result:expr) => {
        $result
    };

    ($pattern:ident <= $monad:expr ; $($rest:tt)+) => {
        $crate::typeclass::Effect::bind($monad, move |$pattern| {
            $crate::bind!($($rest)+)
        })
    };

    (($($pattern:tt)*) <= $monad:expr ; $($rest:tt)+) => {
        $crate::typeclass::Effect::bind($monad, move |($($pattern)*)| {
            $crate::bind!($($rest)+)
        })
    };

    (_ <= $monad:expr ; $($rest:tt)+) => {
        $crate::typeclass::Effect::bind($monad, move |_| {
            $crate::bind!($($rest)+)
        })
    };

    (let $pattern:ident = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern = $expr;
            $crate::bind!($($rest)+)
        }
    };

    (let ($($pattern:tt)*) = $expr:expr ; $($rest:tt)+) => {
        {
            let ($($pattern)*) = $expr;
            $crate::bind!($($rest)+)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::State;

    #[test]
    fn option_chain() {
        let result = bind! {
            x <= Some(5);
            let doubled = x * 2;
            Some(doubled + 1)
        };
        assert_eq!(result, Some(11));
    }

    #[test]
    fn result_short_circuits_on_the_first_error() {
        let result: Result<i32, &str> = bind! {
            x <= Ok::<i32, &str>(5);
            y <= Err::<i32, &str>("second");
            _ <= Err::<i32, &str>("third");
            Ok(x + y)
        };
        assert_eq!(result, Err("second"));
    }

    #[test]
    fn tuple_pattern() {
        let result = bind! {
            (a, b) <= Some((1, 2));
            Some(a + b)
        };
        assert_eq!(result, Some(3));
    }

    #[test]
    fn state_chain_is_deferred_until_run() {
        let computation: State<i32, i32> = bind! {
            first <= State::<i32, i32>::get();
            _ <= State::put(first * 3);
            second <= State::<i32, i32>::get();
            State::pure(first + second)
        };
        assert_eq!(computation.run(2), (8, 6));
        assert_eq!(computation.run(5), (20, 15));
    }
}

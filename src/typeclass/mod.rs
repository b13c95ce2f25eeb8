//! The effect contract the bridge is written against.
//!
//! - [`TypeConstructor`]: rebinding an effect to a different inner type
//! - [`Effect`]: `pure` and `bind`
//! - [`Identity`]: the effect with no behaviour
//!
//! `Option<A>` and `Result<T, E>` implement both traits here; the stateful
//! effect lives in [`crate::effect`].
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust does not have native higher-kinded types. `TypeConstructor` uses a
//! Generic Associated Type to name "the same effect, at another type", which
//! is all `bind` needs to express its result type.
//!
//! # Examples
//!
//! ```rust
//! use monad_bridge::typeclass::{Effect, Identity};
//!
//! let doubled = Identity::new(21).bind(|n| Identity::new(n * 2));
//! assert_eq!(doubled.into_inner(), 42);
//! ```

mod effect;
mod higher;
mod identity;

pub use effect::Effect;
pub use higher::{Rebind, TypeConstructor};
pub use identity::Identity;

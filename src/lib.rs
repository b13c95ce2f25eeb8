//! # monad-bridge
//!
//! Straight-line step logic over any monad.
//!
//! ## Overview
//!
//! Code that sequences effect values by hand ends up as a staircase of
//! nested `bind` calls. This crate lets the same computation be written as
//! an `async` block in which every effect value is simply awaited, and turns
//! that block back into the nested `bind` chain at run time:
//!
//! - **Type Classes**: [`TypeConstructor`](typeclass::TypeConstructor) and
//!   the [`Effect`](typeclass::Effect) contract (`pure`, `bind`, rebinding)
//! - **Effects**: `Option`, `Result`, [`Identity`](typeclass::Identity) and
//!   [`State`](effect::State), plus the [`bind!`] macro for hand-nested chains
//! - **Bridge**: [`run`](bridge::run) and [`run_effect`](bridge::run_effect),
//!   the computation frame, one-shot continuations and protocol checks
//!
//! ## Feature Flags
//!
//! - `typeclass`: Type constructor and effect traits
//! - `effect`: `State` and the `bind!` macro
//! - `bridge`: The await-to-bind bridge
//! - `tracing`: Frame lifecycle events through the `tracing` crate
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use monad_bridge::prelude::*;
//!
//! fn divide(numerator: i32, denominator: i32) -> Result<i32, String> {
//!     if denominator == 0 {
//!         Err(format!("{numerator} / 0"))
//!     } else {
//!         Ok(numerator / denominator)
//!     }
//! }
//!
//! let bridged: Result<i32, String> = run(|co| async move {
//!     let half = co.perform(divide(100, 2)).await;
//!     let tenth = co.perform(divide(half, 5)).await;
//!     tenth + 1
//! });
//!
//! let nested: Result<i32, String> = bind! {
//!     half <= divide(100, 2);
//!     tenth <= divide(half, 5);
//!     Ok(tenth + 1)
//! };
//!
//! assert_eq!(bridged, nested);
//! assert_eq!(bridged, Ok(11));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use monad_bridge::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;

    #[cfg(feature = "effect")]
    pub use crate::bind;

    #[cfg(feature = "bridge")]
    pub use crate::bridge::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "effect")]
pub mod effect;

#[cfg(feature = "bridge")]
pub mod bridge;

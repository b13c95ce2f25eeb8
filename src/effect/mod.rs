//! Concrete effects beyond the standard library ones.
//!
//! `Option` and `Result` get their [`Effect`](crate::typeclass::Effect)
//! instances in [`crate::typeclass`]. This module adds:
//!
//! - [`State`]: computations that thread an implicit state and defer every
//!   continuation until they are run
//! - [`bind!`](crate::bind): hand-nested `bind` chains written as a block
//!
//! # Examples
//!
//! ```rust
//! use monad_bridge::bind;
//! use monad_bridge::effect::State;
//!
//! let counter: State<u32, u32> = bind! {
//!     count <= State::<u32, u32>::get();
//!     _ <= State::put(count + 1);
//!     State::pure(count)
//! };
//! assert_eq!(counter.run(41), (41, 42));
//! ```

mod bind_macro;
mod state;

pub use state::State;

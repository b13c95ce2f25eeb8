//! Straight-line step logic over any [`Effect`](crate::typeclass::Effect).
//!
//! The bridge runs an `async` block as a resumable computation frame. Every
//! `co.perform(effect).await` suspends the frame and hands "the rest of the
//! block" to the effect's `bind` as a one-shot continuation. `bind` decides
//! what happens next: call the continuation now (`Option`, `Result`), store
//! it for later (`State`), or drop it (`None`, `Err`). Whatever the choice,
//! the value returned to the caller is the effect value that nested `bind`
//! calls would have produced by hand.
//!
//! The `async` block is never given to an executor. It is polled directly by
//! the frame with a no-op waker, and the only thing it may await is
//! [`Co::perform`].
//!
//! # Lifecycle
//!
//! ```text
//! Running -> Suspended -> Running -> ... -> Completed
//!                 \
//!                  `-> Reclaimed   (suspended and no continuation left)
//! ```
//!
//! A frame is reference counted by the continuations that can still resume
//! it. When it is parked and the last of them is dropped, the step logic is
//! dropped with it; nothing leaks when an effect short-circuits.
//!
//! # Protocol violations
//!
//! Calling a continuation twice, resuming a destroyed frame, or unbalancing
//! the destination stack panics with a [`ProtocolError`] message. These are
//! bugs in an effect adapter, not data errors.
//!
//! # Examples
//!
//! ```rust
//! use monad_bridge::bridge::run;
//!
//! fn parse(text: &str) -> Option<i32> {
//!     text.parse().ok()
//! }
//!
//! let sum: Option<i32> = run(|co| async move {
//!     let x = co.perform(parse("20")).await;
//!     let y = co.perform(parse("22")).await;
//!     x + y
//! });
//! assert_eq!(sum, Some(42));
//!
//! let missing: Option<i32> = run(|co| async move {
//!     let x = co.perform(parse("20")).await;
//!     let y = co.perform(parse("twenty-two")).await;
//!     x + y
//! });
//! assert_eq!(missing, None);
//! ```

/// Emits a frame lifecycle event when the `tracing` feature is enabled.
macro_rules! lifecycle {
    ($frame:expr, $event:literal) => {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "monad_bridge::frame",
            frame = $frame.id,
            ref_count = $frame.ref_count.get(),
            suspend_depth = $frame.suspend_depth.get(),
            $event
        );
    };
}

mod continuation;
mod error;
mod frame;
mod run;
mod stage;
mod suspend;

pub use error::ProtocolError;
pub use run::{Co, run, run_effect};
pub use stage::ResultStage;
pub use suspend::Perform;

//! Protocol violations.
//!
//! Absence and application errors never show up here: they are ordinary
//! effect values that `bind` routes by declining to call the continuation.
//! A [`ProtocolError`] means an effect adapter or a caller broke the
//! suspension protocol. The frame machinery never recovers from one; it
//! aborts through [`escalate`], which panics with the error's message.

/// A broken invariant of the suspension protocol.
///
/// # Examples
///
/// ```rust
/// use monad_bridge::bridge::ProtocolError;
///
/// assert_eq!(
///     ProtocolError::DoubleInvoke.to_string(),
///     "monad bridge protocol violation: continuation invoked more than once"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolError {
    /// A continuation was called a second time.
    DoubleInvoke,
    /// A continuation was called after its frame completed or was reclaimed.
    UseAfterReclaim,
    /// A result stage was read before it was written, or read twice.
    UnsetRead,
    /// A result stage was written twice.
    DoubleWrite,
    /// A destination was popped from an empty stack, or a resumption left
    /// the stack at a different depth than it found it.
    StackImbalance,
    /// A frame was resumed while its step logic was already running.
    ReentrantResume,
    /// A frame was suspended while it was already parked on an await.
    DoubleSuspend,
    /// The step logic returned `Pending` without parking on exactly one
    /// awaited effect value.
    ForeignAwait,
}

impl ProtocolError {
    const fn description(self) -> &'static str {
        match self {
            Self::DoubleInvoke => "continuation invoked more than once",
            Self::UseAfterReclaim => "continuation resumed a frame that was already destroyed",
            Self::UnsetRead => "result stage read before it was written",
            Self::DoubleWrite => "result stage written more than once",
            Self::StackImbalance => "destination stack is unbalanced",
            Self::ReentrantResume => "frame resumed while it was already running",
            Self::DoubleSuspend => "frame suspended while it was already suspended",
            Self::ForeignAwait => "step logic suspended without awaiting exactly one effect value",
        }
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "monad bridge protocol violation: {}",
            self.description()
        )
    }
}

impl std::error::Error for ProtocolError {}

/// Aborts on a protocol violation.
#[cold]
#[track_caller]
pub(crate) fn escalate(error: ProtocolError) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!(target: "monad_bridge::frame", ?error, "protocol violation");
    panic!("{error}")
}

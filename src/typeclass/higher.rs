//! Higher-Kinded Type emulation through Generic Associated Types.
//!
//! Rust cannot abstract over `Option<_>` or `Result<_, E>` as type
//! constructors directly. [`TypeConstructor`] works around that with a GAT:
//! given an effect value instantiated at `A`, `WithType<B>` names the same
//! effect instantiated at `B`. This is the "rebind" half of the effect
//! contract; it carries no behaviour of its own.
//!
//! # Example
//!
//! ```rust
//! use monad_bridge::typeclass::{Rebind, TypeConstructor};
//!
//! fn absent<T: TypeConstructor>(_value: T) -> Rebind<T, String>
//! where
//!     Rebind<T, String>: Default,
//! {
//!     Default::default()
//! }
//!
//! let none_string: Option<String> = absent(Some(42));
//! assert_eq!(none_string, None);
//! ```

/// A type constructor applied to some type `Inner`.
///
/// # Associated Types
///
/// - `Inner`: the type parameter this constructor is currently applied to.
/// - `WithType<B>`: the same constructor applied to `B`.
///
/// Both are `'static`: effect values are stored inside boxed continuations
/// that outlive the stack frame that created them.
///
/// # Laws
///
/// `<F as TypeConstructor>::WithType<F::Inner>` is `F`.
pub trait TypeConstructor {
    /// The inner type that this type constructor is applied to.
    type Inner: 'static;

    /// The same type constructor applied to a different type `B`.
    type WithType<B: 'static>: TypeConstructor<Inner = B>;
}

/// The effect `M` re-instantiated at `B`.
///
/// ```rust
/// use monad_bridge::typeclass::Rebind;
///
/// let parsed: Rebind<Result<u8, String>, i32> = Ok(7);
/// assert_eq!(parsed, Ok::<i32, String>(7));
/// ```
pub type Rebind<M, B> = <M as TypeConstructor>::WithType<B>;

impl<A: 'static> TypeConstructor for Option<A> {
    type Inner = A;
    type WithType<B: 'static> = Option<B>;
}

impl<T: 'static, E: 'static> TypeConstructor for Result<T, E> {
    type Inner = T;
    type WithType<B: 'static> = Result<B, E>;
}

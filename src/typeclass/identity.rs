//! Identity wrapper type - the effect that does nothing.
//!
//! `Identity` is the smallest possible [`Effect`](super::Effect): `bind`
//! applies the continuation immediately and `pure` wraps. Running step logic
//! against it through the bridge is plain sequential execution, which makes
//! it the baseline every other effect is compared to.

use super::TypeConstructor;

/// The identity effect - wraps a value without adding any behavior.
///
/// # Examples
///
/// ```rust
/// use monad_bridge::typeclass::Identity;
///
/// let wrapped = Identity::new(42);
/// assert_eq!(wrapped.into_inner(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Identity<A>(pub A);

impl<A> Identity<A> {
    /// Creates a new `Identity` wrapping the given value.
    #[inline]
    pub const fn new(value: A) -> Self {
        Self(value)
    }

    /// Consumes the `Identity` and returns the inner value.
    ///
    /// ```rust
    /// use monad_bridge::typeclass::Identity;
    ///
    /// let x = Identity::new(String::from("hello"));
    /// assert_eq!(x.into_inner(), "hello");
    /// ```
    #[inline]
    pub fn into_inner(self) -> A {
        self.0
    }

    /// Returns a reference to the inner value.
    #[inline]
    pub const fn as_inner(&self) -> &A {
        &self.0
    }
}

impl<A: 'static> TypeConstructor for Identity<A> {
    type Inner = A;
    type WithType<B: 'static> = Identity<B>;
}

impl<A> From<A> for Identity<A> {
    fn from(value: A) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn identity_into_inner_unwraps() {
        let wrapped = Identity::new(String::from("hello"));
        assert_eq!(wrapped.as_inner(), "hello");
        assert_eq!(wrapped.into_inner(), "hello");
    }

    #[test]
    fn identity_type_constructor_with_type() {
        fn transform<T: TypeConstructor>(_value: T) -> T::WithType<String>
        where
            T::WithType<String>: Default,
        {
            Default::default()
        }

        let result: Identity<String> = transform(Identity::new(42));
        assert_eq!(result, Identity(String::new()));
    }

    #[rstest]
    #[case(0)]
    #[case(i32::MIN)]
    #[case(i32::MAX)]
    fn identity_from_value(#[case] value: i32) {
        let wrapped: Identity<i32> = value.into();
        assert_eq!(wrapped.into_inner(), value);
    }
}

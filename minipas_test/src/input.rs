//! This module provides a trait [`Input`] for representing inputs generated for property based
//! testing.
//!
//! A generated input knows how to render itself as source text (usually through [`Display`]) and
//! how to check that whatever the analysis produced from that text agrees with it.
//!
//! [`Display`]: std::fmt::Display

use proptest::{
    prop_assert_eq,
    test_runner::{TestCaseError, TestCaseResult},
};

/// Represents an input generated for testing purposes.
pub trait Input<Output> {
    /// Verifies that the given output complies with this input.
    ///
    /// # Errors
    /// [`proptest::test_runner::TestCaseError`]: for any reason the assertion fails.
    fn assert(self, output: Output) -> TestCaseResult;
}

impl<T, U> Input<Option<T>> for Option<U>
where
    U: Input<T>,
{
    fn assert(self, output: Option<T>) -> TestCaseResult {
        match (self, output) {
            (Some(input), Some(output)) => input.assert(output),
            (None, None) => Ok(()),
            (Some(_), None) => Err(TestCaseError::fail("expected Some, found None")),
            (None, Some(_)) => Err(TestCaseError::fail("expected None, found Some")),
        }
    }
}

impl<'i, 'o, T, U> Input<&'o [T]> for &'i [U]
where
    for<'a, 'b> &'a U: Input<&'b T>,
{
    fn assert(self, output: &'o [T]) -> TestCaseResult {
        prop_assert_eq!(
            self.len(),
            output.len(),
            "generated {} elements but the output has {}",
            self.len(),
            output.len()
        );

        for (index, (input, output)) in self.iter().zip(output).enumerate() {
            input.assert(output).map_err(|error| {
                TestCaseError::fail(format!("element #{index} does not match: {error}"))
            })?;
        }

        Ok(())
    }
}

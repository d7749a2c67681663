// vim: tw=80
use thiserror::Error;

use crate::{Args, args::Interactions};

/// Everything that can go wrong when using a mock.
///
/// The panicking APIs panic with the `Display` text of one of these; the
/// `try_` APIs return them.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A method's return value was used, but it was never stubbed.
    #[error("{method} has not been mocked yet. Set a mock return value for it.")]
    NotMocked {
        method: String
    },

    /// A method's return value was used, but it was only stubbed for other
    /// arguments.
    #[error("{method} was stubbed to return a value when called with {stubbed} but was called with: {actual}.")]
    StubbedForOtherArgs {
        method: String,
        stubbed: Args,
        actual: Args
    },

    #[error("{method} was not called")]
    NotCalled {
        method: String
    },

    #[error(transparent)]
    CallsDontMatch(#[from] CallsDontMatch),

    #[error("{method} was expected not to be called{}", Interactions(.calls))]
    CalledUnexpectedly {
        method: String,
        calls: Vec<Args>
    },

    #[error("{method} was called with: {args}{}", Interactions(.calls))]
    CalledWithUnexpectedly {
        method: String,
        args: Args,
        calls: Vec<Args>
    },

    #[error("{method} was called {actual} times, expected {expected}{}",
            Interactions(.calls))]
    WrongCallCount {
        method: String,
        expected: usize,
        actual: usize,
        calls: Vec<Args>
    },
}

/// A method was never called with the expected arguments.
///
/// Lists every recorded call to the method, or nothing if there were none.
///
/// # Examples
/// ```
/// # use safemock::*;
/// let e = CallsDontMatch::new("method", args!("expected"),
///                             vec![args!("First Call"), args!("Second Call")]);
/// assert_eq!(
///     "method was not called with: (\"expected\")\n       \
///     Other interactions with this mock: [(\"First Call\"),(\"Second Call\")]",
///     e.to_string());
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{method} was not called with: {expected}{}", Interactions(.others))]
pub struct CallsDontMatch {
    method: String,
    expected: Args,
    others: Vec<Args>
}

impl CallsDontMatch {
    pub fn new<S>(method: S, expected: Args, others: Vec<Args>) -> Self
        where S: Into<String>
    {
        CallsDontMatch{method: method.into(), expected, others}
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn expected(&self) -> &Args {
        &self.expected
    }

    /// Every call that was recorded, in call order.
    pub fn others(&self) -> &[Args] {
        &self.others
    }
}

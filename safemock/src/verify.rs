// vim: tw=80
use std::{fmt, sync::Arc};

use crate::{
    CallsDontMatch,
    Error,
    IntoArgs,
    Method,
    ledger::Ledger
};

/// Begin an assertion about the calls made to `method`.
///
/// # Examples
/// ```
/// # use safemock::*;
/// let mock = Mock::new("TwoArgs");
/// let method = mock.method::<()>("method");
/// let _ = method.call((-9, "expected"));
///
/// verify(&method).called();
/// verify(&method).called_with((-9, "expected"));
/// assert!(verify(&method).try_called_with((1, "expected")).is_err());
/// ```
pub fn verify<R>(method: &Method<R>) -> Verify {
    Verify{ledger: method.ledger().clone()}
}

/// Assertions about one mocked method's call history.  Created by [`verify`].
///
/// Each assertion comes in two flavors: one that panics with a descriptive
/// message, for use directly in tests, and a `try_` one that returns the
/// [`Error`] instead.
pub struct Verify {
    ledger: Arc<Ledger>
}

impl Verify {
    fn method(&self) -> String {
        self.ledger.name().to_owned()
    }

    fn check(&self, r: Result<(), Error>) -> Result<(), Error> {
        if let Err(e) = &r {
            tracing::debug!(method = self.ledger.name(), error = %e,
                            "verification failed");
        }
        r
    }

    /// Assert that the method was called at least once.
    #[track_caller]
    pub fn called(&self) {
        if let Err(e) = self.try_called() {
            panic!("{}", e);
        }
    }

    pub fn try_called(&self) -> Result<(), Error> {
        let r = if self.ledger.call_count() > 0 {
            Ok(())
        } else {
            Err(Error::NotCalled{method: self.method()})
        };
        self.check(r)
    }

    /// Assert that the method was called at least once with arguments
    /// structurally equal to `args`.
    ///
    /// On failure, the message lists every call that was made.
    #[track_caller]
    pub fn called_with<A: IntoArgs>(&self, args: A) {
        if let Err(e) = self.try_called_with(args) {
            panic!("{}", e);
        }
    }

    pub fn try_called_with<A: IntoArgs>(&self, args: A) -> Result<(), Error> {
        let expected = args.into_args();
        let calls = self.ledger.calls();
        let r = if calls.iter().any(|call| *call == expected) {
            Ok(())
        } else {
            Err(CallsDontMatch::new(self.method(), expected, calls).into())
        };
        self.check(r)
    }

    /// Assert that the method was never called.
    #[track_caller]
    pub fn not_called(&self) {
        if let Err(e) = self.try_not_called() {
            panic!("{}", e);
        }
    }

    pub fn try_not_called(&self) -> Result<(), Error> {
        let calls = self.ledger.calls();
        let r = if calls.is_empty() {
            Ok(())
        } else {
            Err(Error::CalledUnexpectedly{method: self.method(), calls})
        };
        self.check(r)
    }

    /// Assert that the method was never called with arguments structurally
    /// equal to `args`.
    #[track_caller]
    pub fn not_called_with<A: IntoArgs>(&self, args: A) {
        if let Err(e) = self.try_not_called_with(args) {
            panic!("{}", e);
        }
    }

    pub fn try_not_called_with<A: IntoArgs>(&self, args: A)
        -> Result<(), Error>
    {
        let args = args.into_args();
        let calls = self.ledger.calls();
        let r = if calls.iter().any(|call| *call == args) {
            Err(Error::CalledWithUnexpectedly {
                method: self.method(),
                args,
                calls
            })
        } else {
            Ok(())
        };
        self.check(r)
    }

    /// Assert that the method was called exactly `n` times, with any
    /// arguments.
    #[track_caller]
    pub fn called_times(&self, n: usize) {
        if let Err(e) = self.try_called_times(n) {
            panic!("{}", e);
        }
    }

    pub fn try_called_times(&self, n: usize) -> Result<(), Error> {
        let calls = self.ledger.calls();
        let r = if calls.len() == n {
            Ok(())
        } else {
            Err(Error::WrongCallCount {
                method: self.method(),
                expected: n,
                actual: calls.len(),
                calls
            })
        };
        self.check(r)
    }
}

impl fmt::Debug for Verify {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Verify")
            .field(&self.ledger)
            .finish()
    }
}

// vim: tw=80
use std::{
    fmt,
    ops::{Deref, DerefMut},
    sync::Arc
};

use crate::{Args, Error, ledger::Ledger};

/// The call that produced a [`Returned`].  Only [`when`](crate::when) reads it.
pub(crate) struct Capture {
    ledger: Arc<Ledger>,
    args: Args
}

impl Capture {
    pub(crate) fn new(ledger: Arc<Ledger>, args: Args) -> Self {
        Capture{ledger, args}
    }

    pub(crate) fn into_parts(self) -> (Arc<Ledger>, Args) {
        (self.ledger, self.args)
    }
}

/// What a mocked method returned.
///
/// Either the value that was stubbed for the call's arguments, or a guard
/// standing in for a value that doesn't exist.  The guard doesn't fail when it
/// is created; it fails when it is *used*, so the panic message names the call
/// that was never stubbed instead of whatever code tripped over it later.
///
/// * Reading through it (`returned.field`, `returned.method()`) panics.
/// * Writing through it (`returned.field = x`) panics.
/// * Calling through it (`(*returned)(x)`) panics.
/// * [`into_value`](Self::into_value) panics.
///
/// Dropping an unused guard is fine.
///
/// # Examples
/// ```should_panic
/// # use safemock::*;
/// struct Inner {
///     field: u32
/// }
/// # impl Clone for Inner { fn clone(&self) -> Self { Inner{field: self.field} } }
/// let mock = Mock::new("Outer");
/// let outer = mock.method::<Inner>("outer");
/// let inner = outer.call(());
/// let _x = inner.field;   // panics!
/// ```
pub struct Returned<R> {
    capture: Capture,
    outcome: Result<R, Error>
}

impl<R> Returned<R> {
    pub(crate) fn new(capture: Capture, outcome: Result<R, Error>) -> Self {
        Returned{capture, outcome}
    }

    pub(crate) fn into_capture(self) -> Capture {
        self.capture
    }

    /// Did the call match a stub?
    pub fn is_stubbed(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn is_unmocked(&self) -> bool {
        self.outcome.is_err()
    }

    /// Why there is no value, without panicking.
    pub fn reason(&self) -> Option<&Error> {
        self.outcome.as_ref().err()
    }

    /// Take the stubbed value.
    ///
    /// # Panics
    ///
    /// If the call didn't match any stub.
    #[track_caller]
    pub fn into_value(self) -> R {
        match self.outcome {
            Ok(r) => r,
            Err(e) => panic!("{}", e)
        }
    }

    /// Like [`into_value`](Self::into_value), but returns the reason instead
    /// of panicking.
    pub fn try_into_value(self) -> Result<R, Error> {
        self.outcome
    }
}

impl<R> Deref for Returned<R> {
    type Target = R;

    #[track_caller]
    fn deref(&self) -> &R {
        match &self.outcome {
            Ok(r) => r,
            Err(e) => panic!("{}", e)
        }
    }
}

impl<R> DerefMut for Returned<R> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut R {
        match &mut self.outcome {
            Ok(r) => r,
            Err(e) => panic!("{}", e)
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Returned<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.outcome {
            Ok(r) => f.debug_tuple("Stubbed").field(r).finish(),
            Err(e) => f.debug_tuple("Unmocked").field(&e.to_string()).finish()
        }
    }
}

// vim: tw=80
use fragile::Fragile;
use std::{fmt, marker::PhantomData, sync::Arc};

use crate::{Args, Returned, ledger::Ledger};

/// Stub the call that produced `returned`.
///
/// Make the call with exactly the arguments to stub on, pass its result here,
/// and supply the value to return.  The stub is permanent: every later call
/// with structurally equal arguments returns a clone of the value.
///
/// # Examples
/// ```
/// # use safemock::*;
/// let mock = Mock::new("SomeService");
/// let m = mock.method::<i32>("createSomethingMultipleArgs");
/// when(m.call(("arg1", "arg2", "arg3"))).return_value(123);
/// when(m.call(("arg7", "arg8", "arg9"))).return_value(789);
///
/// assert_eq!(789, m.call(("arg7", "arg8", "arg9")).into_value());
/// assert_eq!(123, m.call(("arg1", "arg2", "arg3")).into_value());
/// assert_eq!(123, m.call(("arg1", "arg2", "arg3")).into_value());
/// ```
pub fn when<R>(returned: Returned<R>) -> Stubber<R> {
    let (ledger, args) = returned.into_capture().into_parts();
    Stubber{ledger, args, _output: PhantomData}
}

/// Binds a return value to one captured call.  Created by [`when`].
#[must_use = "Stubber does nothing unless a return value is supplied"]
pub struct Stubber<R> {
    ledger: Arc<Ledger>,
    args: Args,
    _output: PhantomData<fn() -> R>
}

impl<R: 'static> Stubber<R> {
    fn bind(self, value: Box<dyn std::any::Any + Send>) {
        if self.ledger.is_stubbed_for(&self.args) {
            tracing::warn!(method = self.ledger.name(), args = %self.args,
                "method is already stubbed for these arguments; the earlier \
                stub takes precedence");
        } else {
            tracing::debug!(method = self.ledger.name(), args = %self.args,
                            "stub registered");
        }
        self.ledger.stub(self.args, value);
    }

    /// Return `value` whenever the method is called with these arguments.
    pub fn return_value(self, value: R)
        where R: Send
    {
        self.bind(Box::new(value))
    }

    /// Single-threaded version of [`return_value`](Self::return_value), for
    /// return types that aren't `Send`.
    ///
    /// It is a runtime error to call the method from a different thread than
    /// the one that supplied the value, or to drop the mock on a different
    /// thread.
    ///
    /// # Examples
    /// ```
    /// # use safemock::*;
    /// # use std::rc::Rc;
    /// let mock = Mock::new("Cache");
    /// let get = mock.method::<Rc<str>>("get");
    /// when(get.call(("key",))).return_value_st(Rc::from("value"));
    /// assert_eq!("value", &*get.call(("key",)).into_value());
    /// ```
    pub fn return_value_st(self, value: R) {
        self.bind(Box::new(Fragile::new(value)))
    }
}

impl<R> fmt::Debug for Stubber<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Stubber")
            .field("method", &self.ledger.name())
            .field("args", &self.args.to_string())
            .finish()
    }
}

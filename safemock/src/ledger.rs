// vim: tw=80
use fragile::Fragile;
use std::{
    any::{self, Any, TypeId},
    fmt,
    marker::PhantomData,
    sync::{Arc, Mutex, MutexGuard, PoisonError}
};

use crate::{Args, Error, IntoArgs, Returned, guard::Capture};

/// Lock a ledger's mutex.
///
/// A test that panicked while holding a lock must not make every later
/// assertion on the same mock fail with a `PoisonError` instead of its own
/// message.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A stubbed return value.  Holds either an `R` or, for values stubbed with
/// [`return_value_st`](crate::Stubber::return_value_st), a `Fragile<R>`.
type StubValue = Box<dyn Any + Send>;

struct Stub {
    args: Args,
    value: StubValue
}

/// Everything that is known about one mocked method: what it was called with,
/// and what it should return.
pub(crate) struct Ledger {
    name: String,
    output: TypeId,
    output_name: &'static str,
    calls: Mutex<Vec<Args>>,
    stubs: Mutex<Vec<Stub>>,
}

impl Ledger {
    pub(crate) fn new<R: 'static>(name: &str) -> Self {
        Ledger {
            name: name.to_owned(),
            output: TypeId::of::<R>(),
            output_name: any::type_name::<R>(),
            calls: Mutex::new(Vec::new()),
            stubs: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn output(&self) -> (TypeId, &'static str) {
        (self.output, self.output_name)
    }

    pub(crate) fn calls(&self) -> Vec<Args> {
        lock(&self.calls).clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub(crate) fn record(&self, args: Args) {
        lock(&self.calls).push(args);
    }

    pub(crate) fn is_stubbed_for(&self, args: &Args) -> bool {
        lock(&self.stubs).iter().any(|stub| stub.args == *args)
    }

    pub(crate) fn stub(&self, args: Args, value: StubValue) {
        lock(&self.stubs).push(Stub{args, value});
    }

    /// Find the value stubbed for `args`.  The earliest matching stub wins.
    pub(crate) fn lookup<R>(&self, args: &Args) -> Result<R, Error>
        where R: Clone + 'static
    {
        let stubs = lock(&self.stubs);
        let found = stubs.iter()
            .filter(|stub| stub.args == *args)
            .find_map(|stub| resolve::<R>(&stub.value));
        if let Some(r) = found {
            return Ok(r);
        }
        // Report the stub most likely to have been intended: the first one
        // with the same number of arguments.
        let nearest = stubs.iter()
            .find(|stub| stub.args.len() == args.len())
            .or_else(|| stubs.first());
        match nearest {
            None => Err(Error::NotMocked{method: self.name.clone()}),
            Some(stub) => Err(Error::StubbedForOtherArgs {
                method: self.name.clone(),
                stubbed: stub.args.clone(),
                actual: args.clone()
            })
        }
    }
}

fn resolve<R: Clone + 'static>(value: &StubValue) -> Option<R> {
    let value: &(dyn Any + Send) = &**value;
    if let Some(r) = value.downcast_ref::<R>() {
        Some(r.clone())
    } else {
        value.downcast_ref::<Fragile<R>>()
            .map(|fragile| fragile.get().clone())
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("name", &self.name)
            .field("output", &self.output_name)
            .field("calls", &lock(&self.calls).len())
            .field("stubs", &lock(&self.stubs).len())
            .finish()
    }
}

/// A handle to one mocked method.
///
/// Every handle obtained for the same method of the same mock refers to the
/// same call history and stubs, so it doesn't matter whether a handle is taken
/// before or after the calls it is used to [verify](crate::verify).
pub struct Method<R> {
    ledger: Arc<Ledger>,
    _output: PhantomData<fn() -> R>
}

impl<R> Method<R> {
    pub(crate) fn from_ledger(ledger: Arc<Ledger>) -> Self {
        Method{ledger, _output: PhantomData}
    }

    pub(crate) fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Name of the mocked method
    pub fn name(&self) -> &str {
        self.ledger.name()
    }

    /// Every call made so far, in call order.
    pub fn calls(&self) -> Vec<Args> {
        self.ledger.calls()
    }

    pub fn call_count(&self) -> usize {
        self.ledger.call_count()
    }
}

impl<R: Clone + 'static> Method<R> {
    /// Call the mocked method.
    ///
    /// The call is always recorded, even when it is only made to be passed to
    /// [`when`](crate::when).  The result is the value stubbed for these
    /// arguments, or a guard that panics as soon as it is used.
    ///
    /// # Examples
    /// ```
    /// # use safemock::*;
    /// let mock = Mock::new("Service");
    /// let lookup = mock.method::<u32>("lookup");
    /// when(lookup.call(("a",))).return_value(1);
    ///
    /// assert_eq!(1, lookup.call(("a",)).into_value());
    /// assert!(lookup.call(("b",)).is_unmocked());
    /// assert_eq!(3, lookup.call_count());
    /// ```
    pub fn call<A: IntoArgs>(&self, args: A) -> Returned<R> {
        let args = args.into_args();
        self.ledger.record(args.clone());
        let outcome = self.ledger.lookup::<R>(&args);
        tracing::trace!(method = self.name(), %args,
                        stubbed = outcome.is_ok(), "mock call recorded");
        let capture = Capture::new(self.ledger.clone(), args);
        Returned::new(capture, outcome)
    }
}

impl<R> Clone for Method<R> {
    fn clone(&self) -> Self {
        Method::from_ledger(self.ledger.clone())
    }
}

impl<R> fmt::Debug for Method<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Method")
            .field(&self.ledger)
            .finish()
    }
}

/// Two handles are equal if they refer to the same method of the same mock.
impl<R> PartialEq for Method<R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ledger, &other.ledger)
    }
}

// vim: tw=80
use std::{
    any::{self, TypeId},
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, PoisonError}
};

use crate::{Method, ledger::Ledger};

/// A mock object for an interface.
///
/// Holds one [`Method`] ledger per method name, each created the first time
/// that name is asked for.  Usually you won't use this directly; the structs
/// generated by [`#[mockable]`](crate::mockable) wrap one.
///
/// # Examples
/// ```
/// # use safemock::*;
/// let mock = Mock::new("SomeService");
/// let create = mock.method::<String>("create");
/// when(create.call(("Arg",))).return_value("Some Return Value".to_owned());
///
/// // Asking for the same method again yields a handle to the same ledger
/// let again = mock.method::<String>("create");
/// assert_eq!("Some Return Value", again.call(("Arg",)).into_value());
/// verify(&create).called_with(("Arg",));
/// ```
pub struct Mock {
    name: String,
    ledgers: Mutex<BTreeMap<String, Arc<Ledger>>>
}

impl Mock {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Mock {
            name: name.into(),
            ledgers: Mutex::new(BTreeMap::new())
        }
    }

    /// Name of the mocked interface
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a handle to the method called `name`, creating it if needed.
    ///
    /// # Panics
    ///
    /// If `name` was already asked for with a different return type.
    #[track_caller]
    pub fn method<R: 'static>(&self, name: &str) -> Method<R> {
        let mut ledgers = self.ledgers.lock()
            .unwrap_or_else(PoisonError::into_inner);
        let ledger = ledgers.entry(name.to_owned())
            .or_insert_with(|| {
                tracing::trace!(mock = %self.name, method = name,
                                "new method ledger");
                Arc::new(Ledger::new::<R>(name))
            })
            .clone();
        drop(ledgers);
        let (output, output_name) = ledger.output();
        if output != TypeId::of::<R>() {
            panic!("{}::{} is mocked with return type {}, not {}",
                   self.name, name, output_name, any::type_name::<R>());
        }
        Method::from_ledger(ledger)
    }

    /// Names of every method asked for so far, in sorted order.
    pub fn methods(&self) -> Vec<String> {
        self.ledgers.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl fmt::Debug for Mock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mock")
            .field("name", &self.name)
            .field("methods", &self.methods())
            .finish()
    }
}

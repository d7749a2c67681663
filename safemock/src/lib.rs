// vim: tw=80
//! A mock object library that records, stubs and verifies.
//!
//! SafeMock creates mock versions of traits.  A mock records every call made
//! to it, returns values that were stubbed for specific arguments, and can
//! later be asked whether a call did or did not happen.  When something goes
//! wrong, the error message shows the arguments involved.
//!
//! # User Guide
//!
//! * [`Getting started`](#getting-started)
//! * [`Stubbing return values`](#stubbing-return-values)
//! * [`Unmocked return values`](#unmocked-return-values)
//! * [`Verifying calls`](#verifying-calls)
//! * [`Argument equality`](#argument-equality)
//! * [`Non-Send return values`](#non-send-return-values)
//! * [`Mocking without the attribute`](#mocking-without-the-attribute)
//! * [`Logging`](#logging)
//!
//! ## Getting started
//! ```
//! use safemock::*;
//!
//! #[mockable]
//! trait MyTrait {
//!     fn foo(&self, x: u32) -> u32;
//! }
//!
//! fn call_with_four(x: &dyn MyTrait) -> u32 {
//!     x.foo(4)
//! }
//!
//! let mock = MockMyTrait::new();
//! when(mock.foo.call((4,))).return_value(5);
//! assert_eq!(5, call_with_four(&mock));
//! verify(&mock.foo).called_with((4,));
//! ```
//!
//! [`#[mockable]`](mockable) generates a struct named after the trait with
//! "Mock" prepended.  It implements the trait, and it has one public field per
//! method: a [`Method`] handle bound to that method's call history and stubs.
//! Use the handles to stub calls with [`when`] and to check them with
//! [`verify`].
//!
//! Arguments are written as a tuple.  A single argument needs a trailing
//! comma, like `(4,)`.  The [`args!`] macro is an alternative.
//!
//! ## Stubbing return values
//!
//! To stub a call, make that call on the method handle and pass its result to
//! [`when`].  Stubs are permanent, and each one only matches calls whose
//! arguments are equal to the stubbed ones.
//!
//! ```
//! # use safemock::*;
//! #[mockable]
//! trait Store {
//!     fn get(&self, key: &str) -> Option<String>;
//! }
//!
//! let mock = MockStore::new();
//! when(mock.get.call(("a",))).return_value(Some("one".to_owned()));
//! when(mock.get.call(("b",))).return_value(None);
//!
//! assert_eq!(Some("one".to_owned()), mock.get("a"));
//! assert_eq!(Some("one".to_owned()), mock.get("a"));
//! assert_eq!(None, mock.get("b"));
//! ```
//!
//! Stubbing the same arguments twice adds a second binding, but the first one
//! keeps winning.  A warning is logged when that happens.
//!
//! ## Unmocked return values
//!
//! Calling a [`Method`] handle directly returns a [`Returned`].  If no stub
//! matched the arguments, nothing fails yet.  Using the value fails, with a
//! message that names the call that was never stubbed:
//!
//! ```should_panic
//! # use safemock::*;
//! #[derive(Clone)]
//! struct Account {
//!     owner: String
//! }
//!
//! let mock = Mock::new("Bank");
//! let account = mock.method::<Account>("account");
//! let returned = account.call(());
//! // Panics with "account has not been mocked yet. Set a mock return value
//! // for it."
//! println!("{}", returned.owner);
//! ```
//!
//! If the method was stubbed, but for other arguments, the message says so:
//! `"account was stubbed to return a value when called with (1) but was called
//! with: (2)."`.  Use [`Returned::reason`] or [`Returned::try_into_value`] to
//! inspect the outcome without panicking.
//!
//! Methods of a `#[mockable]` trait must return a real value, so they take
//! it out of the [`Returned`] right away, and an unstubbed call panics as soon
//! as it is made.  Methods that return nothing never panic.
//!
//! ## Verifying calls
//!
//! [`verify`] checks a method's call history.
//!
//! ```
//! # use safemock::*;
//! #[mockable]
//! trait Logger {
//!     fn log(&self, level: u8, msg: &str);
//!     fn flush(&self);
//! }
//!
//! let mock = MockLogger::new();
//! mock.log(3, "starting");
//! mock.log(1, "done");
//!
//! verify(&mock.log).called();
//! verify(&mock.log).called_with((1, "done"));
//! verify(&mock.log).called_times(2);
//! verify(&mock.log).not_called_with((2, "done"));
//! verify(&mock.flush).not_called();
//! ```
//!
//! A failed assertion panics with every call that was made:
//!
//! ```text
//! log was not called with: (2, "done")
//!        Other interactions with this mock: [(3, "starting"),(1, "done")]
//! ```
//!
//! Every assertion has a `try_` version that returns an [`Error`] instead.
//!
//! ## Argument equality
//!
//! Arguments are captured with [`serde::Serialize`] when the call is made,
//! and compared structurally.  Struct names don't matter, only data does, so
//! two different types with the same fields are equal.  Numbers compare by
//! value, regardless of their Rust type.
//!
//! ```
//! # use safemock::*;
//! use serde_derive::Serialize;
//!
//! #[derive(Serialize)]
//! struct Complex {
//!     a: &'static str,
//!     b: i32
//! }
//!
//! #[derive(Serialize)]
//! struct Other {
//!     b: i64,
//!     a: String
//! }
//!
//! let mock = Mock::new("Service");
//! let m = mock.method::<u32>("m");
//! when(m.call((Complex{a: "hello", b: 123},))).return_value(7);
//!
//! assert_eq!(7, m.call((Other{a: "hello".to_owned(), b: 123},)).into_value());
//! assert!(m.call((Complex{a: "hello", b: -1},)).is_unmocked());
//! ```
//!
//! Struct names do show up in messages: the first argument above renders as
//! `Complex{"a":"hello","b":123}`.
//!
//! ## Non-Send return values
//!
//! [`Stubber::return_value`] requires the value to be `Send`.  For other
//! values, use [`Stubber::return_value_st`].  The value may then only be
//! returned on the thread that stubbed it.
//!
//! ```
//! # use safemock::*;
//! # use std::rc::Rc;
//! #[mockable]
//! trait Shared {
//!     fn get(&self) -> Rc<u32>;
//! }
//!
//! let mock = MockShared::new();
//! when(mock.get.call(())).return_value_st(Rc::new(42));
//! assert_eq!(42, *mock.get());
//! ```
//!
//! ## Mocking without the attribute
//!
//! [`Mock`] is the engine behind the generated structs.  It can be used
//! directly, for example to implement a trait by hand when `#[mockable]` can't
//! handle it.
//!
//! ```
//! # use safemock::*;
//! trait Clock {
//!     fn now<T: From<u64>>(&self) -> T;
//! }
//!
//! struct MockClock {
//!     mock: Mock
//! }
//!
//! impl Clock for MockClock {
//!     fn now<T: From<u64>>(&self) -> T {
//!         T::from(self.mock.method::<u64>("now").call(()).into_value())
//!     }
//! }
//!
//! let clock = MockClock{mock: Mock::new("Clock")};
//! when(clock.mock.method::<u64>("now").call(())).return_value(100);
//! let now: u128 = clock.now();
//! assert_eq!(100, now);
//! ```
//!
//! ## Logging
//!
//! SafeMock emits [`tracing`] events but never installs a subscriber.  Every
//! call is logged at `trace` level, stub registrations and failed
//! verifications at `debug`, and shadowed stubs and unrepresentable arguments
//! at `warn`.

mod args;
mod error;
mod guard;
mod ledger;
mod mock;
mod stub;
mod value;
mod verify;

pub use safemock_derive::mockable;

pub use crate::args::{Args, IntoArgs};
pub use crate::error::{CallsDontMatch, Error};
pub use crate::guard::Returned;
pub use crate::ledger::Method;
pub use crate::mock::Mock;
pub use crate::stub::{Stubber, when};
pub use crate::value::Value;
pub use crate::verify::{Verify, verify};

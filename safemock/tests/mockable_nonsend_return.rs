// vim: tw=80
//! Return values that aren't Send can be stubbed with return_value_st
#![deny(warnings)]

use std::{rc::Rc, thread};

use safemock::*;

#[mockable]
pub trait Foo {
    fn foo(&self, x: u32) -> Rc<u32>;
}

#[test]
fn return_value_st() {
    let mock = MockFoo::new();
    when(mock.foo.call((1,))).return_value_st(Rc::new(42));
    assert_eq!(42, *mock.foo(1));
    assert_eq!(42, *mock.foo(1));
}

#[test]
fn clones_share_the_stub() {
    let mock = MockFoo::new();
    let stubbed = Rc::new(42);
    when(mock.foo.call((1,))).return_value_st(stubbed.clone());
    let returned = mock.foo(1);
    assert!(Rc::ptr_eq(&stubbed, &returned));
}

/// A value stubbed on one thread can't be returned on another
#[test]
fn other_thread() {
    let mock = MockFoo::new();
    when(mock.foo.call((1,))).return_value_st(Rc::new(42));
    let foo = mock.foo.clone();
    let r = thread::spawn(move || {
        foo.call((1,)).is_stubbed()
    }).join();
    assert!(r.is_err());
    // The mock is still usable on its own thread afterwards
    assert_eq!(42, *mock.foo(1));
}

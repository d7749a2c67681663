// vim: tw=80
//! Using Mock directly, for traits that #[mockable] can't handle
#![deny(warnings)]

use safemock::*;

pub trait Repository {
    fn load<T: From<String>>(&self, id: u64) -> T;
    fn store(&self, id: u64, value: &str);
}

pub struct MockRepository {
    mock: Mock
}

impl MockRepository {
    fn new() -> Self {
        MockRepository{mock: Mock::new("Repository")}
    }

    fn load(&self) -> Method<String> {
        self.mock.method("load")
    }

    fn store(&self) -> Method<()> {
        self.mock.method("store")
    }
}

impl Repository for MockRepository {
    fn load<T: From<String>>(&self, id: u64) -> T {
        T::from(MockRepository::load(self).call((id,)).into_value())
    }

    fn store(&self, id: u64, value: &str) {
        MockRepository::store(self).call((id, value));
    }
}

#[test]
fn stub_and_verify() {
    let mock = MockRepository::new();
    when(MockRepository::load(&mock).call((7,)))
        .return_value("seven".to_owned());

    let loaded: String = Repository::load(&mock, 7);
    assert_eq!("seven", loaded);
    Repository::store(&mock, 7, "SEVEN");

    verify(&MockRepository::store(&mock)).called_with((7, "SEVEN"));
    verify(&MockRepository::load(&mock)).called_times(2);
    assert_eq!(vec!["load".to_owned(), "store".to_owned()], mock.mock.methods());
}

#[test]
fn handles_share_a_ledger() {
    let mock = Mock::new("Repository");
    let a = mock.method::<u32>("count");
    let b = mock.method::<u32>("count");
    assert_eq!(a, b);
    a.call(());
    assert_eq!(1, b.call_count());
    assert_eq!("count", b.name());
    assert_eq!("Repository", mock.name());
}

#[test]
#[should_panic(expected = "Repository::count is mocked with return type u32, not alloc::string::String")]
fn return_type_mismatch() {
    let mock = Mock::new("Repository");
    let _ = mock.method::<u32>("count");
    let _ = mock.method::<String>("count");
}

#[test]
fn args_renderings() {
    let mock = Mock::new("Repository");
    let store = mock.method::<()>("store");
    store.call((1, "a"));
    store.call(args!(2, "b", [true, false]));
    let rendered = store.calls().iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    assert_eq!(vec![r#"(1, "a")"#, r#"(2, "b", [true,false])"#], rendered);
}

// vim: tw=80
//! Using the result of a call that wasn't stubbed fails at the point of use,
//! naming the call
#![deny(warnings)]

use std::collections::BTreeMap;

use safemock::*;

#[derive(Clone, Debug, PartialEq)]
pub struct SomeObjectThatMockReturns {
    pub field: String
}

impl SomeObjectThatMockReturns {
    pub fn this_should_blow_up_from_mock(&self) -> usize {
        self.field.len()
    }
}

#[mockable]
pub trait ObjectToMock {
    fn return_the_object(&self, some_arg: BTreeMap<String, String>)
        -> SomeObjectThatMockReturns;
}

fn some_arg(a: &str) -> BTreeMap<String, String> {
    let mut m = BTreeMap::new();
    m.insert("a".to_owned(), a.to_owned());
    m
}

mod never_stubbed {
    use super::*;

    #[test]
    #[should_panic(expected = "returnTheObject has not been mocked yet. Set a mock return value for it.")]
    fn call_a_method() {
        let mock = Mock::new("ObjectToMock");
        let m = mock.method::<SomeObjectThatMockReturns>("returnTheObject");
        m.call(()).this_should_blow_up_from_mock();
    }

    #[test]
    #[should_panic(expected = "returnTheObject has not been mocked yet. Set a mock return value for it.")]
    fn read_a_field() {
        let mock = Mock::new("ObjectToMock");
        let m = mock.method::<SomeObjectThatMockReturns>("returnTheObject");
        let _dont_mind_me = m.call(()).field.clone();
    }

    #[test]
    #[should_panic(expected = "returnTheObject has not been mocked yet. Set a mock return value for it.")]
    fn write_a_field() {
        let mock = Mock::new("ObjectToMock");
        let m = mock.method::<SomeObjectThatMockReturns>("returnTheObject");
        let mut returned = m.call(());
        returned.field = "Oh Hello".to_owned();
    }

    #[test]
    #[should_panic(expected = "returnTheObject has not been mocked yet. Set a mock return value for it.")]
    fn invoke() {
        let mock = Mock::new("ObjectToMock");
        let m = mock.method::<fn()>("returnTheObject");
        (*m.call(()))();
    }

    #[test]
    #[should_panic(expected = "return_the_object has not been mocked yet. Set a mock return value for it.")]
    fn through_the_trait() {
        let mock = MockObjectToMock::new();
        let _ = mock.return_the_object(some_arg("anything")).field;
    }

    #[test]
    fn unused_results_are_harmless() {
        let mock = Mock::new("ObjectToMock");
        let m = mock.method::<SomeObjectThatMockReturns>("returnTheObject");
        let returned = m.call(());
        assert!(returned.is_unmocked());
        drop(returned);
    }

    #[test]
    fn reason() {
        let mock = Mock::new("ObjectToMock");
        let m = mock.method::<u32>("returnTheObject");
        let returned = m.call(());
        assert_eq!(
            "returnTheObject has not been mocked yet. Set a mock return value for it.",
            returned.reason().unwrap().to_string());
        assert!(matches!(returned.try_into_value(),
                         Err(Error::NotMocked{..})));
    }
}

mod stubbed_for_other_args {
    use super::*;

    #[test]
    #[should_panic(expected = "return_the_object was stubbed to return a value when called with ({\"a\":\"when\"}) but was called with: ({\"a\":\"not Matching\"}).")]
    fn read_a_field() {
        let mock = MockObjectToMock::new();
        when(mock.return_the_object.call((some_arg("when"),)))
            .return_value(SomeObjectThatMockReturns{field: "hello".to_owned()});

        let returned = mock.return_the_object.call((some_arg("not Matching"),));
        let _dont_mind_me = returned.field.clone();
    }

    #[test]
    fn matching_args_pass_through() {
        let mock = MockObjectToMock::new();
        let expected = SomeObjectThatMockReturns{field: "hello".to_owned()};
        when(mock.return_the_object.call((some_arg("when"),)))
            .return_value(expected.clone());

        let mut returned = mock.return_the_object.call((some_arg("when"),));
        assert_eq!("hello", returned.field);
        assert_eq!(5, returned.this_should_blow_up_from_mock());
        returned.field = "changed".to_owned();
        assert_eq!("changed", returned.into_value().field);
        // Changing a returned value doesn't change the stub
        assert_eq!(expected, mock.return_the_object(some_arg("when")));
    }
}

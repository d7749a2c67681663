// vim: tw=80
//! Verifying whether, and how often, a method was called
#![deny(warnings)]

use safemock::*;

#[mockable]
pub trait SomeService {
    fn create_something_no_args(&self) -> String;
    fn create_something_one_arg(&self, one: &str);
}

mod called {
    use super::*;

    #[test]
    #[should_panic(expected = "create_something_no_args was not called")]
    fn not_called() {
        let mock = MockSomeService::new();
        verify(&mock.create_something_no_args).called();
    }

    #[test]
    fn called() {
        let mock = MockSomeService::new();
        when(mock.create_something_no_args.call(()))
            .return_value(String::new());
        mock.create_something_no_args();
        verify(&mock.create_something_no_args).called();
    }

    /// A call made only to stub the method counts as a call
    #[test]
    fn stubbing_counts() {
        let mock = MockSomeService::new();
        when(mock.create_something_no_args.call(()))
            .return_value(String::new());
        verify(&mock.create_something_no_args).called();
    }

    #[test]
    fn unstubbed_calls_count() {
        let mock = MockSomeService::new();
        mock.create_something_one_arg("x");
        verify(&mock.create_something_one_arg).called();
    }

    #[test]
    fn try_called() {
        let mock = MockSomeService::new();
        assert_eq!(
            Err("create_something_one_arg was not called".to_owned()),
            verify(&mock.create_something_one_arg).try_called()
                .map_err(|e| e.to_string()));
        mock.create_something_one_arg("x");
        assert!(verify(&mock.create_something_one_arg).try_called().is_ok());
    }

    /// Handles taken before and after the calls see the same history
    #[test]
    fn handles_are_stable() {
        let mock = MockSomeService::new();
        let before = mock.create_something_one_arg.clone();
        mock.create_something_one_arg("x");
        let after = mock.create_something_one_arg.clone();
        assert_eq!(before, after);
        verify(&before).called();
        verify(&after).called();
    }
}

mod not_called {
    use super::*;

    #[test]
    fn ok() {
        let mock = MockSomeService::new();
        verify(&mock.create_something_one_arg).not_called();
    }

    #[test]
    #[should_panic(expected = "create_something_one_arg was expected not to be called\n       Other interactions with this mock: [(\"x\")]")]
    fn called() {
        let mock = MockSomeService::new();
        mock.create_something_one_arg("x");
        verify(&mock.create_something_one_arg).not_called();
    }
}

mod called_times {
    use super::*;

    #[test]
    fn ok() {
        let mock = MockSomeService::new();
        verify(&mock.create_something_one_arg).called_times(0);
        mock.create_something_one_arg("a");
        mock.create_something_one_arg("a");
        verify(&mock.create_something_one_arg).called_times(2);
    }

    #[test]
    #[should_panic(expected = "create_something_one_arg was called 2 times, expected 1\n       Other interactions with this mock: [(\"a\"),(\"b\")]")]
    fn too_many() {
        let mock = MockSomeService::new();
        mock.create_something_one_arg("a");
        mock.create_something_one_arg("b");
        verify(&mock.create_something_one_arg).called_times(1);
    }

    #[test]
    fn too_few() {
        let mock = MockSomeService::new();
        let e = verify(&mock.create_something_one_arg).try_called_times(3)
            .unwrap_err();
        assert_eq!("create_something_one_arg was called 0 times, expected 3",
                   e.to_string());
    }
}

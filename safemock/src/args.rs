// vim: tw=80
use serde::Serialize;
use std::{fmt, ops::Index, slice, sync::Arc};

use crate::Value;

/// The arguments of one call, captured at the moment the call was made.
///
/// Two `Args` are equal when they have the same length and every pair of
/// corresponding arguments is [structurally equal](Value).
#[derive(Clone, Debug)]
pub struct Args(Arc<[Value]>);

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Args(values.into())
    }

    pub fn get(&self, i: usize) -> Option<&Value> {
        self.0.get(i)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl PartialEq for Args {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() &&
            self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b)
    }
}

impl Index<usize> for Args {
    type Output = Value;

    fn index(&self, i: usize) -> &Value {
        &self.0[i]
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders as `("a", 1, Foo{"x":2})`
impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str(")")
    }
}

/// Renders a call history as `[("a"),("b")]`.
pub(crate) struct Listing<'a>(pub &'a [Args]);

impl<'a> fmt::Display for Listing<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[")?;
        for (i, args) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{args}")?;
        }
        f.write_str("]")
    }
}

/// The trailing "Other interactions" line of a verification failure.  Renders
/// as nothing at all when there were no calls.
pub(crate) struct Interactions<'a>(pub &'a [Args]);

impl<'a> fmt::Display for Interactions<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, "\n       Other interactions with this mock: {}",
                   Listing(self.0))
        }
    }
}

/// Anything that can be used as the argument list of a mocked call.
///
/// Implemented for [`Args`] and for tuples of up to twelve
/// [`Serialize`](serde::Serialize) values.  A single argument must be written
/// as a one-element tuple, like `("x",)`, or with [`args!`](crate::args).
pub trait IntoArgs {
    fn into_args(self) -> Args;
}

impl IntoArgs for Args {
    fn into_args(self) -> Args {
        self
    }
}

macro_rules! into_args_for_tuple {
    ($( $name:ident )*) => {
        impl<$( $name: Serialize ),*> IntoArgs for ($( $name, )*) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Args {
                let ($( $name, )*) = self;
                Args::new(vec![$( Value::of(&$name) ),*])
            }
        }
    }
}

into_args_for_tuple!{}
into_args_for_tuple!{A}
into_args_for_tuple!{A B}
into_args_for_tuple!{A B C}
into_args_for_tuple!{A B C D}
into_args_for_tuple!{A B C D E}
into_args_for_tuple!{A B C D E F}
into_args_for_tuple!{A B C D E F G}
into_args_for_tuple!{A B C D E F G H}
into_args_for_tuple!{A B C D E F G H I}
into_args_for_tuple!{A B C D E F G H I J}
into_args_for_tuple!{A B C D E F G H I J K}
into_args_for_tuple!{A B C D E F G H I J K L}

/// Build an [`Args`] from a list of expressions.
///
/// Each expression must be [`Serialize`](serde::Serialize).  Useful with
/// [`Verify::called_with`](crate::Verify::called_with) when there is only one
/// argument, or more than twelve.
///
/// # Examples
/// ```
/// # use safemock::*;
/// let args = args!("x", 1, [true]);
/// assert_eq!(r#"("x", 1, [true])"#, args.to_string());
/// assert_eq!(args!(), ().into_args());
/// ```
#[macro_export]
macro_rules! args {
    ($( $arg:expr ),* $(,)?) => {
        $crate::Args::new(vec![$( $crate::Value::of(&$arg) ),*])
    };
}

#[cfg(test)]
mod t {
    use super::*;

    #[test]
    fn display() {
        assert_eq!("()", ().into_args().to_string());
        assert_eq!("(\"a\")", ("a",).into_args().to_string());
        assert_eq!("(\"expected1\", \"expected2\")",
                   ("expected1", "expected2").into_args().to_string());
        assert_eq!("(1, \"x\", null)",
                   (1, "x", ()).into_args().to_string());
    }

    #[test]
    fn equality() {
        assert_eq!(("a", 1).into_args(), (String::from("a"), 1u64).into_args());
        assert_ne!(("a", 1).into_args(), ("a", 2).into_args());
        assert_ne!(("a",).into_args(), ("a", 1).into_args());
        assert_ne!(("a", 1).into_args(), ("a",).into_args());
        assert_eq!(().into_args(), Args::new(Vec::new()));
    }

    #[test]
    fn listing() {
        let calls = vec![("actual1", "actual2").into_args(),
                         ("other1", "other2").into_args()];
        assert_eq!(r#"[("actual1", "actual2"),("other1", "other2")]"#,
                   Listing(&calls).to_string());
        assert_eq!("[]", Listing(&[]).to_string());
    }

    #[test]
    fn interactions_omitted_when_empty() {
        assert_eq!("", Interactions(&[]).to_string());
        let calls = vec![("a",).into_args()];
        assert_eq!("\n       Other interactions with this mock: [(\"a\")]",
                   Interactions(&calls).to_string());
    }

    #[test]
    fn args_macro() {
        let a = args!("x", 2);
        assert_eq!(2, a.len());
        assert_eq!(Value::of("x"), a[0]);
        assert_eq!(a, ("x", 2).into_args());
        assert!(args!().is_empty());
    }

    #[test]
    fn many_args() {
        let a = ("1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12")
            .into_args();
        assert_eq!(12, a.len());
        assert_eq!(Some(&Value::of("12")), a.get(11));
    }
}

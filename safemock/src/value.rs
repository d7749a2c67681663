// vim: tw=80
//! Runtime representation of a single mocked-method argument.
//!
//! Arguments are captured through [`serde::Serialize`], so anything that can
//! be serialized can be stubbed on and verified against.  Two values are equal
//! when their data is equal, regardless of the Rust type that produced them.

use serde::{
    Serialize,
    Serializer,
    ser::{self, Error as _}
};
use serde_json::{
    Map,
    Number,
    Value as Json,
    value::Serializer as JsonSerializer
};
use std::fmt;

/// Key of the one-entry object that stands in for a non-finite float, which
/// JSON can't express.  Its value is `"inf"`, `"-inf"` or `"NaN"`.
const NON_FINITE: &str = "$safemock::float";

/// Struct name `serde_json::Number` serializes itself as when its digits are
/// kept as text.
const NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// One captured argument.
///
/// Holds the argument's data as a JSON tree, plus the name of the struct it
/// was serialized from, if any.  The struct name only affects how the value is
/// printed; it never takes part in equality.
///
/// Integers of any width are kept exactly.  Infinite and NaN floats are kept
/// as a one-entry object keyed by `"$safemock::float"`, and print as `inf`,
/// `-inf` and `NaN`.
#[derive(Clone, Debug)]
pub struct Value {
    class: Option<&'static str>,
    // None if the argument's Serialize impl failed
    data: Option<Json>,
}

impl Value {
    /// Capture an argument.
    ///
    /// # Examples
    /// ```
    /// # use safemock::Value;
    /// assert_eq!(Value::of(&1u8), Value::of(&1.0f64));
    /// assert_eq!("\"x\"", Value::of("x").to_string());
    /// assert_eq!("-inf", Value::of(&f64::NEG_INFINITY).to_string());
    /// ```
    pub fn of<T>(value: &T) -> Self
        where T: Serialize + ?Sized
    {
        let mut class = None;
        let data = value.serialize(Capture{class: Some(&mut class)});
        match data {
            Ok(data) => Value{class, data: Some(data)},
            Err(e) => {
                tracing::warn!(error = %e,
                    "argument can't be represented and will never match");
                Value{class, data: None}
            }
        }
    }

    /// Name of the struct this value was captured from, if it was one.
    pub fn class(&self) -> Option<&'static str> {
        self.class
    }

    /// The captured data, or `None` if it could not be serialized.
    pub fn data(&self) -> Option<&Json> {
        self.data.as_ref()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (Some(a), Some(b)) => structurally_eq(a, b),
            _ => false
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = match &self.data {
            Some(data) => data,
            None => return f.write_str("?")
        };
        let composite = match data {
            Json::Array(_) => true,
            Json::Object(map) => non_finite(map).is_none(),
            _ => false
        };
        match (self.class, data) {
            (None, Json::String(s)) => write!(f, "\"{s}\""),
            (None, data) => write!(f, "{}", Compact(data)),
            (Some(class), data) if composite =>
                write!(f, "{class}{}", Compact(data)),
            (Some(class), Json::Null) => write!(f, "{class}{{}}"),
            (Some(class), data) => write!(f, "{class}({})", Compact(data)),
        }
    }
}

/// If `map` stands for a non-finite float, which one
fn non_finite(map: &Map<String, Json>) -> Option<&str> {
    if map.len() != 1 {
        return None;
    }
    match map.get(NON_FINITE) {
        Some(Json::String(s)) => Some(s.as_str()),
        _ => None
    }
}

/// Compact JSON, except that non-finite floats print as bare `inf`, `-inf`
/// and `NaN`.
struct Compact<'a>(&'a Json);

impl<'a> fmt::Display for Compact<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Json::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", Compact(item))?;
                }
                f.write_str("]")
            },
            Json::Object(map) => {
                if let Some(s) = non_finite(map) {
                    return f.write_str(s);
                }
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}:{}", Json::String(k.clone()), Compact(v))?;
                }
                f.write_str("}")
            },
            scalar => write!(f, "{scalar}")
        }
    }
}

/// Deep equality on data alone.
///
/// Object fields are compared by name, so field order doesn't matter, and
/// numbers are compared by value, so `1u8` equals `1.0f64`.
pub(crate) fn structurally_eq(a: &Json, b: &Json) -> bool {
    match (a, b) {
        (Json::Null, Json::Null) => true,
        (Json::Bool(x), Json::Bool(y)) => x == y,
        (Json::Number(x), Json::Number(y)) => numbers_eq(x, y),
        (Json::String(x), Json::String(y)) => x == y,
        (Json::Array(x), Json::Array(y)) => {
            x.len() == y.len() &&
                x.iter().zip(y.iter()).all(|(x, y)| structurally_eq(x, y))
        },
        (Json::Object(x), Json::Object(y)) => {
            x.len() == y.len() &&
                x.iter().all(|(k, v)| {
                    y.get(k).map_or(false, |w| structurally_eq(v, w))
                })
        },
        _ => false
    }
}

/// A number as either an exact integer (sign and magnitude) or a float
#[derive(Clone, Copy, Debug, PartialEq)]
enum Num {
    Int(bool, u128),
    Float(f64)
}

impl Num {
    fn of(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return Num::Int(i < 0, u128::from(i.unsigned_abs()));
        }
        if let Some(u) = n.as_u64() {
            return Num::Int(false, u128::from(u));
        }
        // Wider integers only exist as text
        let text = n.to_string();
        if !text.contains(['.', 'e', 'E']) {
            let (negative, digits) = match text.strip_prefix('-') {
                Some(digits) => (true, digits),
                None => (false, text.as_str())
            };
            if let Ok(magnitude) = digits.parse::<u128>() {
                return Num::Int(negative && magnitude != 0, magnitude);
            }
        }
        Num::Float(n.as_f64().unwrap_or(f64::NAN))
    }

    /// The integer a float is exactly equal to, if any
    fn integral(f: f64) -> Option<Self> {
        // Rounds up to 2^128, the first float too large for a u128
        const LIMIT: f64 = u128::MAX as f64;
        if f.fract() != 0.0 || f.abs() >= LIMIT {
            return None;
        }
        // Integral and in range, so the cast is exact
        let magnitude = f.abs() as u128;
        Some(Num::Int(f < 0.0 && magnitude != 0, magnitude))
    }
}

fn numbers_eq(x: &Number, y: &Number) -> bool {
    match (Num::of(x), Num::of(y)) {
        (Num::Float(a), Num::Float(b)) => a == b,
        (int @ Num::Int(..), Num::Float(f)) |
        (Num::Float(f), int @ Num::Int(..)) => Num::integral(f) == Some(int),
        (a, b) => a == b
    }
}

/// Serializes like `serde_json::value::Serializer`, but keeps non-finite
/// floats and remembers the name of the outermost struct.
struct Capture<'a> {
    // Only set for the outermost value
    class: Option<&'a mut Option<&'static str>>
}

impl<'a> Capture<'a> {
    fn record(self, name: &'static str) {
        if let Some(class) = self.class {
            *class = Some(name);
        }
    }
}

fn capture<T>(value: &T) -> Result<Json, serde_json::Error>
    where T: Serialize + ?Sized
{
    value.serialize(Capture{class: None})
}

fn float(v: f64) -> Json {
    if v.is_finite() {
        Json::from(v)
    } else {
        let s = if v.is_nan() {
            "NaN"
        } else if v > 0.0 {
            "inf"
        } else {
            "-inf"
        };
        let mut map = Map::new();
        map.insert(NON_FINITE.to_owned(), Json::from(s));
        Json::Object(map)
    }
}

fn tagged(variant: &'static str, value: Json) -> Json {
    let mut map = Map::new();
    map.insert(variant.to_owned(), value);
    Json::Object(map)
}

macro_rules! forward {
    ($( $method:ident ( $( $arg:ident : $ty:ty ),* ); )*) => {
        $(
            fn $method(self, $( $arg: $ty ),*)
                -> Result<Self::Ok, Self::Error>
            {
                JsonSerializer.$method($( $arg ),*)
            }
        )*
    }
}

impl<'a> Serializer for Capture<'a> {
    type Ok = Json;
    type Error = serde_json::Error;
    type SerializeSeq = SeqCapture;
    type SerializeTuple = SeqCapture;
    type SerializeTupleStruct = SeqCapture;
    type SerializeTupleVariant = SeqCapture;
    type SerializeMap = MapCapture;
    type SerializeStruct = MapCapture;
    type SerializeStructVariant = MapCapture;

    forward!{
        serialize_bool(v: bool);
        serialize_i8(v: i8);
        serialize_i16(v: i16);
        serialize_i32(v: i32);
        serialize_i64(v: i64);
        serialize_i128(v: i128);
        serialize_u8(v: u8);
        serialize_u16(v: u16);
        serialize_u32(v: u32);
        serialize_u64(v: u64);
        serialize_u128(v: u128);
        serialize_char(v: char);
        serialize_str(v: &str);
        serialize_bytes(v: &[u8]);
        serialize_none();
        serialize_unit();
        serialize_unit_variant(name: &'static str, index: u32,
                               variant: &'static str);
    }

    fn serialize_f32(self, v: f32) -> Result<Json, serde_json::Error> {
        if v.is_finite() {
            JsonSerializer.serialize_f32(v)
        } else {
            Ok(float(f64::from(v)))
        }
    }

    fn serialize_f64(self, v: f64) -> Result<Json, serde_json::Error> {
        Ok(float(v))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Json, serde_json::Error>
        where T: Serialize + ?Sized
    {
        // Option is transparent: Some(Foo{..}) still prints as Foo{..}
        value.serialize(self)
    }

    fn serialize_unit_struct(self, name: &'static str)
        -> Result<Json, serde_json::Error>
    {
        self.record(name);
        Ok(Json::Null)
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T)
        -> Result<Json, serde_json::Error>
        where T: Serialize + ?Sized
    {
        self.record(name);
        capture(value)
    }

    fn serialize_newtype_variant<T>(self, _name: &'static str, _index: u32,
                                    variant: &'static str, value: &T)
        -> Result<Json, serde_json::Error>
        where T: Serialize + ?Sized
    {
        Ok(tagged(variant, capture(value)?))
    }

    fn serialize_seq(self, len: Option<usize>)
        -> Result<SeqCapture, serde_json::Error>
    {
        Ok(SeqCapture::new(None, len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize)
        -> Result<SeqCapture, serde_json::Error>
    {
        Ok(SeqCapture::new(None, len))
    }

    fn serialize_tuple_struct(self, name: &'static str, len: usize)
        -> Result<SeqCapture, serde_json::Error>
    {
        self.record(name);
        Ok(SeqCapture::new(None, len))
    }

    fn serialize_tuple_variant(self, _name: &'static str, _index: u32,
                               variant: &'static str, len: usize)
        -> Result<SeqCapture, serde_json::Error>
    {
        Ok(SeqCapture::new(Some(variant), len))
    }

    fn serialize_map(self, _len: Option<usize>)
        -> Result<MapCapture, serde_json::Error>
    {
        Ok(MapCapture::new(None))
    }

    fn serialize_struct(self, name: &'static str, _len: usize)
        -> Result<MapCapture, serde_json::Error>
    {
        if name == NUMBER_TOKEN {
            return Ok(MapCapture{number: true, ..MapCapture::new(None)});
        }
        self.record(name);
        Ok(MapCapture::new(None))
    }

    fn serialize_struct_variant(self, _name: &'static str, _index: u32,
                                variant: &'static str, _len: usize)
        -> Result<MapCapture, serde_json::Error>
    {
        Ok(MapCapture::new(Some(variant)))
    }
}

/// Sequences, tuples, tuple structs and tuple variants
struct SeqCapture {
    variant: Option<&'static str>,
    items: Vec<Json>
}

impl SeqCapture {
    fn new(variant: Option<&'static str>, len: usize) -> Self {
        SeqCapture{variant, items: Vec::with_capacity(len)}
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T)
        -> Result<(), serde_json::Error>
    {
        self.items.push(capture(value)?);
        Ok(())
    }

    fn finish(self) -> Result<Json, serde_json::Error> {
        let array = Json::Array(self.items);
        Ok(match self.variant {
            Some(variant) => tagged(variant, array),
            None => array
        })
    }
}

impl ser::SerializeSeq for SeqCapture {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_element<T>(&mut self, value: &T)
        -> Result<(), serde_json::Error>
        where T: Serialize + ?Sized
    {
        self.push(value)
    }

    fn end(self) -> Result<Json, serde_json::Error> {
        self.finish()
    }
}

impl ser::SerializeTuple for SeqCapture {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_element<T>(&mut self, value: &T)
        -> Result<(), serde_json::Error>
        where T: Serialize + ?Sized
    {
        self.push(value)
    }

    fn end(self) -> Result<Json, serde_json::Error> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SeqCapture {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, value: &T)
        -> Result<(), serde_json::Error>
        where T: Serialize + ?Sized
    {
        self.push(value)
    }

    fn end(self) -> Result<Json, serde_json::Error> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SeqCapture {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, value: &T)
        -> Result<(), serde_json::Error>
        where T: Serialize + ?Sized
    {
        self.push(value)
    }

    fn end(self) -> Result<Json, serde_json::Error> {
        self.finish()
    }
}

/// Maps, structs and struct variants
struct MapCapture {
    variant: Option<&'static str>,
    map: Map<String, Json>,
    next_key: Option<String>,
    // A serde_json::Number in disguise
    number: bool
}

impl MapCapture {
    fn new(variant: Option<&'static str>) -> Self {
        MapCapture{variant, map: Map::new(), next_key: None, number: false}
    }

    fn insert<T: Serialize + ?Sized>(&mut self, key: String, value: &T)
        -> Result<(), serde_json::Error>
    {
        self.map.insert(key, capture(value)?);
        Ok(())
    }

    fn finish(mut self) -> Result<Json, serde_json::Error> {
        if self.number {
            return match self.map.remove(NUMBER_TOKEN) {
                Some(Json::String(digits)) =>
                    digits.parse::<Number>().map(Json::Number),
                _ => Err(serde_json::Error::custom("malformed number"))
            };
        }
        let object = Json::Object(self.map);
        Ok(match self.variant {
            Some(variant) => tagged(variant, object),
            None => object
        })
    }
}

impl ser::SerializeMap for MapCapture {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), serde_json::Error>
        where T: Serialize + ?Sized
    {
        // JSON object keys are strings; scalar keys are stringified
        let key = match capture(key)? {
            Json::String(s) => s,
            Json::Number(n) => n.to_string(),
            Json::Bool(b) => b.to_string(),
            _ => return Err(serde_json::Error::custom("key must be a string"))
        };
        self.next_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T)
        -> Result<(), serde_json::Error>
        where T: Serialize + ?Sized
    {
        match self.next_key.take() {
            Some(key) => self.insert(key, value),
            None => Err(serde_json::Error::custom(
                "serialize_value called before serialize_key"))
        }
    }

    fn end(self) -> Result<Json, serde_json::Error> {
        self.finish()
    }
}

impl ser::SerializeStruct for MapCapture {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T)
        -> Result<(), serde_json::Error>
        where T: Serialize + ?Sized
    {
        self.insert(key.to_owned(), value)
    }

    fn end(self) -> Result<Json, serde_json::Error> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for MapCapture {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T)
        -> Result<(), serde_json::Error>
        where T: Serialize + ?Sized
    {
        self.insert(key.to_owned(), value)
    }

    fn end(self) -> Result<Json, serde_json::Error> {
        self.finish()
    }
}

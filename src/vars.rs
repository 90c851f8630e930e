// Variable values and the environments templates are expanded against

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::ExpandError;

/// A variable value: a string, a list of strings, or an associative array
///
/// Map entries keep the order they were built in; that order is the
/// order they are expanded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
    Map(Vec<(String, String)>),
}

impl Value {
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        Value::List(items.into_iter().map(|item| item.to_string()).collect())
    }

    /// Build a map value, keeping the given entry order
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: ToString,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Empty lists and maps are treated as undefined during expansion
    pub fn is_empty_collection(&self) -> bool {
        match self {
            Value::Scalar(_) => false,
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Scalar(value.clone())
    }
}

macro_rules! scalar_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_display!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: ToString> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().map(ToString::to_string).collect())
    }
}

impl<K: ToString, V: ToString> From<BTreeMap<K, V>> for Value {
    fn from(entries: BTreeMap<K, V>) -> Self {
        Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Entries are sorted by key so expansion does not depend on hash order
impl<K: ToString, V: ToString, S> From<HashMap<K, V, S>> for Value {
    fn from(entries: HashMap<K, V, S>) -> Self {
        let mut pairs: Vec<(String, String)> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        pairs.sort();
        Value::Map(pairs)
    }
}

/// Lookup of variable values by name
pub trait Environment {
    fn lookup(&self, name: &str) -> Option<&Value>;
}

impl<K, S> Environment for HashMap<K, Value, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<K> Environment for BTreeMap<K, Value>
where
    K: Borrow<str> + Ord,
{
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, name: &str) -> Option<&Value> {
        (**self).lookup(name)
    }
}

/// Owned variable set produced by the conversion helpers
pub type Vars = HashMap<String, Value>;

/// Convert a serializable record into variables
///
/// Field names follow serde (`#[serde(rename = "...")]` sets the variable
/// name). `None` fields are left undefined. Nested records become maps,
/// and sequences become lists, as long as their members are scalars.
pub fn to_vars<T: Serialize + ?Sized>(record: &T) -> Result<Vars, ExpandError> {
    let json = serde_json::to_value(record).map_err(|err| ExpandError::UnsupportedValue {
        name: String::new(),
        reason: err.to_string(),
    })?;
    vars_from_json(json)
}

/// Convert a JSON object into variables; see [`to_vars`]
pub fn vars_from_json(json: JsonValue) -> Result<Vars, ExpandError> {
    let object = match json {
        JsonValue::Object(object) => object,
        other => {
            return Err(ExpandError::UnsupportedValue {
                name: String::new(),
                reason: format!("expected an object of variables, found {}", kind_of(&other)),
            })
        }
    };

    let mut vars = Vars::with_capacity(object.len());
    for (name, value) in object {
        if let Some(value) = value_from_json(&name, value)? {
            vars.insert(name, value);
        }
    }
    Ok(vars)
}

fn value_from_json(name: &str, json: JsonValue) -> Result<Option<Value>, ExpandError> {
    let value = match json {
        JsonValue::Null => return Ok(None),
        JsonValue::Array(items) => Value::List(
            items
                .into_iter()
                .map(|item| scalar_from_json(name, item))
                .collect::<Result<_, _>>()?,
        ),
        JsonValue::Object(entries) => {
            let mut pairs = Vec::with_capacity(entries.len());
            for (key, item) in entries {
                if item.is_null() {
                    continue;
                }
                pairs.push((key, scalar_from_json(name, item)?));
            }
            Value::Map(pairs)
        }
        scalar => Value::Scalar(scalar_from_json(name, scalar)?),
    };
    Ok(Some(value))
}

fn scalar_from_json(name: &str, json: JsonValue) -> Result<String, ExpandError> {
    match json {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        other => Err(ExpandError::UnsupportedValue {
            name: name.to_string(),
            reason: format!("nested {} cannot be expanded", kind_of(&other)),
        }),
    }
}

fn kind_of(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

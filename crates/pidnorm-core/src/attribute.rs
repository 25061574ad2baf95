//! Typed attributes attached to nodes and edges.
//!
//! An [`Attribute`] is a `(name, value, declared type)` triple. Values are a
//! closed set of scalar and list variants ([`AttributeValue`]); the declared
//! type ([`DataType`]) is carried separately because source records may omit
//! it, and an omitted type is equivalent to `string`.
//!
//! [`Attributes`] is the insertion-ordered bag owned by each node and edge.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Declared data types
// ---------------------------------------------------------------------------

/// Declared type tag of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    String,
    Boolean,
    Integer,
    Long,
    Double,
    ListOfString,
    ListOfBoolean,
    ListOfInteger,
    ListOfLong,
    ListOfDouble,
}

impl DataType {
    /// Returns `true` for the `list_of_*` tags.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            DataType::ListOfString
                | DataType::ListOfBoolean
                | DataType::ListOfInteger
                | DataType::ListOfLong
                | DataType::ListOfDouble
        )
    }

    /// The list tag with the same element type. List tags map to themselves.
    pub fn as_list(&self) -> DataType {
        match self {
            DataType::String => DataType::ListOfString,
            DataType::Boolean => DataType::ListOfBoolean,
            DataType::Integer => DataType::ListOfInteger,
            DataType::Long => DataType::ListOfLong,
            DataType::Double => DataType::ListOfDouble,
            list => *list,
        }
    }

    /// The wire name of this tag, e.g. `list_of_string`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Boolean => "boolean",
            DataType::Integer => "integer",
            DataType::Long => "long",
            DataType::Double => "double",
            DataType::ListOfString => "list_of_string",
            DataType::ListOfBoolean => "list_of_boolean",
            DataType::ListOfInteger => "list_of_integer",
            DataType::ListOfLong => "list_of_long",
            DataType::ListOfDouble => "list_of_double",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// The value of an attribute: a scalar or an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    String(String),
    Boolean(bool),
    Integer(i64),
    Double(f64),
    StringList(Vec<String>),
    BooleanList(Vec<bool>),
    IntegerList(Vec<i64>),
    DoubleList(Vec<f64>),
}

impl AttributeValue {
    /// Returns `true` if this is one of the list variants.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            AttributeValue::StringList(_)
                | AttributeValue::BooleanList(_)
                | AttributeValue::IntegerList(_)
                | AttributeValue::DoubleList(_)
        )
    }

    /// The type tag implied by the variant.
    pub fn inferred_type(&self) -> DataType {
        match self {
            AttributeValue::String(_) => DataType::String,
            AttributeValue::Boolean(_) => DataType::Boolean,
            AttributeValue::Integer(_) => DataType::Long,
            AttributeValue::Double(_) => DataType::Double,
            AttributeValue::StringList(_) => DataType::ListOfString,
            AttributeValue::BooleanList(_) => DataType::ListOfBoolean,
            AttributeValue::IntegerList(_) => DataType::ListOfLong,
            AttributeValue::DoubleList(_) => DataType::ListOfDouble,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::StringList(list) => Some(list),
            _ => None,
        }
    }

    /// Sorted, duplicate-free copy of a list value. Scalars are returned as is.
    pub fn canonical(&self) -> AttributeValue {
        match self {
            AttributeValue::StringList(list) => {
                let mut list = list.clone();
                list.sort();
                list.dedup();
                AttributeValue::StringList(list)
            }
            AttributeValue::BooleanList(list) => {
                let mut list = list.clone();
                list.sort();
                list.dedup();
                AttributeValue::BooleanList(list)
            }
            AttributeValue::IntegerList(list) => {
                let mut list = list.clone();
                list.sort();
                list.dedup();
                AttributeValue::IntegerList(list)
            }
            AttributeValue::DoubleList(list) => {
                let mut list = list.clone();
                list.sort_by(f64::total_cmp);
                list.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
                AttributeValue::DoubleList(list)
            }
            scalar => scalar.clone(),
        }
    }

    /// Combines two values of the same element kind into one.
    ///
    /// Equal scalars stay scalar. Differing scalars, or any list involvement,
    /// produce the canonical (sorted, deduplicated) union list. Returns `None`
    /// when the element kinds differ.
    pub fn merged_with(&self, other: &AttributeValue) -> Option<AttributeValue> {
        use AttributeValue as V;

        if !self.is_list() && self == other {
            return Some(self.clone());
        }

        let merged = match (self, other) {
            (V::String(a), V::String(b)) => V::StringList(vec![a.clone(), b.clone()]),
            (V::String(a), V::StringList(b)) | (V::StringList(b), V::String(a)) => {
                V::StringList(b.iter().cloned().chain(std::iter::once(a.clone())).collect())
            }
            (V::StringList(a), V::StringList(b)) => {
                V::StringList(a.iter().chain(b.iter()).cloned().collect())
            }
            (V::Boolean(a), V::Boolean(b)) => V::BooleanList(vec![*a, *b]),
            (V::Boolean(a), V::BooleanList(b)) | (V::BooleanList(b), V::Boolean(a)) => {
                V::BooleanList(b.iter().copied().chain(std::iter::once(*a)).collect())
            }
            (V::BooleanList(a), V::BooleanList(b)) => {
                V::BooleanList(a.iter().chain(b.iter()).copied().collect())
            }
            (V::Integer(a), V::Integer(b)) => V::IntegerList(vec![*a, *b]),
            (V::Integer(a), V::IntegerList(b)) | (V::IntegerList(b), V::Integer(a)) => {
                V::IntegerList(b.iter().copied().chain(std::iter::once(*a)).collect())
            }
            (V::IntegerList(a), V::IntegerList(b)) => {
                V::IntegerList(a.iter().chain(b.iter()).copied().collect())
            }
            (V::Double(a), V::Double(b)) => V::DoubleList(vec![*a, *b]),
            (V::Double(a), V::DoubleList(b)) | (V::DoubleList(b), V::Double(a)) => {
                V::DoubleList(b.iter().copied().chain(std::iter::once(*a)).collect())
            }
            (V::DoubleList(a), V::DoubleList(b)) => {
                V::DoubleList(a.iter().chain(b.iter()).copied().collect())
            }
            _ => return None,
        };
        Some(merged.canonical())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{s}"),
            AttributeValue::Boolean(b) => write!(f, "{b}"),
            AttributeValue::Integer(i) => write!(f, "{i}"),
            AttributeValue::Double(d) => write!(f, "{d}"),
            AttributeValue::StringList(l) => write!(f, "{l:?}"),
            AttributeValue::BooleanList(l) => write!(f, "{l:?}"),
            AttributeValue::IntegerList(l) => write!(f, "{l:?}"),
            AttributeValue::DoubleList(l) => write!(f, "{l:?}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<f64> for AttributeValue {
    fn from(d: f64) -> Self {
        AttributeValue::Double(d)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(list: Vec<String>) -> Self {
        AttributeValue::StringList(list)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(list: Vec<&str>) -> Self {
        AttributeValue::StringList(list.into_iter().map(str::to_string).collect())
    }
}

// ---------------------------------------------------------------------------
// Attribute
// ---------------------------------------------------------------------------

/// A named, typed value attached to a node or edge.
///
/// Equality is looser than structural equality: list values compare as sets
/// (order and duplicates ignored), and a declared `string` type matches an
/// undeclared type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
}

impl Attribute {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
        data_type: Option<DataType>,
    ) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
            data_type,
        }
    }

    /// Creates an attribute whose declared type is inferred from the value.
    pub fn typed(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        let value = value.into();
        let data_type = Some(value.inferred_type());
        Attribute {
            name: name.into(),
            value,
            data_type,
        }
    }

    /// Explains why `self` and `other` are not equal, or `None` if they are.
    pub fn mismatch_reason(&self, other: &Attribute) -> Option<String> {
        if self.name != other.name {
            return Some(format!("{} name does not match {}", self.name, other.name));
        }

        if self.value != other.value {
            let both_lists = self.value.is_list() && other.value.is_list();
            if !both_lists || self.value.canonical() != other.value.canonical() {
                return Some(format!(
                    "{} value does not match {}",
                    self.value, other.value
                ));
            }
        }

        match (self.data_type, other.data_type) {
            (a, b) if a == b => None,
            (Some(DataType::String), None) | (None, Some(DataType::String)) => None,
            _ => Some("data types differ".to_string()),
        }
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.mismatch_reason(other).is_none()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data_type {
            Some(t) => write!(f, "name={}, values={}, type={}", self.name, self.value, t),
            None => write!(f, "name={}, values={}, type=None", self.name, self.value),
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute bag
// ---------------------------------------------------------------------------

/// Insertion-ordered attribute bag keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, Attribute>);

impl Attributes {
    pub fn new() -> Self {
        Attributes(IndexMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.0.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Inserts or replaces an attribute, returning the previous one.
    ///
    /// A replaced attribute keeps its original position.
    pub fn insert(&mut self, attribute: Attribute) -> Option<Attribute> {
        self.0.insert(attribute.name.clone(), attribute)
    }

    /// Removes an attribute, preserving the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        self.0.shift_remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for attr in iter {
            attrs.insert(attr);
        }
        attrs
    }
}

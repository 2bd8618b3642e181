//! Schema-directed deserialization of loosely typed YAML mappings
//!
//! FactoryMod configs changed shape between server revisions: keys come and
//! go, lists are sometimes written as mappings keyed by a natural name, and a
//! few keys are not valid identifiers. Every record type therefore declares
//! an explicit [`Schema`] (an ordered list of fields with a type tag, an
//! optional default, an optional source key and an optional special-parse
//! hook), and [`deserialize`] walks that list against the source mapping.
//!
//! Per field, in declaration order:
//!
//! 1. the source key is the override if one is declared, else the field name;
//! 2. a special-parse hook, if any, gets the whole mapping and nothing else runs;
//! 3. a missing key yields an empty list for list fields, else the declared
//!    default, else no value;
//! 4. an explicit null yields no value, even for list fields;
//! 5. a list-of-record field written as a mapping is expanded entry by entry,
//!    each record taking the entry's key as its identity;
//! 6. anything else goes through the field type's scalar conversion.

use serde_yaml::{Mapping, Value};

use crate::duration::{parse_duration, Duration};
use crate::error::{Error, Result};

/// Semantic type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Str,
    Int,
    Float,
    Bool,
    Duration,
    Enum(&'static str),
    Record(&'static str),
    RecordList(&'static str),
    StrList,
}

impl FieldType {
    pub fn is_list(self) -> bool {
        matches!(self, FieldType::RecordList(_) | FieldType::StrList)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Str => write!(f, "string"),
            FieldType::Int => write!(f, "integer"),
            FieldType::Float => write!(f, "number"),
            FieldType::Bool => write!(f, "boolean"),
            FieldType::Duration => write!(f, "duration"),
            FieldType::Enum(name) => write!(f, "{}", name),
            FieldType::Record(name) => write!(f, "{} mapping", name),
            FieldType::RecordList(name) => write!(f, "list of {}", name),
            FieldType::StrList => write!(f, "list of strings"),
        }
    }
}

/// Where in the document a value is being read, for error messages.
#[derive(Debug, Clone, Copy)]
pub struct FieldPath {
    pub record: &'static str,
    pub field: &'static str,
}

impl FieldPath {
    pub fn violation(&self, expected: impl ToString, raw: &Value) -> Error {
        Error::SchemaViolation {
            record: self.record,
            field: self.field,
            expected: expected.to_string(),
            value: describe(raw),
        }
    }

    /// Attach this location to an error raised while parsing the field.
    pub fn invalid(&self, source: Error) -> Error {
        Error::InvalidField {
            record: self.record,
            field: self.field,
            source: Box::new(source),
        }
    }
}

fn describe(raw: &Value) -> String {
    match serde_yaml::to_string(raw) {
        Ok(text) => text.trim_end().to_string(),
        Err(_) => format!("{:?}", raw),
    }
}

/// A scalar (or list of scalars) a field can hold.
pub trait FieldValue: Sized {
    const TYPE: FieldType;

    fn from_value(raw: &Value, at: &FieldPath) -> Result<Self>;

    /// Value used when the source key is missing and no default is declared.
    fn empty() -> Option<Self> {
        None
    }
}

impl FieldValue for String {
    const TYPE: FieldType = FieldType::Str;

    fn from_value(raw: &Value, at: &FieldPath) -> Result<Self> {
        match raw {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(at.violation(Self::TYPE, raw)),
        }
    }
}

impl FieldValue for i64 {
    const TYPE: FieldType = FieldType::Int;

    fn from_value(raw: &Value, at: &FieldPath) -> Result<Self> {
        match raw {
            Value::Number(n) => n
                .as_i64()
                // floats truncate toward zero, like an integer cast
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .ok_or_else(|| at.violation(Self::TYPE, raw)),
            Value::String(s) => s.trim().parse().map_err(|_| at.violation(Self::TYPE, raw)),
            Value::Bool(b) => Ok(i64::from(*b)),
            _ => Err(at.violation(Self::TYPE, raw)),
        }
    }
}

impl FieldValue for f64 {
    const TYPE: FieldType = FieldType::Float;

    fn from_value(raw: &Value, at: &FieldPath) -> Result<Self> {
        match raw {
            Value::Number(n) => n.as_f64().ok_or_else(|| at.violation(Self::TYPE, raw)),
            Value::String(s) => s.trim().parse().map_err(|_| at.violation(Self::TYPE, raw)),
            _ => Err(at.violation(Self::TYPE, raw)),
        }
    }
}

impl FieldValue for bool {
    const TYPE: FieldType = FieldType::Bool;

    fn from_value(raw: &Value, at: &FieldPath) -> Result<Self> {
        match raw {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(at.violation(Self::TYPE, raw)),
        }
    }
}

impl FieldValue for Duration {
    const TYPE: FieldType = FieldType::Duration;

    fn from_value(raw: &Value, at: &FieldPath) -> Result<Self> {
        match raw {
            Value::String(s) => parse_duration(s).map_err(|e| at.invalid(e)),
            _ => Err(at.violation(Self::TYPE, raw)),
        }
    }
}

impl FieldValue for Vec<String> {
    const TYPE: FieldType = FieldType::StrList;

    fn from_value(raw: &Value, at: &FieldPath) -> Result<Self> {
        match raw {
            Value::Sequence(items) => items.iter().map(|v| String::from_value(v, at)).collect(),
            _ => Err(at.violation(Self::TYPE, raw)),
        }
    }

    fn empty() -> Option<Self> {
        Some(Vec::new())
    }
}

/// A record type with an explicit schema.
///
/// Implementors are built from `Default` and then populated field by field
/// through the setters their schema registers.
pub trait Record: Default + Sized + 'static {
    const NAME: &'static str;

    fn schema() -> Schema<Self>;

    /// Attach the mapping key a record was listed under.
    fn set_key(&mut self, key: String);

    /// Runs once every declared field has been assigned.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

type Assign<R> = Box<dyn Fn(&mut R, &Mapping, &FieldPath, &str) -> Result<()>>;

/// One declared field of a record type.
pub struct Field<R> {
    name: &'static str,
    source_key: Option<&'static str>,
    field_type: FieldType,
    has_default: bool,
    special: bool,
    assign: Assign<R>,
}

impl<R> Field<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The key this field is read from in the source mapping.
    pub fn source_key(&self) -> &'static str {
        self.source_key.unwrap_or(self.name)
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn has_default(&self) -> bool {
        self.has_default
    }

    pub fn is_special(&self) -> bool {
        self.special
    }
}

/// Ordered field declarations for a record type.
pub struct Schema<R> {
    record: &'static str,
    fields: Vec<Field<R>>,
}

impl<R: Record> Default for Schema<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Schema<R> {
    pub fn new() -> Self {
        Self {
            record: R::NAME,
            fields: Vec::new(),
        }
    }

    pub fn record(&self) -> &'static str {
        self.record
    }

    pub fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    pub fn field<T, F>(self, name: &'static str, set: F) -> Self
    where
        T: FieldValue + Clone + 'static,
        F: Fn(&mut R, Option<T>) + 'static,
    {
        self.scalar(name, None, None, set)
    }

    /// A field that takes `default` when its key is missing.
    pub fn field_or<T, F>(self, name: &'static str, default: T, set: F) -> Self
    where
        T: FieldValue + Clone + 'static,
        F: Fn(&mut R, Option<T>) + 'static,
    {
        self.scalar(name, None, Some(default), set)
    }

    /// A field read from a source key that is not a valid identifier.
    pub fn renamed<T, F>(self, name: &'static str, source_key: &'static str, set: F) -> Self
    where
        T: FieldValue + Clone + 'static,
        F: Fn(&mut R, Option<T>) + 'static,
    {
        self.scalar(name, Some(source_key), None, set)
    }

    /// A single nested record.
    pub fn nested<C, F>(self, name: &'static str, set: F) -> Self
    where
        C: Record,
        F: Fn(&mut R, Option<C>) + 'static,
    {
        let assign: Assign<R> = Box::new(move |record, data, path, key| {
            let value = read_slot(data, key, || None, |raw| deserialize_value::<C>(raw, path))?;
            set(record, value);
            Ok(())
        });
        self.push(name, None, FieldType::Record(C::NAME), false, false, assign)
    }

    /// A list of records, written either as a sequence or as a keyed mapping.
    pub fn records<C, F>(self, name: &'static str, set: F) -> Self
    where
        C: Record,
        F: Fn(&mut R, Option<Vec<C>>) + 'static,
    {
        let assign: Assign<R> = Box::new(move |record, data, path, key| {
            let value = read_slot(data, key, || Some(Vec::new()), |raw| record_list::<C>(raw, path))?;
            set(record, value);
            Ok(())
        });
        self.push(name, None, FieldType::RecordList(C::NAME), false, false, assign)
    }

    /// A field with its own extraction rule over the whole source mapping.
    pub fn special<T, P, F>(self, name: &'static str, field_type: FieldType, parse: P, set: F) -> Self
    where
        T: 'static,
        P: Fn(&Mapping, &FieldPath) -> Result<T> + 'static,
        F: Fn(&mut R, T) + 'static,
    {
        let assign: Assign<R> = Box::new(move |record, data, path, _key| {
            set(record, parse(data, path)?);
            Ok(())
        });
        self.push(name, None, field_type, false, true, assign)
    }

    fn scalar<T, F>(
        self,
        name: &'static str,
        source_key: Option<&'static str>,
        default: Option<T>,
        set: F,
    ) -> Self
    where
        T: FieldValue + Clone + 'static,
        F: Fn(&mut R, Option<T>) + 'static,
    {
        let has_default = default.is_some();
        let assign: Assign<R> = Box::new(move |record, data, path, key| {
            let fallback = || match &default {
                Some(d) => Some(d.clone()),
                None => T::empty(),
            };
            let value = read_slot(data, key, fallback, |raw| T::from_value(raw, path))?;
            set(record, value);
            Ok(())
        });
        self.push(name, source_key, T::TYPE, has_default, false, assign)
    }

    fn push(
        mut self,
        name: &'static str,
        source_key: Option<&'static str>,
        field_type: FieldType,
        has_default: bool,
        special: bool,
        assign: Assign<R>,
    ) -> Self {
        self.fields.push(Field {
            name,
            source_key,
            field_type,
            has_default,
            special,
            assign,
        });
        self
    }
}

fn read_slot<T>(
    data: &Mapping,
    key: &str,
    missing: impl FnOnce() -> Option<T>,
    convert: impl FnOnce(&Value) -> Result<T>,
) -> Result<Option<T>> {
    match data.get(key) {
        None => Ok(missing()),
        Some(Value::Null) => Ok(None),
        Some(raw) => convert(raw).map(Some),
    }
}

fn record_list<C: Record>(raw: &Value, path: &FieldPath) -> Result<Vec<C>> {
    match raw {
        Value::Mapping(entries) => deserialize_keyed(entries, path),
        Value::Sequence(items) => items.iter().map(|item| deserialize_value(item, path)).collect(),
        _ => Err(path.violation(FieldType::RecordList(C::NAME), raw)),
    }
}

/// Populate a record of type `R` from a source mapping.
pub fn deserialize<R: Record>(data: &Mapping) -> Result<R> {
    let schema = R::schema();
    let mut record = R::default();
    for field in schema.fields() {
        let path = FieldPath {
            record: schema.record(),
            field: field.name(),
        };
        (field.assign)(&mut record, data, &path, field.source_key())?;
    }
    record.finish()?;
    Ok(record)
}

/// Like [`deserialize`], for a value that must turn out to be a mapping.
pub fn deserialize_value<R: Record>(raw: &Value, path: &FieldPath) -> Result<R> {
    match raw {
        Value::Mapping(data) => deserialize(data),
        _ => Err(path.violation(format!("{} mapping", R::NAME), raw)),
    }
}

/// Expand `{key: {...}, ...}` into records carrying their keys, in source order.
pub fn deserialize_keyed<R: Record>(entries: &Mapping, path: &FieldPath) -> Result<Vec<R>> {
    entries
        .iter()
        .map(|(key, value)| {
            let mut record: R = deserialize_value(value, path)?;
            record.set_key(key_text(key));
            Ok(record)
        })
        .collect()
}

/// Text of a mapping key. YAML lets keys be numbers or booleans too.
pub fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => describe(other),
    }
}

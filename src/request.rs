//! Request arguments.
//!
//! [`RequestArguments`] is the ordered field map every endpoint builds before
//! calling the dispatcher. Its iteration order feeds the request signature, so
//! it is insertion ordered and an overwrite keeps the original position.

use crate::error::{Result, VeryfiError};
use crate::mime::mime_type_for;
use reqwest::multipart::{Form, Part};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// A primitive value accepted as an additional request field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text value.
    String(String),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::String(s) => Value::String(s),
            FieldValue::Integer(i) => Value::from(i),
            FieldValue::Float(f) => Value::from(f),
            FieldValue::Bool(b) => Value::Bool(b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

macro_rules! integer_field_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_field_value!(i8, i16, i32, i64, u8, u16, u32);

/// Caller-supplied extra fields.
///
/// The map is merged after every computed field of a request, so a key that
/// collides with a default replaces it. Values are limited to primitives.
///
/// ```rust
/// use veryfi::AdditionalFields;
///
/// let extra = AdditionalFields::new()
///     .with("external_id", "inv-0042")
///     .with("max_pages_to_process", 3);
/// assert_eq!(extra.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdditionalFields {
    entries: Vec<(String, FieldValue)>,
}

impl AdditionalFields {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AdditionalFields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = AdditionalFields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl Serialize for AdditionalFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A file sent as the binary part of a multipart request.
#[derive(Debug)]
pub struct FileUpload {
    file_name: String,
    content: UploadContent,
}

#[derive(Debug)]
enum UploadContent {
    Bytes(Vec<u8>),
    Stream {
        body: reqwest::Body,
        length: Option<u64>,
    },
}

impl FileUpload {
    /// Upload an in-memory buffer.
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: UploadContent::Bytes(bytes.into()),
        }
    }

    /// Upload a byte stream.
    ///
    /// When `length` is known the multipart body gets a `Content-Length`;
    /// otherwise it is sent chunked.
    pub fn from_body(
        file_name: impl Into<String>,
        body: impl Into<reqwest::Body>,
        length: Option<u64>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content: UploadContent::Stream {
                body: body.into(),
                length,
            },
        }
    }

    /// Stream a file from disk. The file name is the last path component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                VeryfiError::InvalidRequest(format!("no file name in path {}", path.display()))
            })?
            .to_string();

        let file = tokio::fs::File::open(path).await?;
        let length = file.metadata().await?.len();

        Ok(Self::from_body(file_name, file, Some(length)))
    }

    /// The file name sent with the upload.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn into_part(self) -> Result<Part> {
        let mime = mime_type_for(&self.file_name);
        let part = match self.content {
            UploadContent::Bytes(bytes) => Part::bytes(bytes),
            UploadContent::Stream {
                body,
                length: Some(length),
            } => Part::stream_with_length(body, length),
            UploadContent::Stream { body, length: None } => Part::stream(body),
        };

        part.file_name(self.file_name)
            .mime_str(mime)
            .map_err(|e| VeryfiError::InvalidRequest(e.to_string()))
    }
}

/// A single request argument.
#[derive(Debug)]
pub enum Argument {
    /// A JSON value.
    Value(Value),
    /// A binary upload. Its presence makes the request multipart.
    File(FileUpload),
}

/// Ordered request arguments.
#[derive(Debug, Default)]
pub struct RequestArguments {
    entries: Vec<(String, Argument)>,
}

impl RequestArguments {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.put(key.into(), Argument::Value(value.into()));
    }

    /// Set a value field only when `value` is present.
    pub fn insert_opt<V: Into<Value>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Set a binary upload field.
    pub fn insert_file(&mut self, key: impl Into<String>, upload: FileUpload) {
        self.put(key.into(), Argument::File(upload));
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Merge caller-supplied fields. Colliding keys take the caller's value.
    pub fn extend_fields(&mut self, fields: &AdditionalFields) {
        for (k, v) in fields.iter() {
            self.insert(k, v.clone());
        }
    }

    fn put(&mut self, key: String, argument: Argument) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = argument,
            None => self.entries.push((key, argument)),
        }
    }

    /// Look up an argument.
    pub fn get(&self, key: &str) -> Option<&Argument> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, a)| a)
    }

    /// Look up a value argument.
    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.get(key) {
            Some(Argument::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.entries.iter().map(|(k, a)| (k.as_str(), a))
    }

    /// Whether any argument is a binary upload.
    pub fn has_files(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, a)| matches!(a, Argument::File(_)))
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The JSON object sent for non-file requests.
    pub(crate) fn to_json(&self) -> Value {
        let map = self
            .entries
            .iter()
            .filter_map(|(k, a)| match a {
                Argument::Value(v) => Some((k.clone(), v.clone())),
                Argument::File(_) => None,
            })
            .collect();
        Value::Object(map)
    }

    /// The multipart form sent for file requests.
    pub(crate) fn into_form(self) -> Result<Form> {
        let mut form = Form::new();
        for (key, argument) in self.entries {
            form = match argument {
                Argument::File(upload) => form.part(key, upload.into_part()?),
                Argument::Value(value) => match form_text(&value) {
                    Some(text) => form.text(key, text),
                    None => form,
                },
            };
        }
        Ok(form)
    }
}

/// Text form of a multipart field; nulls are dropped.
fn form_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

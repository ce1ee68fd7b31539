use crate::handle::Handle;
use std::collections::BTreeMap;

/// A value of the [`Metadata`] mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl MetaValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetaValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self {
        MetaValue::Bool(b)
    }
}

impl From<i64> for MetaValue {
    fn from(i: i64) -> Self {
        MetaValue::Int(i)
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Str(String::from(s))
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Str(s)
    }
}

/// Descriptive key/value pairs about the resource behind a
/// [`Stream`](struct.Stream.html).
///
/// The mapping computed from a handle holds the keys:
/// * `stream_type`: the handle [`kind()`](handle/trait.Handle.html#tymethod.kind),
/// * `mode`: the handle access mode,
/// * `seekable`: whether the handle supports seeking,
/// * `uri`: the path of the resource, when it has one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, MetaValue>,
}

impl Metadata {
    pub(crate) fn from_handle(handle: &dyn Handle) -> Self {
        let mut metadata = Metadata::default();
        metadata.insert("stream_type", handle.kind());
        metadata.insert("mode", handle.mode());
        metadata.insert("seekable", handle.is_seekable());
        if let Some(uri) = handle.uri() {
            metadata.insert("uri", uri);
        }
        metadata
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    pub fn insert<K: Into<String>, V: Into<MetaValue>>(
        &mut self,
        key: K,
        value: V,
    ) -> Option<MetaValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// The `seekable` entry, `false` if missing.
    pub fn seekable(&self) -> bool {
        self.get("seekable")
            .and_then(MetaValue::as_bool)
            .unwrap_or(false)
    }

    pub fn mode(&self) -> Option<&str> {
        self.get("mode").and_then(MetaValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Extend<(String, MetaValue)> for Metadata {
    fn extend<I: IntoIterator<Item = (String, MetaValue)>>(&mut self, iter: I) {
        self.entries.extend(iter)
    }
}

impl FromIterator<(String, MetaValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, MetaValue)>>(iter: I) -> Self {
        Metadata {
            entries: iter.into_iter().collect(),
        }
    }
}

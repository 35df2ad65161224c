use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::OptionKind;

/// One clause of a query: a parameter plus the values it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOption {
    pub kind: OptionKind,
    #[serde(deserialize_with = "one_or_many")]
    pub values: Vec<String>,
    /// Values are emitted verbatim, without percent-encoding.
    #[serde(default)]
    pub raw: bool,
}

/// An ordered list of query options. Options sharing a kind are kept apart
/// here and only merged by [`QueryOptions::to_map`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryOptions(Vec<QueryOption>);

impl QueryOption {
    pub fn new<I, S>(kind: OptionKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            values: values.into_iter().map(Into::into).collect(),
            raw: false,
        }
    }

    pub fn raw<I, S>(kind: OptionKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            raw: true,
            ..Self::new(kind, values)
        }
    }

    /// Percent-encodes each value as a URL query component, with spaces as
    /// `%20`. Raw options are returned as-is.
    pub fn encode(&self) -> Vec<String> {
        if self.raw {
            return self.values.clone();
        }

        tracing::trace!(kind = %self.kind, count = self.values.len(), "encoding query option");
        self.values.iter().map(|v| encode_value(v)).collect()
    }
}

/// `urlencoding` keeps only the RFC 3986 unreserved set and writes space as
/// `%20`, so `+` never appears for a space.
pub fn encode_value(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

impl QueryOptions {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueryOption> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[QueryOption] {
        &self.0
    }

    /// Groups values by parameter name. Values are encoded only when `encode`
    /// is set and the option is not raw; same-kind options append in order.
    pub fn to_map(&self, encode: bool) -> BTreeMap<String, Vec<String>> {
        let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for option in &self.0 {
            let data = if encode && !option.raw {
                option.encode()
            } else {
                option.values.clone()
            };
            out.entry(option.kind.name().to_string())
                .or_default()
                .extend(data);
        }

        out
    }

    pub fn to_query_string(&self, encode: bool) -> String {
        crate::render::to_query_string(&self.to_map(encode))
    }

    pub(crate) fn push_option(&mut self, option: QueryOption) {
        self.0.push(option);
    }
}

impl From<Vec<QueryOption>> for QueryOptions {
    fn from(options: Vec<QueryOption>) -> Self {
        Self(options)
    }
}

impl FromIterator<QueryOption> for QueryOptions {
    fn from_iter<T: IntoIterator<Item = QueryOption>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for QueryOptions {
    type Item = QueryOption;
    type IntoIter = std::vec::IntoIter<QueryOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryOptions {
    type Item = &'a QueryOption;
    type IntoIter = std::slice::Iter<'a, QueryOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

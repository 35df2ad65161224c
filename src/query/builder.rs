use super::{OptionKind, QueryOption, QueryOptions};

/// A value payload for one query option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Many(Vec<String>),
    Absent,
}

/// One element of the flat `kind, value, kind, value, ...` argument list
/// accepted by [`QueryOptions::from_pairs`] and [`query_options!`].
///
/// [`query_options!`]: crate::query_options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairArg {
    Kind(OptionKind),
    Value(QueryValue),
}

impl QueryValue {
    fn into_values(self) -> Option<Vec<String>> {
        match self {
            Self::Single(value) => Some(vec![value]),
            Self::Many(values) => Some(values),
            Self::Absent => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for QueryValue {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for QueryValue {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl From<OptionKind> for PairArg {
    fn from(kind: OptionKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<QueryValue> for PairArg {
    fn from(value: QueryValue) -> Self {
        Self::Value(value)
    }
}

macro_rules! pair_arg_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for PairArg {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

pair_arg_from_value!(&str, String, &String, Vec<String>, Vec<&str>, &[&str]);

impl<const N: usize> From<[&str; N]> for PairArg {
    fn from(values: [&str; N]) -> Self {
        Self::Value(values.into())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for PairArg {
    fn from(value: Option<T>) -> Self {
        Self::Value(value.into())
    }
}

/// Builds [`QueryOptions`] from alternating kinds and values.
///
/// ```
/// use odata_query::{query_options, OptionKind};
///
/// let opts = query_options!(OptionKind::Expand, ["foo", "bar"], OptionKind::Select, "bar");
/// assert_eq!(opts.len(), 2);
/// ```
#[macro_export]
macro_rules! query_options {
    ($($arg:expr),* $(,)?) => {
        $crate::QueryOptions::from_pairs(::std::vec![$($crate::PairArg::from($arg)),*])
    };
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `args` two at a time as `(kind, value)`. Pairs with an absent
    /// value or a misplaced element are skipped, as is a trailing odd element.
    /// Options produced here are never raw.
    pub fn from_pairs<I>(args: I) -> Self
    where
        I: IntoIterator<Item = PairArg>,
    {
        let args: Vec<PairArg> = args.into_iter().collect();
        let mut out = Self::new();
        if args.len() < 2 {
            return out;
        }

        let mut iter = args.into_iter();
        let mut index = 0usize;
        while let (Some(kind), Some(value)) = (iter.next(), iter.next()) {
            match (kind, value) {
                (PairArg::Kind(kind), PairArg::Value(value)) => match value.into_values() {
                    Some(values) => out.push_option(QueryOption::new(kind, values)),
                    None => tracing::debug!(pair = index, %kind, "skipping query option with absent value"),
                },
                (kind, value) => {
                    tracing::debug!(pair = index, ?kind, ?value, "skipping malformed query option pair")
                }
            }
            index += 1;
        }

        out
    }

    pub fn insert(self, kind: OptionKind, value: impl Into<QueryValue>) -> Self {
        self.insert_with(kind, value.into(), false)
    }

    /// Adds an option whose values bypass percent-encoding.
    pub fn raw(self, kind: OptionKind, value: impl Into<QueryValue>) -> Self {
        self.insert_with(kind, value.into(), true)
    }

    pub fn expand(self, value: impl Into<QueryValue>) -> Self {
        self.insert(OptionKind::Expand, value)
    }

    pub fn filter(self, value: impl Into<QueryValue>) -> Self {
        self.insert(OptionKind::Filter, value)
    }

    pub fn select(self, value: impl Into<QueryValue>) -> Self {
        self.insert(OptionKind::Select, value)
    }

    pub fn optional<T>(self, kind: OptionKind, value: Option<T>) -> Self
    where
        T: Into<QueryValue>,
    {
        match value {
            Some(value) => self.insert(kind, value),
            None => self,
        }
    }

    pub fn push(mut self, option: QueryOption) -> Self {
        self.push_option(option);
        self
    }

    pub fn build(self) -> Option<QueryOptions> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    pub fn build_always(self) -> QueryOptions {
        self
    }

    fn insert_with(mut self, kind: OptionKind, value: QueryValue, raw: bool) -> Self {
        match value.into_values() {
            Some(values) => {
                let mut option = QueryOption::new(kind, values);
                option.raw = raw;
                self.push_option(option);
            }
            None => tracing::debug!(%kind, "skipping query option with absent value"),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{PairArg, QueryValue};
    use crate::query::{OptionKind, QueryOption, QueryOptions};

    #[test]
    fn too_few_arguments_yield_empty_set() {
        assert!(query_options!().is_empty());
        assert!(query_options!(OptionKind::Expand).is_empty());
        assert!(QueryOptions::from_pairs(Vec::<PairArg>::new()).is_empty());
    }

    #[test]
    fn builds_options_in_order() {
        let opts = query_options!(OptionKind::Expand, "foo", OptionKind::Select, "bar");
        assert_eq!(
            opts.as_slice(),
            &[
                QueryOption::new(OptionKind::Expand, ["foo"]),
                QueryOption::new(OptionKind::Select, ["bar"]),
            ]
        );
        assert!(opts.iter().all(|o| !o.raw));
    }

    #[test]
    fn skips_absent_values() {
        let opts = query_options!(OptionKind::Filter, None::<&str>, OptionKind::Select, "bar");
        assert_eq!(opts.as_slice(), &[QueryOption::new(OptionKind::Select, ["bar"])]);
    }

    #[test]
    fn accepts_value_lists() {
        let opts = query_options!(OptionKind::Expand, vec!["foo", "bar"]);
        assert_eq!(opts.as_slice(), &[QueryOption::new(OptionKind::Expand, ["foo", "bar"])]);
    }

    #[test]
    fn skips_misplaced_elements_and_trailing_odd() {
        let opts = QueryOptions::from_pairs(vec![
            PairArg::from("stray"),
            PairArg::from("value"),
            PairArg::from(OptionKind::Filter),
            PairArg::from(OptionKind::Select),
            PairArg::from(OptionKind::Expand),
            PairArg::from(QueryValue::Many(vec![])),
            PairArg::from(OptionKind::Select),
        ]);
        assert_eq!(opts.as_slice(), &[QueryOption::new(OptionKind::Expand, Vec::<String>::new())]);
    }

    #[test]
    fn end_to_end_mapping() {
        let map = query_options!(OptionKind::Expand, ["foo", "bar"], OptionKind::Select, "bar")
            .to_map(true);

        let expected = BTreeMap::from([
            ("$expand".to_string(), vec!["foo".to_string(), "bar".to_string()]),
            ("$select".to_string(), vec!["bar".to_string()]),
        ]);
        assert_eq!(map, expected);
    }

    #[test]
    fn chained_builder_matches_pairs() {
        let chained = QueryOptions::new()
            .expand(["foo", "bar"])
            .optional(OptionKind::Filter, None::<String>)
            .select("bar")
            .build_always();
        let paired = query_options!(OptionKind::Expand, ["foo", "bar"], OptionKind::Select, "bar");
        assert_eq!(chained, paired);
    }

    #[test]
    fn raw_builder_marks_option_raw() {
        let opts = QueryOptions::new()
            .raw(OptionKind::Filter, "Name eq 'a%20b'")
            .filter("x y")
            .build_always();
        assert_eq!(opts.to_map(true)["$filter"], vec!["Name eq 'a%20b'", "x%20y"]);
    }

    #[test]
    fn build_returns_none_when_empty() {
        assert!(QueryOptions::new().optional(OptionKind::Select, None::<&str>).build().is_none());
        assert!(QueryOptions::new().select("a").build().is_some());
    }
}

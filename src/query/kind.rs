use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The OData system query options this crate knows how to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKind {
    #[serde(rename = "$expand", alias = "expand")]
    Expand,
    #[serde(rename = "$filter", alias = "filter")]
    Filter,
    #[serde(rename = "$select", alias = "select")]
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KindError {
    #[error("unknown query option ordinal {0}")]
    UnknownOrdinal(i64),
    #[error("unknown query option `{0}`")]
    UnknownName(String),
}

impl OptionKind {
    pub const ALL: [OptionKind; 3] = [Self::Expand, Self::Filter, Self::Select];

    /// The `$`-prefixed parameter name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Expand => "$expand",
            Self::Filter => "$filter",
            Self::Select => "$select",
        }
    }

    pub fn ordinal(self) -> i64 {
        match self {
            Self::Expand => 0,
            Self::Filter => 1,
            Self::Select => 2,
        }
    }
}

/// Renders the parameter name for a raw ordinal.
///
/// Ordinals outside the known range produce a placeholder rather than an
/// error, so this is safe to call from logging and display paths.
pub fn kind_name(ordinal: i64) -> Cow<'static, str> {
    match OptionKind::try_from(ordinal) {
        Ok(kind) => Cow::Borrowed(kind.name()),
        Err(_) => Cow::Owned(format!("?Unknown Type?: {ordinal}")),
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i64> for OptionKind {
    type Error = KindError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Expand),
            1 => Ok(Self::Filter),
            2 => Ok(Self::Select),
            other => Err(KindError::UnknownOrdinal(other)),
        }
    }
}

impl FromStr for OptionKind {
    type Err = KindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('$').to_ascii_lowercase();
        match normalized.as_str() {
            "expand" => Ok(Self::Expand),
            "filter" => Ok(Self::Filter),
            "select" => Ok(Self::Select),
            _ => Err(KindError::UnknownName(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{kind_name, KindError, OptionKind};

    #[test]
    fn renders_canonical_names() {
        assert_eq!(OptionKind::Expand.to_string(), "$expand");
        assert_eq!(OptionKind::Filter.to_string(), "$filter");
        assert_eq!(OptionKind::Select.to_string(), "$select");
    }

    #[test]
    fn unknown_ordinal_renders_placeholder() {
        assert_eq!(kind_name(1), "$filter");
        assert_eq!(kind_name(7), "?Unknown Type?: 7");
        assert!(kind_name(-3).contains("-3"));
    }

    #[test]
    fn ordinals_round_trip() {
        for kind in OptionKind::ALL {
            assert_eq!(OptionKind::try_from(kind.ordinal()), Ok(kind));
            assert_eq!(kind_name(kind.ordinal()), kind.name());
        }
        assert_eq!(OptionKind::try_from(3), Err(KindError::UnknownOrdinal(3)));
    }

    #[test]
    fn parses_names_leniently() {
        assert_eq!("$select".parse::<OptionKind>(), Ok(OptionKind::Select));
        assert_eq!("select".parse::<OptionKind>(), Ok(OptionKind::Select));
        assert_eq!("SELECT".parse::<OptionKind>(), Ok(OptionKind::Select));
        assert!(matches!(
            "$orderby".parse::<OptionKind>(),
            Err(KindError::UnknownName(name)) if name == "$orderby"
        ));
    }

    #[test]
    fn serializes_as_parameter_name() {
        assert_eq!(serde_json::to_string(&OptionKind::Filter).unwrap(), "\"$filter\"");
        let kind: OptionKind = serde_json::from_str("\"expand\"").unwrap();
        assert_eq!(kind, OptionKind::Expand);
    }
}

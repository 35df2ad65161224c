use std::collections::BTreeMap;

/// Joins a parameter map into `name=value&name=value`.
///
/// Names and values are written as they appear in the map; encoding is
/// expected to have happened already (see [`QueryOptions::to_map`]).
///
/// [`QueryOptions::to_map`]: crate::QueryOptions::to_map
pub fn to_query_string(params: &BTreeMap<String, Vec<String>>) -> String {
    params
        .iter()
        .flat_map(|(name, values)| values.iter().map(move |v| format!("{name}={v}")))
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends a query string to `path`, adding `?` only when there is something
/// to append.
pub fn with_query(path: &str, params: &BTreeMap<String, Vec<String>>) -> String {
    let mut out = path.to_string();
    let query = to_query_string(params);
    if !query.is_empty() {
        out.push(if path.contains('?') { '&' } else { '?' });
        out.push_str(&query);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{to_query_string, with_query};
    use crate::{query_options, OptionKind, QueryOptions};

    #[test]
    fn joins_repeated_names() {
        let opts = query_options!(OptionKind::Expand, ["foo", "bar"], OptionKind::Select, "bar");
        assert_eq!(
            opts.to_query_string(true),
            "$expand=foo&$expand=bar&$select=bar"
        );
    }

    #[test]
    fn empty_map_renders_empty_string() {
        assert_eq!(to_query_string(&BTreeMap::new()), "");
        assert_eq!(with_query("/People", &BTreeMap::new()), "/People");
    }

    #[test]
    fn appends_to_path() {
        let map = QueryOptions::new()
            .filter("Name eq 'a b'")
            .build_always()
            .to_map(true);
        assert_eq!(
            with_query("/People", &map),
            "/People?$filter=Name%20eq%20%27a%20b%27"
        );
        assert_eq!(
            with_query("/People?$top=2", &map),
            "/People?$top=2&$filter=Name%20eq%20%27a%20b%27"
        );
    }
}

//! Optional query filters.

use std::collections::BTreeMap;

/// Query parameters sent with a request. Order carries no meaning.
pub type QueryMap = BTreeMap<String, String>;

/// Keep only the filters the caller actually supplied.
///
/// A `None` or empty value drops the key entirely; it is never sent as an
/// empty string. Returns `None` when nothing is left so the request carries
/// no query string at all.
pub fn build_query<'a, I>(filters: I) -> Option<QueryMap>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let query: QueryMap = filters
        .into_iter()
        .filter_map(|(key, value)| match value {
            Some(value) if !value.is_empty() => Some((key.to_string(), value.to_string())),
            _ => None,
        })
        .collect();

    (!query.is_empty()).then_some(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filters_yields_none() {
        assert_eq!(build_query([("group", None), ("schema", None)]), None);
    }

    #[test]
    fn empty_values_are_dropped() {
        assert_eq!(build_query([("group", Some("")), ("schema", None)]), None);
    }

    #[test]
    fn supplied_filters_are_kept() {
        let query = build_query([("group", Some("g1")), ("schema", Some("s1"))]).unwrap();
        assert_eq!(query.len(), 2);
        assert_eq!(query["group"], "g1");
        assert_eq!(query["schema"], "s1");
    }

    #[test]
    fn only_present_keys_appear() {
        let query = build_query([("expiration", Some("1h")), ("authorization", None)]).unwrap();
        assert_eq!(query.len(), 1);
        assert!(!query.contains_key("authorization"));
    }
}

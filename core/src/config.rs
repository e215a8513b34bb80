//! Helpers for reading configuration from environment variables.
//!
//! Every config struct in the workspace has a `from_env()` constructor that
//! delegates to `from_lookup(env_lookup)`. Tests call `from_lookup` with a
//! closure over a map instead of mutating the process environment.

use std::str::FromStr;

/// Read a variable from the process environment.
#[must_use]
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Value of `key`, or `default` when unset.
pub fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Parsed value of `key`, or `default` when unset or unparsable.
pub fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Comma separated list under `key`, trimmed, empty entries dropped.
pub fn list_or<F>(lookup: &F, key: &str, default: &[&str]) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or_else(
        || default.iter().map(ToString::to_string).collect(),
        |raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        let lookup = lookup_from(&[]);
        assert_eq!(string_or(&lookup, "HOST", "0.0.0.0"), "0.0.0.0");
        assert_eq!(parse_or(&lookup, "PORT", 8080_u16), 8080);
        assert_eq!(list_or(&lookup, "PHONES", &["a", "b"]), vec!["a", "b"]);
    }

    #[test]
    fn unparsable_values_use_default() {
        let lookup = lookup_from(&[("PORT", "not-a-port")]);
        assert_eq!(parse_or(&lookup, "PORT", 8080_u16), 8080);
    }

    #[test]
    fn reads_values() {
        let lookup = lookup_from(&[("PORT", " 9000 "), ("PHONES", "(555) 555-1234, ,(555) 523-1345")]);
        assert_eq!(parse_or(&lookup, "PORT", 8080_u16), 9000);
        assert_eq!(
            list_or(&lookup, "PHONES", &[]),
            vec!["(555) 555-1234", "(555) 523-1345"]
        );
    }
}

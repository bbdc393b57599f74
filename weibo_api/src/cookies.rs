//! Parsing of `Cookie:`-style header strings.

/// Attribute names that may appear in a pasted `Set-Cookie` line and are not
/// cookies themselves.
const RESERVED: &[&str] = &[
    "path", "domain", "expires", "max-age", "secure", "httponly", "samesite", "version",
    "comment",
];

/// Splits `name=value; name2=value2` into pairs, in input order.
///
/// Empty segments, segments without `=`, empty names and cookie attributes
/// (`Path`, `Domain`, ...) are skipped. Values wrapped in double quotes are
/// unquoted.
pub fn parse_cookie_header(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|segment| {
            let (name, value) = segment.split_once('=')?;
            let name = name.trim();
            if name.is_empty() || RESERVED.contains(&name.to_ascii_lowercase().as_str()) {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

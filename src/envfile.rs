// `.env` file codec: `KEY=VALUE` lines, `#` comments, one optional layer
// of matching quotes around values.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Parse `.env` contents into a key/value map.
///
/// Blank lines and `#` comments are skipped. Each remaining line must
/// contain `=`; the first one splits key from value. Keys and values are
/// trimmed, and a value fully wrapped in one pair of matching single or
/// double quotes is unwrapped once. The last occurrence of a duplicate
/// key wins.
pub fn parse(contents: &str) -> Result<BTreeMap<String, String>> {
    let mut variables = BTreeMap::new();

    for (index, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            bail!("invalid format on line {}: {}", index + 1, line);
        };

        let key = key.trim().to_string();
        let value = unquote(value.trim());

        variables.insert(key, value.to_string());
    }

    Ok(variables)
}

/// Strip exactly one layer of fully-wrapping matching quotes.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        let first = bytes[0];
        let last = bytes[value.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

pub fn parse_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to open .env file {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse file '{}'", path.display()))
}

/// Render a variable map as `.env` contents: `KEY=VALUE` per line, keys
/// sorted ascending, values written verbatim.
pub fn render(variables: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in variables {
        let _ = writeln!(out, "{}={}", key, value);
    }
    out
}

pub fn write_file(path: &Path, variables: &BTreeMap<String, String>) -> Result<()> {
    fs::write(path, render(variables))
        .with_context(|| format!("failed to write .env file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_lines() {
        let vars = parse("FOO=bar\nBAZ=qux\n").unwrap();
        assert_eq!(vars.get("FOO").unwrap(), "bar");
        assert_eq!(vars.get("BAZ").unwrap(), "qux");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let vars = parse("A=1\n# comment\n\nB=\"two words\"\n").unwrap();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("A").unwrap(), "1");
        assert_eq!(vars.get("B").unwrap(), "two words");
    }

    #[test]
    fn trims_whitespace_around_key_and_value() {
        let vars = parse("  KEY  =  value  \n").unwrap();
        assert_eq!(vars.get("KEY").unwrap(), "value");
    }

    #[test]
    fn strips_one_layer_of_matching_quotes() {
        let vars = parse("A='single'\nB=\"double\"\nC=\"'nested'\"\n").unwrap();
        assert_eq!(vars.get("A").unwrap(), "single");
        assert_eq!(vars.get("B").unwrap(), "double");
        assert_eq!(vars.get("C").unwrap(), "'nested'");
    }

    #[test]
    fn mismatched_quotes_are_kept() {
        let vars = parse("A=\"mismatch'\nB=\"\n").unwrap();
        assert_eq!(vars.get("A").unwrap(), "\"mismatch'");
        assert_eq!(vars.get("B").unwrap(), "\"");
    }

    #[test]
    fn empty_value_is_allowed() {
        let vars = parse("EMPTY=\n").unwrap();
        assert_eq!(vars.get("EMPTY").unwrap(), "");
    }

    #[test]
    fn value_may_contain_equals() {
        let vars = parse("URL=postgres://u:p@host/db?sslmode=disable\n").unwrap();
        assert_eq!(
            vars.get("URL").unwrap(),
            "postgres://u:p@host/db?sslmode=disable"
        );
    }

    #[test]
    fn last_duplicate_wins() {
        let vars = parse("K=first\nK=second\n").unwrap();
        assert_eq!(vars.get("K").unwrap(), "second");
    }

    #[test]
    fn line_without_equals_fails_with_line_number() {
        let err = parse("A=1\nnot a variable\n").unwrap_err();
        assert_eq!(err.to_string(), "invalid format on line 2: not a variable");
    }

    #[test]
    fn render_sorts_keys() {
        let mut vars = BTreeMap::new();
        vars.insert("ZED".to_string(), "26".to_string());
        vars.insert("ALPHA".to_string(), "1".to_string());
        assert_eq!(render(&vars), "ALPHA=1\nZED=26\n");
    }

    #[test]
    fn parse_render_parse_is_stable() {
        let original = parse("B='two words'\nA=1\n# note\n").unwrap();
        let reparsed = parse(&render(&original)).unwrap();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");

        let mut vars = BTreeMap::new();
        vars.insert("DATABASE_URL".to_string(), "postgres://localhost".to_string());
        vars.insert("API_KEY".to_string(), "secret".to_string());
        write_file(&path, &vars).unwrap();

        assert_eq!(parse_file(&path).unwrap(), vars);
    }
}

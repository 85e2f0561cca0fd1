//! Message catalogs for the chat demo.
//!
//! Catalogs are flat key/value JSON documents embedded at compile time.
//! [`Catalog::for_language`] builds one immutable dictionary at startup
//! (English as the base, overlaid with the selected language) and the
//! caller passes it by reference to whatever needs it. There is no
//! global cache.

use std::collections::HashMap;

/// English base catalog.
const EN: &str = include_str!("../i18n/en.json");
/// Portuguese overlay.
const PT: &str = include_str!("../i18n/pt.json");

/// One immutable message dictionary.
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// Build the catalog for a language code.
    ///
    /// Unknown codes fall back to plain English.
    pub fn for_language(code: &str) -> Self {
        let mut messages = parse(EN);
        if code.eq_ignore_ascii_case("pt") {
            messages.extend(parse(PT));
        }
        Self { messages }
    }

    /// Raw message for `key`, or `!key!` when missing.
    pub fn get(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("!{key}!"))
    }

    /// Message for `key` with `{0}`, `{1}`, … placeholders replaced.
    pub fn format(&self, key: &str, args: &[&str]) -> String {
        apply(&self.get(key), args)
    }
}

/// Replace `{0}`, `{1}`, … placeholders in `template` with `args`.
pub fn apply(template: &str, args: &[&str]) -> String {
    let mut out = template.to_owned();
    for (index, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{index}}}"), arg);
    }
    out
}

fn parse(source: &str) -> HashMap<String, String> {
    serde_json::from_str(source).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_catalog_is_populated() {
        let catalog = Catalog::for_language("en");
        assert_eq!(catalog.get("whoami"), "you are node {0}");
    }

    #[test]
    fn test_portuguese_overlays_english() {
        let catalog = Catalog::for_language("pt");
        assert_eq!(catalog.get("goodbye"), "tchau");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let catalog = Catalog::for_language("xx");
        assert_eq!(catalog.get("goodbye"), "bye");
    }

    #[test]
    fn test_missing_key_is_marked() {
        let catalog = Catalog::for_language("en");
        assert_eq!(catalog.get("no-such-key"), "!no-such-key!");
    }

    #[test]
    fn test_placeholder_formatting() {
        let catalog = Catalog::for_language("en");
        assert_eq!(catalog.format("whoami", &["4"]), "you are node 4");
        assert_eq!(
            catalog.format("recv", &["2", "hello there"]),
            "[recv] from 2: hello there"
        );
    }

    #[test]
    fn test_apply_ignores_unused_args() {
        assert_eq!(apply("fixed text", &["a", "b"]), "fixed text");
    }
}

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::core::format_number;

/// Ordered attribute map for one markup element.
///
/// Insertion order is kept so identical render calls serialize to identical
/// bytes. Values are written verbatim apart from XML escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: IndexMap<&'static str, String>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing an earlier value but keeping its position.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.entries.insert(name, value.into());
        self
    }

    #[must_use]
    pub fn with_number(self, name: &'static str, value: f64) -> Self {
        self.with(name, format_number(value))
    }

    pub(crate) fn write_into(&self, out: &mut String) {
        for (name, value) in &self.entries {
            let _ = write!(out, " {name}=\"{}\"", escape_xml(value));
        }
    }
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{Attributes, escape_xml};

    #[test]
    fn attributes_serialize_in_insertion_order() {
        let attrs = Attributes::new()
            .with("fill", "#fff")
            .with_number("x", 12.0)
            .with("fill", "#000");
        let mut out = String::new();
        attrs.write_into(&mut out);
        assert_eq!(out, r##" fill="#000" x="12""##);
    }

    #[test]
    fn escaping_covers_markup_characters() {
        assert_eq!(
            escape_xml(r#"<a & "b" 'c'>"#),
            "&lt;a &amp; &quot;b&quot; &apos;c&apos;&gt;"
        );
    }
}

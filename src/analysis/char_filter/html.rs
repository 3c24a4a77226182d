//! HTML entity decoding and tag stripping for search-result snippets.

use std::sync::Arc;

use regex::{Captures, Regex};

use crate::analysis::char_filter::CharFilter;
use crate::error::{FalseFriendsError, Result};

/// Named entities that show up in result titles and bodies.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("laquo", '«'),
    ("raquo", '»'),
    ("ndash", '–'),
    ("mdash", '—'),
    ("hellip", '…'),
    ("bull", '•'),
    ("middot", '·'),
    ("copy", '©'),
    ("reg", '®'),
];

/// Decodes HTML entities, then replaces every `<...>` tag with a space.
///
/// Unknown named entities and invalid code points are left untouched.
#[derive(Clone, Debug)]
pub struct HtmlCharFilter {
    entities: Arc<Regex>,
    tags: Arc<Regex>,
}

impl HtmlCharFilter {
    pub fn new() -> Result<Self> {
        let entities = Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9a-fA-F]+)|([A-Za-z]+));")
            .map_err(|e| FalseFriendsError::analysis(format!("Invalid regex pattern: {e}")))?;
        let tags = Regex::new(r"<.*?>")
            .map_err(|e| FalseFriendsError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(HtmlCharFilter {
            entities: Arc::new(entities),
            tags: Arc::new(tags),
        })
    }

    fn decode_entity(caps: &Captures<'_>) -> Option<char> {
        if let Some(dec) = caps.get(1) {
            return dec.as_str().parse::<u32>().ok().and_then(char::from_u32);
        }
        if let Some(hex) = caps.get(2) {
            return u32::from_str_radix(hex.as_str(), 16)
                .ok()
                .and_then(char::from_u32);
        }
        let name = caps.get(3)?.as_str();
        NAMED_ENTITIES
            .iter()
            .find(|(entity, _)| *entity == name)
            .map(|(_, c)| *c)
    }

    /// Decode entities only.
    pub fn unescape(&self, input: &str) -> String {
        self.entities
            .replace_all(input, |caps: &Captures<'_>| match Self::decode_entity(caps) {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

impl CharFilter for HtmlCharFilter {
    fn filter(&self, input: &str) -> Result<String> {
        let decoded = self.unescape(input);
        Ok(self.tags.replace_all(&decoded, " ").into_owned())
    }

    fn name(&self) -> &'static str {
        "html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_and_numeric_entities() {
        let filter = HtmlCharFilter::new().unwrap();
        assert_eq!(filter.unescape("бира &amp; вино"), "бира & вино");
        assert_eq!(filter.unescape("&#1073;&#x430;р"), "бар");
        assert_eq!(filter.unescape("&laquo;вода&raquo;"), "«вода»");
    }

    #[test]
    fn test_unknown_entity_untouched() {
        let filter = HtmlCharFilter::new().unwrap();
        assert_eq!(filter.unescape("a &bogus; b"), "a &bogus; b");
    }

    #[test]
    fn test_tags_become_spaces() {
        let filter = HtmlCharFilter::new().unwrap();
        assert_eq!(
            filter.filter("<b>студена</b>бира").unwrap(),
            " студена бира"
        );
    }

    #[test]
    fn test_escaped_tags_are_stripped_after_decoding() {
        let filter = HtmlCharFilter::new().unwrap();
        assert_eq!(filter.filter("&lt;em&gt;вода").unwrap(), " вода");
    }
}

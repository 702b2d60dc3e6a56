//! Bot text templates with named `{placeholder}` slots.
//!
//! `{{` and `}}` produce literal braces. A `{` without a closing `}` is kept
//! verbatim. Anything after `:` or `!` inside a slot (a format spec or
//! conversion) is ignored, only the name is looked up.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Result of rendering a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Text(String),
    /// First placeholder (in template order) that has no recorded value
    Missing { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            match ch {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '{' => match source[idx + 1..].find('}') {
                    Some(len) => {
                        let inner = &source[idx + 1..idx + 1 + len];
                        let name = inner.split([':', '!']).next().unwrap_or_default();
                        if !literal.is_empty() {
                            segments.push(Segment::Literal(std::mem::take(&mut literal)));
                        }
                        segments.push(Segment::Placeholder(name.to_string()));
                        // skip past the closing brace
                        for (pos, _) in chars.by_ref() {
                            if pos == idx + 1 + len {
                                break;
                            }
                        }
                    }
                    None => literal.push('{'),
                },
                _ => literal.push(ch),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Placeholder names in template order, duplicates included
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn render(&self, values: &HashMap<String, String>) -> Rendered {
        if let Some(name) = self.placeholders().find(|name| !values.contains_key(*name)) {
            return Rendered::Missing {
                name: name.to_string(),
            };
        }

        let mut text = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => text.push_str(literal),
                Segment::Placeholder(name) => {
                    if let Some(value) = values.get(name) {
                        text.push_str(value);
                    }
                }
            }
        }
        Rendered::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_text() {
        let template = Template::parse("Hi");

        assert_eq!(template.placeholders().count(), 0);
        assert_eq!(template.render(&HashMap::new()), Rendered::Text("Hi".to_string()));
    }

    #[test]
    fn test_substitution() {
        let template = Template::parse("Hello {name}, you feel {mood}.");

        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["name", "mood"]);
        assert_eq!(
            template.render(&values(&[("name", "Bob"), ("mood", "calm")])),
            Rendered::Text("Hello Bob, you feel calm.".to_string())
        );
    }

    #[test]
    fn test_first_missing_placeholder_reported() {
        let template = Template::parse("{greeting} {name}");

        assert_eq!(
            template.render(&values(&[("name", "Bob")])),
            Rendered::Missing {
                name: "greeting".to_string()
            }
        );
    }

    #[test]
    fn test_escaped_braces() {
        let template = Template::parse("{{literal}} {name}");

        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(
            template.render(&values(&[("name", "x")])),
            Rendered::Text("{literal} x".to_string())
        );
    }

    #[test]
    fn test_unclosed_brace_is_literal() {
        let template = Template::parse("smile :{ ok");

        assert_eq!(
            template.render(&HashMap::new()),
            Rendered::Text("smile :{ ok".to_string())
        );
    }

    #[test]
    fn test_format_spec_ignored() {
        let template = Template::parse("{name:>10}!");

        assert_eq!(
            template.render(&values(&[("name", "Bob")])),
            Rendered::Text("Bob!".to_string())
        );
    }

    #[test]
    fn test_unicode_around_placeholders() {
        let template = Template::parse("héllo {name} ✓");

        assert_eq!(
            template.render(&values(&[("name", "Zoë")])),
            Rendered::Text("héllo Zoë ✓".to_string())
        );
    }
}

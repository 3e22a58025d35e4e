use regex::Captures;

// Replacement templates for complex-mode rules.
//
// Syntax: `$N` or `${N}` inserts capture group N, `$$` is a literal dollar.
// A `$` not followed by a digit, `{` or `$` is kept literally. Only positional
// references exist; `${name}` is rejected when the template is parsed.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Group(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((_, ch)) = chars.next() {
            if ch != '$' {
                literal.push(ch);
                continue;
            }

            match chars.peek().copied() {
                Some((_, '$')) => {
                    chars.next();
                    literal.push('$');
                }
                Some((_, '{')) => {
                    chars.next();
                    let mut reference = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        reference.push(inner);
                    }
                    if !closed {
                        return Err(format!("unterminated group reference '${{{reference}' in template {source:?}"));
                    }
                    let group = parse_group_number(&reference).ok_or_else(|| {
                        format!("group reference '${{{reference}}}' in template {source:?} is not a positional index")
                    })?;
                    flush_literal(&mut literal, &mut segments);
                    segments.push(Segment::Group(group));
                }
                Some((_, digit)) if digit.is_ascii_digit() => {
                    let mut reference = String::new();
                    while let Some((_, d)) = chars.peek().copied() {
                        if !d.is_ascii_digit() {
                            break;
                        }
                        reference.push(d);
                        chars.next();
                    }
                    let group = parse_group_number(&reference).ok_or_else(|| {
                        format!("group reference '${reference}' in template {source:?} is out of range")
                    })?;
                    flush_literal(&mut literal, &mut segments);
                    segments.push(Segment::Group(group));
                }
                _ => literal.push('$'),
            }
        }

        flush_literal(&mut literal, &mut segments);
        Ok(Self { segments })
    }

    /// Highest capture group the template refers to.
    pub fn max_group(&self) -> Option<usize> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Group(group) => Some(*group),
                Segment::Literal(_) => None,
            })
            .max()
    }

    /// Append the expansion for one match. Groups that did not take part in
    /// the match expand to nothing.
    pub fn expand_into(&self, caps: &Captures<'_>, dst: &mut String) {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => dst.push_str(text),
                Segment::Group(group) => {
                    if let Some(m) = caps.get(*group) {
                        dst.push_str(m.as_str());
                    }
                }
            }
        }
    }
}

fn parse_group_number(reference: &str) -> Option<usize> {
    if reference.is_empty() || !reference.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    reference.parse().ok()
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn expand(pattern: &str, template: &str, text: &str) -> String {
        let regex = Regex::new(pattern).unwrap();
        let caps = regex.captures(text).unwrap();
        let mut out = String::new();
        Template::parse(template).unwrap().expand_into(&caps, &mut out);
        out
    }

    #[test]
    fn test_positional_references() {
        assert_eq!(expand(r"(\d+)-(\d+)", "$2 to ${1}", "10-20"), "20 to 10");
    }

    #[test]
    fn test_unmatched_group_expands_to_empty() {
        assert_eq!(expand(r"a(x)?(b)", "[$1|$2]", "ab"), "[|b]");
    }

    #[test]
    fn test_dollar_escapes() {
        assert_eq!(expand("x", "$$5 and $ sign", "x"), "$5 and $ sign");
    }

    #[test]
    fn test_braced_reference_glued_to_text() {
        assert_eq!(expand(r"(\w+)", "${1}th", "four"), "fourth");
    }

    #[test]
    fn test_max_group() {
        assert_eq!(Template::parse("a$1b${3}").unwrap().max_group(), Some(3));
        assert_eq!(Template::parse("plain").unwrap().max_group(), None);
    }

    #[test]
    fn test_named_reference_rejected() {
        let err = Template::parse("${word}").unwrap_err();
        assert!(err.contains("not a positional index"));
    }

    #[test]
    fn test_unterminated_reference_rejected() {
        assert!(Template::parse("${1").is_err());
    }
}

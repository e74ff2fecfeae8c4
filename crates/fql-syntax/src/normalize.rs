//! Textual normalization applied before parsing: operator keywords are
//! lowercased regardless of client casing, and a literal following
//! `date <op> '` is tagged as `datetime'...'` so the grammar can tell it
//! apart from a plain string. Content inside quotes is never rewritten.

const KEYWORDS: [&str; 6] = ["eq", "ne", "lt", "gt", "and", "or"];
const COMPARATORS: [&str; 4] = ["eq", "ne", "lt", "gt"];

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Word(String),
    Ws(String),
    Quoted(String),
}

/// Normalize raw filter text. Idempotent; empty input passes through.
pub fn normalize(filter: &str) -> String {
    if filter.trim().is_empty() {
        return filter.to_string();
    }

    let segments: Vec<Segment> = segment(filter)
        .into_iter()
        .map(|seg| match seg {
            Segment::Word(w) if is_keyword(&w) => Segment::Word(w.to_ascii_lowercase()),
            other => other,
        })
        .collect();

    let mut out = String::with_capacity(filter.len() + 8);
    let mut idx = 0;
    while idx < segments.len() {
        if let Segment::Word(w) = &segments[idx] {
            if w.eq_ignore_ascii_case("date") {
                if let Some(quote_idx) = date_literal_ahead(&segments, idx) {
                    // Rewrite `date <op> '...'` as `date <op> datetime'...'`,
                    // folding the field word to lowercase like the rest of
                    // the substitution.
                    out.push_str("date");
                    for seg in &segments[idx + 1..quote_idx] {
                        push_segment(&mut out, seg);
                    }
                    out.push_str("datetime");
                    push_segment(&mut out, &segments[quote_idx]);
                    idx = quote_idx + 1;
                    continue;
                }
            }
        }
        push_segment(&mut out, &segments[idx]);
        idx += 1;
    }

    out
}

fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k))
}

/// Looks past `idx` for a comparison keyword followed by a quoted literal.
/// Returns the literal's segment index. An already-tagged literal never
/// matches because the `datetime` word sits between the operator and the
/// quote, which keeps `normalize` idempotent.
fn date_literal_ahead(segments: &[Segment], idx: usize) -> Option<usize> {
    let mut rest = segments[idx + 1..].iter().enumerate();

    let (_, op) = rest.find(|(_, seg)| !matches!(seg, Segment::Ws(_)))?;
    match op {
        Segment::Word(w) if COMPARATORS.iter().any(|c| w.eq_ignore_ascii_case(c)) => {}
        _ => return None,
    }

    let (offset, lit) = rest.find(|(_, seg)| !matches!(seg, Segment::Ws(_)))?;
    match lit {
        Segment::Quoted(_) => Some(idx + 1 + offset),
        _ => None,
    }
}

fn push_segment(out: &mut String, seg: &Segment) {
    match seg {
        Segment::Word(s) | Segment::Ws(s) | Segment::Quoted(s) => out.push_str(s),
    }
}

/// Split the filter into words, whitespace runs and quoted literals.
/// Parentheses are their own words so that `(date eq '...')` still exposes
/// the field token. An unterminated quote swallows the rest of the input
/// and is left for the parser to reject.
fn segment(input: &str) -> Vec<Segment> {
    let mut segs = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch == '\'' {
            let mut quoted = String::new();
            if let Some(c) = chars.next() {
                quoted.push(c);
            }
            for c in chars.by_ref() {
                quoted.push(c);
                if c == '\'' {
                    break;
                }
            }
            segs.push(Segment::Quoted(quoted));
        } else if ch.is_whitespace() {
            let mut ws = String::new();
            while let Some(&c) = chars.peek() {
                if !c.is_whitespace() {
                    break;
                }
                ws.push(c);
                chars.next();
            }
            segs.push(Segment::Ws(ws));
        } else if ch == '(' || ch == ')' {
            segs.push(Segment::Word(ch.to_string()));
            chars.next();
        } else {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == '\'' || c == '(' || c == ')' {
                    break;
                }
                word.push(c);
                chars.next();
            }
            segs.push(Segment::Word(word));
        }
    }

    segs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_lowercased() {
        assert_eq!(normalize("distance GT 20 AND duration LT 60"),
            "distance gt 20 and duration lt 60");
        assert_eq!(normalize("distance Eq 20 Or distance NE 5"),
            "distance eq 20 or distance ne 5");
    }

    #[test]
    fn test_date_literal_is_tagged() {
        assert_eq!(normalize("date eq '2016-05-01'"), "date eq datetime'2016-05-01'");
        assert_eq!(normalize("date gt '2016-05-01'"), "date gt datetime'2016-05-01'");
        assert_eq!(normalize("Date GT '2020-02-02'"), "date gt datetime'2020-02-02'");
    }

    #[test]
    fn test_date_tagging_inside_parentheses() {
        assert_eq!(
            normalize("(date eq '2016-05-01') and (distance gt 20)"),
            "(date eq datetime'2016-05-01') and (distance gt 20)"
        );
    }

    #[test]
    fn test_quoted_content_is_untouched() {
        assert_eq!(
            normalize("comment eq 'RAIN AND WIND OR date eq'"),
            "comment eq 'RAIN AND WIND OR date eq'"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "",
            "   ",
            "Date GT '2020-02-02'",
            "(date eq '2016-05-01') AND ((distance GT 20) OR (distance LT 10))",
            "comment eq 'AND OR eq'",
            "distance gt 20",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_empty_input_passes_through() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  "), "  ");
    }

    #[test]
    fn test_only_the_date_field_is_special_cased() {
        // Other datetime-kind fields must spell the tag themselves.
        assert_eq!(
            normalize("created gt '2020-01-01'"),
            "created gt '2020-01-01'"
        );
    }
}

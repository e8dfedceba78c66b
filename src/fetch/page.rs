//! Value page parsing.
//!
//! The page is scanned with plain string search: headings are `<p>` tags
//! carrying the `elementor-heading-title` class and a `Label: value` text,
//! the timestamp is the `datetime` attribute of the `entry-date` `<time>`.

use crate::market::MarketSnapshot;

const HEADING_CLASS: &str = "elementor-heading-title";
const DATE_CLASS: &str = "entry-date";

/// An element found in the page: raw attribute text and raw inner HTML.
#[derive(Debug, Clone, Copy)]
struct Element<'a> {
    attrs: &'a str,
    inner: &'a str,
}

impl<'a> Element<'a> {
    fn attr(&self, name: &str) -> Option<&'a str> {
        attr_value(self.attrs, name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
            .unwrap_or(false)
    }

    fn text(&self) -> String {
        normalize_ws(&normalize_entities(&strip_tags(self.inner)))
    }
}

/// Parse a value page into a snapshot for `creature_name`.
///
/// Fields that are not on the page are left empty.
pub fn parse_snapshot(creature_name: &str, html: &str) -> MarketSnapshot {
    let headings: Vec<String> = elements(html, "p")
        .into_iter()
        .filter(|el| el.has_class(HEADING_CLASS))
        .map(|el| el.text())
        .collect();

    let last_updated = elements(html, "time")
        .into_iter()
        .find(|el| el.has_class(DATE_CLASS))
        .and_then(|el| el.attr("datetime"))
        .map(|s| normalize_entities(s).trim().to_string());

    MarketSnapshot::builder(creature_name)
        .value(heading_field(&headings, "Value:"))
        .demand(heading_field(&headings, "Demand:"))
        .stability(heading_field(&headings, "Stability:"))
        .last_updated(last_updated)
        .build()
}

/// Text after the last `:` of the first heading containing `label`.
fn heading_field(headings: &[String], label: &str) -> Option<String> {
    headings
        .iter()
        .find(|text| text.contains(label))
        .and_then(|text| text.rsplit(':').next())
        .map(|s| s.trim().to_string())
}

/// All `<tag ...>...</tag>` elements, in document order.
///
/// Matching is ASCII case-insensitive. An element without a closing tag
/// gets empty inner HTML.
fn elements<'a>(html: &'a str, tag: &str) -> Vec<Element<'a>> {
    // ASCII lowering keeps byte offsets identical to `html`.
    let lc = html.to_ascii_lowercase();
    let open = format!("<{}", tag.to_ascii_lowercase());
    let close = format!("</{}", tag.to_ascii_lowercase());

    let mut out = Vec::new();
    let mut pos = 0;

    while let Some(rel) = lc[pos..].find(&open) {
        let start = pos + rel;
        let name_end = start + open.len();

        // Skip longer tag names sharing the prefix (<pre>, <path>, ...).
        let boundary = lc[name_end..].chars().next();
        if !matches!(boundary, Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/') {
            pos = name_end;
            continue;
        }

        let Some(open_end) = lc[name_end..].find('>').map(|i| name_end + i) else {
            break;
        };
        let attrs = html[name_end..open_end].trim_end_matches('/');
        let body_start = open_end + 1;

        let inner = match lc[body_start..].find(&close) {
            Some(i) => &html[body_start..body_start + i],
            None => "",
        };

        out.push(Element { attrs, inner });
        pos = body_start;
    }

    out
}

/// Value of attribute `name` in a raw attribute string.
fn attr_value<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let lc = attrs.to_ascii_lowercase();
    let name = name.to_ascii_lowercase();
    let mut pos = 0;

    while let Some(rel) = lc[pos..].find(&name) {
        let start = pos + rel;
        let end = start + name.len();
        pos = end;

        let preceded_ok = start == 0
            || lc[..start]
                .chars()
                .next_back()
                .map(|c| c.is_ascii_whitespace())
                .unwrap_or(true);
        if !preceded_ok {
            continue;
        }

        let rest = &attrs[end..];
        let after_name = rest.trim_start();
        let Some(after_eq) = after_name.strip_prefix('=') else {
            continue;
        };
        let value = after_eq.trim_start();

        return match value.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &value[1..];
                Some(body.find(q).map(|i| &body[..i]).unwrap_or(body))
            }
            Some(_) => {
                let stop = value
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(value.len());
                Some(&value[..stop])
            }
            None => Some(""),
        };
    }

    None
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&#8217;", "\u{2019}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
<html><head><title>Giga Rex Value</title></head>
<body>
<pre>Value: not a heading</pre>
<div class="elementor-widget-container">
  <p class="elementor-heading-title elementor-size-default">Value:   1,250&nbsp;</p>
</div>
<p class="other">Demand: 1/10</p>
<p class="elementor-heading-title">Demand: 7/10</p>
<P CLASS='elementor-heading-title'>Stability: <b>STABLE</b></P>
<time class="entry-date published" datetime="2024-06-01T10:15:00+00:00">June 1, 2024</time>
<time class="updated" datetime="2024-07-01T00:00:00+00:00">July 1, 2024</time>
</body></html>
"#;

    #[test]
    fn test_parse_full_page() {
        let snapshot = parse_snapshot("Giga Rex", PAGE);
        assert_eq!(snapshot.value(), Some("1,250"));
        assert_eq!(snapshot.demand(), Some("7/10"));
        assert_eq!(snapshot.stability(), Some("STABLE"));
        assert_eq!(snapshot.last_updated(), Some("2024-06-01T10:15:00+00:00"));
        assert!(snapshot.has_market_data());
    }

    #[test]
    fn test_parse_page_without_headings() {
        let snapshot = parse_snapshot("Nobody", "<html><body><p>Nothing here</p></body></html>");
        assert!(!snapshot.has_market_data());
        assert_eq!(snapshot.last_updated(), None);
    }

    #[test]
    fn test_parse_partial_page() {
        let html = r#"<p class="elementor-heading-title">Value: 300</p>"#;
        let snapshot = parse_snapshot("Partial", html);
        assert_eq!(snapshot.value(), Some("300"));
        assert_eq!(snapshot.demand_label(), "N/A");
        assert_eq!(snapshot.stability_label(), "N/A");
        assert_eq!(snapshot.last_updated_label(), "Unknown");
    }

    #[test]
    fn test_value_takes_text_after_last_colon() {
        let html = r#"<p class="elementor-heading-title">Trade Value: est: 40</p>"#;
        let snapshot = parse_snapshot("X", html);
        assert_eq!(snapshot.value(), Some("40"));
    }

    #[test]
    fn test_attr_value_variants() {
        assert_eq!(attr_value(r#" class="a b" id=x"#, "class"), Some("a b"));
        assert_eq!(attr_value(r#" data-class="no" class='yes'"#, "class"), Some("yes"));
        assert_eq!(attr_value(" id=plain other", "id"), Some("plain"));
        assert_eq!(attr_value(" CLASS = \"up\"", "class"), Some("up"));
        assert_eq!(attr_value(" hidden", "class"), None);
    }

    #[test]
    fn test_elements_skip_prefixed_tags() {
        let found = elements("<pre>a</pre><param x=1><p>b</p>", "p");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].inner, "b");
    }

    #[test]
    fn test_text_normalization() {
        let el = Element {
            attrs: "",
            inner: "  Stability:\n   <span>VERY&nbsp;UNSTABLE</span> ",
        };
        assert_eq!(el.text(), "Stability: VERY UNSTABLE");
    }
}

//! Language selection and HTML formatting of literal values.
use crate::term::Literal;
use regex::Regex;
use std::sync::LazyLock;

/// Characters allowed in a URL according to RFC 3986.
static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+").expect("valid link regex"));

/// Picks the literals to show for a language: the ones tagged with it, else the untagged ones,
/// else those of any other language. Each group is sorted.
pub fn select<'a, I>(literals: I, language: &str) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Literal>,
{
    let mut same_lang = Vec::new();
    let mut no_lang = Vec::new();
    let mut other_lang = Vec::new();
    for literal in literals {
        match literal.lang.as_deref() {
            Some(lang) if lang == language => same_lang.push(literal.value.as_str()),
            None | Some("") => no_lang.push(literal.value.as_str()),
            Some(_) => other_lang.push(literal.value.as_str()),
        }
    }
    let mut chosen = [same_lang, no_lang, other_lang].into_iter().find(|group| !group.is_empty()).unwrap_or_default();
    chosen.sort_unstable();
    chosen
}

/// HTML for the literals selected by [select]. Values are escaped and, unless `skip_links` is set,
/// URLs are turned into links.
pub fn format<'a, I>(literals: I, language: &str, skip_links: bool) -> Vec<String>
where
    I: IntoIterator<Item = &'a Literal>,
{
    select(literals, language).into_iter().map(|value| if skip_links { escape(value) } else { add_html_links(value) }).collect()
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    tinytemplate::escape(value, &mut out);
    out
}

/// Escapes `text` and replaces everything that looks like a URL with an HTML link.
pub fn add_html_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in LINK_REGEX.find_iter(text) {
        let mut url = m.as_str();
        // "(see http://example.com)": the closing parenthesis belongs to the text
        if url.ends_with(')') && text[..m.start()].ends_with('(') {
            url = &url[..url.len() - 1];
        }
        // a trailing dot most likely ends a sentence, URLs ending in "." are invalid anyway
        if let Some(stripped) = url.strip_suffix('.') {
            url = stripped;
        }
        out.push_str(&escape(&text[last..m.start()]));
        out.push_str(&make_link(url, &display_name(url)));
        last = m.start() + url.len();
    }
    out.push_str(&escape(&text[last..]));
    out
}

/// "https://example.com/files/annual_report-2020.pdf" is shown as "annual report 2020.pdf".
fn display_name(url: &str) -> String {
    let mut name = url;
    if url.matches('/').count() > 2 {
        if let Some((_, last)) = url.rsplit_once('/') {
            if !last.is_empty() {
                name = last;
            }
        }
    }
    percent_decode(name).replace(['_', '-'], " ")
}

fn make_link(url: &str, display_name: &str) -> String {
    format!(r#"<a href="{}" target="_blank">{}</a>"#, escape(url), escape(display_name))
}

/// Decodes %XX escapes, leaving malformed ones untouched.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() && bytes[i + 1].is_ascii_hexdigit() && bytes[i + 2].is_ascii_hexdigit() {
            let hex = [bytes[i + 1], bytes[i + 2]];
            if let Some(b) = std::str::from_utf8(&hex).ok().and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: &str, lang: Option<&str>) -> Literal {
        Literal { value: value.to_owned(), lang: lang.map(str::to_owned) }
    }

    #[test]
    fn prefers_requested_language() {
        let lits = [lit("Titel", Some("sv")), lit("Title", Some("en")), lit("Untagged", None)];
        assert_eq!(select(&lits, "en"), vec!["Title"]);
        assert_eq!(select(&lits, "sv"), vec!["Titel"]);
    }

    #[test]
    fn falls_back_to_untagged_then_other() {
        let lits = [lit("b", None), lit("a", None), lit("Titel", Some("sv"))];
        assert_eq!(select(&lits, "en"), vec!["a", "b"]);
        let lits = [lit("Titel", Some("sv")), lit("Otsikko", Some("fi"))];
        assert_eq!(select(&lits, "en"), vec!["Otsikko", "Titel"]);
        assert!(select(Vec::<&Literal>::new(), "en").is_empty());
    }

    #[test]
    fn links_urls() {
        let html = add_html_links("See http://example.com/data/my_file-v2.csv.");
        assert_eq!(html, r#"See <a href="http://example.com/data/my_file-v2.csv" target="_blank">my file v2.csv</a>."#);
    }

    #[test]
    fn drops_closing_parenthesis() {
        let html = add_html_links("docs (http://example.com)");
        assert_eq!(html, r#"docs (<a href="http://example.com" target="_blank">http://example.com</a>)"#);
    }

    #[test]
    fn decodes_display_name() {
        assert_eq!(display_name("http://example.com/a/G%C3%B6teborg_stad"), "Göteborg stad");
        assert_eq!(display_name("http://example.com/a/"), "http://example.com/a/");
        assert_eq!(percent_decode("100%"), "100%");
    }

    #[test]
    fn escapes_markup() {
        let lits = [lit("<b>x</b> http://example.com", None)];
        assert_eq!(format(&lits, "en", true), vec!["&lt;b&gt;x&lt;/b&gt; http://example.com".to_owned()]);
        assert!(format(&lits, "en", false)[0].starts_with("&lt;b&gt;x&lt;/b&gt; <a href="));
    }
}

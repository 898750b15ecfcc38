//! Resolve human readable names of predicates and types from their published vocabularies.
use crate::rdf::{parse_str, Syntax};
use crate::term::Node;
use std::collections::{HashMap, HashSet};

const LABEL_CANDIDATES: [&str; 1] = ["http://www.w3.org/2000/01/rdf-schema#label"];
const ACCEPT: &str = "text/turtle, application/n-triples;q=0.9, application/rdf+xml;q=0.8";

/// Downloads a vocabulary document, returning its body and content type.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<(String, String), String>;
}

pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher { agent: ureq::AgentBuilder::new().timeout(std::time::Duration::from_secs(10)).build() }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<(String, String), String> {
        let response = self.agent.get(url).set("Accept", ACCEPT).call().map_err(|e| e.to_string())?;
        let content_type = response.content_type().to_owned();
        let body = response.into_string().map_err(|e| e.to_string())?;
        Ok((body, content_type))
    }
}

/// Python's str.title(): first letter of every word upper case, the rest lower case.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

/// The document that defines an IRI: cut at the last '#', else at the last '/'.
fn document_url(iri: &str) -> &str {
    if let Some((doc, _)) = iri.rsplit_once('#') {
        doc
    } else if let Some((doc, _)) = iri.rsplit_once('/') {
        doc
    } else {
        iri
    }
}

/// Caches rdfs:label values per IRI and language. Each vocabulary document is downloaded at most once.
pub struct PredicateResolver {
    fetcher: Option<Box<dyn Fetch>>,
    /// iri -> language -> label
    resolved: HashMap<String, HashMap<String, String>>,
    parsed: HashSet<String>,
}

impl PredicateResolver {
    pub fn new(fetcher: Box<dyn Fetch>) -> Self {
        PredicateResolver { fetcher: Some(fetcher), resolved: HashMap::new(), parsed: HashSet::new() }
    }

    /// A resolver that never finds anything.
    pub fn disabled() -> Self {
        PredicateResolver { fetcher: None, resolved: HashMap::new(), parsed: HashSet::new() }
    }

    pub fn http() -> Self {
        Self::new(Box::new(HttpFetcher::new()))
    }

    fn from_cache(&self, iri: &str, language: &str) -> Option<String> {
        let labels = self.resolved.get(iri)?;
        labels.get(language).or_else(|| labels.get("en")).cloned()
    }

    /// Human readable label for an IRI in the given language, falling back to English.
    pub fn resolve(&mut self, iri: &str, language: &str) -> Option<String> {
        self.fetcher.as_ref()?;
        if let Some(label) = self.from_cache(iri, language) {
            return Some(label);
        }
        self.load(document_url(iri));
        self.from_cache(iri, language)
    }

    fn load(&mut self, url: &str) {
        if !self.parsed.insert(url.to_owned()) {
            return;
        }
        let Some(fetcher) = &self.fetcher else { return };
        let (body, content_type) = match fetcher.fetch(url) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Unable to download {url}: {e}. Skipping.");
                return;
            }
        };
        let triples = match parse_str(&body, Syntax::from_content_type(&content_type)) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Unable to parse vocabulary {url}: {e}. Skipping.");
                return;
            }
        };
        let mut count = 0;
        for [s, p, o] in triples {
            let (Node::Iri(s), Node::Iri(p), Node::Literal(label)) = (s, p, o) else { continue };
            if !LABEL_CANDIDATES.contains(&p.as_str()) {
                continue;
            }
            let language = label.lang.filter(|l| !l.is_empty()).unwrap_or_else(|| "en".to_owned());
            self.resolved.entry(s).or_default().insert(language, title_case(&label.value));
            count += 1;
        }
        log::debug!("{count} labels loaded from {url}");
    }
}

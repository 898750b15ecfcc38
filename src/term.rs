//! Owned RDF terms, detached from the parser that produced them.
use serde::Serialize;
use sophia::api::term::{Term, TermKind};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Literal {
    pub value: String,
    pub lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Node {
    Iri(String),
    /// Blank node label including the "_:" prefix.
    Blank(String),
    Literal(Literal),
}

impl Node {
    /// Converts any sophia term. Variables and quoted triples have no counterpart and yield `None`.
    pub fn from_term<T: Term>(term: T) -> Option<Node> {
        match term.kind() {
            TermKind::Iri => term.iri().map(|iri| Node::Iri(iri.as_str().to_owned())),
            TermKind::BlankNode => term.bnode_id().map(|id| Node::Blank(format!("_:{}", id.as_str()))),
            TermKind::Literal => term.lexical_form().map(|value| {
                Node::Literal(Literal {
                    value: value.to_string(),
                    lang: term.language_tag().map(|tag| tag.as_str().to_ascii_lowercase()),
                })
            }),
            TermKind::Triple | TermKind::Variable => None,
        }
    }

    pub fn iri(value: impl Into<String>) -> Node {
        Node::Iri(value.into())
    }

    pub fn literal(value: impl Into<String>, lang: Option<&str>) -> Node {
        Node::Literal(Literal { value: value.into(), lang: lang.map(str::to_owned) })
    }

    /// The identifier of an IRI or blank node, `None` for literals.
    pub fn id(&self) -> Option<&str> {
        match self {
            Node::Iri(s) | Node::Blank(s) => Some(s),
            Node::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{iri}>"),
            Node::Blank(id) => f.write_str(id),
            Node::Literal(Literal { value, lang: Some(lang), .. }) => write!(f, "{value:?}@{lang}"),
            Node::Literal(Literal { value, .. }) => write!(f, "{value:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sophia::api::term::SimpleTerm;

    #[test]
    fn converts_sophia_terms() {
        let iri = SimpleTerm::Iri(sophia::api::term::IriRef::new_unchecked("http://example.com/a".into()));
        assert_eq!(Node::from_term(iri), Some(Node::iri("http://example.com/a")));
    }

    #[test]
    fn literal_has_no_id() {
        assert_eq!(Node::literal("x", Some("en")).id(), None);
        assert_eq!(Node::Blank("_:b0".into()).id(), Some("_:b0"));
    }

    #[test]
    fn displays_like_ntriples() {
        assert_eq!(Node::iri("http://example.com/a").to_string(), "<http://example.com/a>");
        assert_eq!(Node::Blank("_:b0".into()).to_string(), "_:b0");
        assert_eq!(Node::literal("Katalog", Some("sv")).to_string(), r#""Katalog"@sv"#);
        assert_eq!(Node::literal("x", None).to_string(), r#""x""#);
    }
}

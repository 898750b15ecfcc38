//! Load RDF files into plain triples and abbreviate IRIs.
#![allow(rustdoc::bare_urls)]
use crate::error::Error;
use crate::term::{Literal, Node};
#[cfg(feature = "hdt")]
use hdt::Hdt;
use sophia::api::source::TripleSource;
use sophia::api::triple::Triple;
use sophia::turtle::parser::{nt, turtle};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub type Spo = [Node; 3];

/// RDF serialization of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Turtle,
    NTriples,
    #[cfg(feature = "rdfxml")]
    RdfXml,
    #[cfg(feature = "hdt")]
    Hdt,
}

impl Syntax {
    /// Guesses the syntax from the file extension, ignoring a trailing ".zst". Defaults to Turtle.
    pub fn from_path(path: &Path) -> Syntax {
        let mut path = path.to_path_buf();
        if path.extension() == Some(OsStr::new("zst")) {
            path.set_extension("");
        }
        match path.extension().and_then(OsStr::to_str).map(str::to_ascii_lowercase).as_deref() {
            Some("nt") => Syntax::NTriples,
            #[cfg(feature = "rdfxml")]
            Some("rdf" | "xml" | "owl") => Syntax::RdfXml,
            #[cfg(feature = "hdt")]
            Some("hdt") => Syntax::Hdt,
            _ => Syntax::Turtle,
        }
    }

    /// Guesses the syntax from an HTTP content type. Defaults to Turtle.
    pub fn from_content_type(content_type: &str) -> Syntax {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("n-triples") {
            return Syntax::NTriples;
        }
        #[cfg(feature = "rdfxml")]
        if content_type.contains("rdf+xml") || content_type.ends_with("/xml") {
            return Syntax::RdfXml;
        }
        Syntax::Turtle
    }
}

fn parse_error(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::Parse { path: path.to_path_buf(), message: e.to_string() }
}

/// Subject, predicate and object of a parsed triple. Quoted triples and variables are dropped.
fn spo<T: Triple>(t: &T) -> Option<Spo> {
    let spo = [Node::from_term(t.s()), Node::from_term(t.p()), Node::from_term(t.o())];
    match spo {
        [Some(s), Some(p), Some(o)] => Some([s, p, o]),
        _ => {
            log::debug!("skipping triple with unsupported term");
            None
        }
    }
}

fn from_source<S: TripleSource>(mut source: S, path: &Path) -> Result<Vec<Spo>, Error> {
    let mut triples = Vec::new();
    source
        .for_each_triple(|t| {
            if let Some(t) = spo(&t) {
                triples.push(t);
            }
        })
        .map_err(|e| parse_error(path, e))?;
    Ok(triples)
}

/// HDT dictionaries hold terms as strings: `"value"@lang`, `"value"^^<datatype>`, `_:label` or a bare IRI.
#[cfg_attr(not(feature = "hdt"), allow(dead_code))]
fn hdt_node(term: &str) -> Node {
    if let Some(rest) = term.strip_prefix('"') {
        return match rest.rfind('"') {
            Some(end) => Node::Literal(Literal {
                value: rest[..end].to_owned(),
                lang: rest[end + 1..].strip_prefix('@').map(str::to_ascii_lowercase),
            }),
            None => Node::literal(term, None),
        };
    }
    if term.starts_with("_:") {
        Node::Blank(term.to_owned())
    } else {
        Node::Iri(term.trim_start_matches('<').trim_end_matches('>').to_owned())
    }
}

#[cfg(feature = "hdt")]
fn from_hdt<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Spo>, Error> {
    let hdt = Hdt::new(reader).map_err(|e| parse_error(path, e))?;
    Ok(hdt.triples_with_pattern(None, None, None).map(|[s, p, o]| [hdt_node(&s), hdt_node(&p), hdt_node(&o)]).collect())
}

/// Parses RDF from a reader. `path` is only used in error messages.
pub fn parse<R: BufRead>(reader: R, syntax: Syntax, path: &Path) -> Result<Vec<Spo>, Error> {
    match syntax {
        Syntax::Turtle => from_source(turtle::parse_bufread(reader), path),
        Syntax::NTriples => from_source(nt::parse_bufread(reader), path),
        #[cfg(feature = "rdfxml")]
        Syntax::RdfXml => from_source(sophia::xml::parser::parse_bufread(reader), path),
        #[cfg(feature = "hdt")]
        Syntax::Hdt => from_hdt(reader, path),
    }
}

pub fn parse_str(text: &str, syntax: Syntax) -> Result<Vec<Spo>, Error> {
    parse(text.as_bytes(), syntax, Path::new("<string>"))
}

/// Loads an RDF file, decompressing it first if it ends with ".zst".
pub fn load_file(path: &Path) -> Result<Vec<Spo>, Error> {
    let syntax = Syntax::from_path(path);
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let triples = if path.extension() == Some(OsStr::new("zst")) {
        let decoder = zstd::Decoder::new(file).map_err(|e| Error::io(path, e))?;
        parse(BufReader::new(decoder), syntax, path)?
    } else {
        parse(BufReader::new(file), syntax, path)?
    };
    log::debug!("{} triples loaded from {}", triples.len(), path.display());
    Ok(triples)
}

/// If the namespace is known, returns a prefixed term string, for example "rdfs:label".
/// Otherwise, returns the full IRI. Expects `prefixes` ordered longest namespace first.
pub fn prefix_iri(prefixes: &[(String, String)], iri: &str) -> String {
    let prefixed = prefixes.iter().find_map(|(prefix, ns)| {
        let local = iri.strip_prefix(ns.as_str())?;
        if local.is_empty() || local.contains(['/', '#']) {
            return None;
        }
        Some(format!("{prefix}:{local}"))
    });
    let mut s = prefixed.unwrap_or_else(|| iri.trim_start_matches('<').trim_end_matches('>').to_owned());
    if s.ends_with('/') {
        s.pop();
    }
    s
}

//! RDF subjects grouped with their attributes.
use crate::config::Config;
use crate::literal;
use crate::rdf::Spo;
use crate::term::Node;
use multimap::MultiMap;
use std::collections::{BTreeSet, HashMap};

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const CATALOG: &str = "http://www.w3.org/ns/dcat#Catalog";
pub const DATASET: &str = "http://www.w3.org/ns/dcat#Dataset";
pub const DISTRIBUTION: &str = "http://www.w3.org/ns/dcat#Distribution";

/// Catalogs come first, then datasets, then distributions, then everything else.
pub const OBJ_ORDER: [&str; 3] = [CATALOG, DATASET, DISTRIBUTION];

/// One RDF subject.
#[derive(Debug, Clone)]
pub struct RdfObject {
    /// IRI or blank node label ("_:b0")
    pub id: String,
    /// HTML element id, used as the fragment in links to this object
    pub fragment: String,
    /// predicate IRI -> objects, in input order
    pub attributes: MultiMap<String, Node>,
}

/// Stable HTML id for an RDF identifier.
pub fn fragment(id: &str) -> String {
    format!("obj-{:016x}", const_fnv1a_hash::fnv1a_hash_str_64(id))
}

impl RdfObject {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        RdfObject { fragment: fragment(&id), id, attributes: MultiMap::new() }
    }

    /// Values of the first property in `candidates` that this object has.
    fn first_present<'a>(&'a self, candidates: &[String]) -> Option<&'a Vec<Node>> {
        candidates.iter().find_map(|p| self.attributes.get_vec(p))
    }

    fn best_literal(&self, candidates: &[String], language: &str) -> Option<String> {
        let values = self.first_present(candidates)?;
        literal::select(values.iter().filter_map(Node::as_literal), language).first().map(|s| (*s).to_owned())
    }

    pub fn title(&self, config: &Config, language: &str) -> Option<String> {
        self.best_literal(&config.title_properties, language)
    }

    pub fn description(&self, config: &Config, language: &str) -> Option<String> {
        self.best_literal(&config.description_properties, language)
    }

    /// First value of the first type property present, e.g. the object of rdf:type.
    pub fn rdf_type(&self, config: &Config) -> Option<&str> {
        self.first_present(&config.type_properties)?.iter().find_map(Node::id)
    }

    /// Position in [OBJ_ORDER], or `OBJ_ORDER.len()` for other types.
    pub fn type_rank(&self, config: &Config) -> usize {
        let types = self.first_present(&config.type_properties);
        OBJ_ORDER
            .iter()
            .position(|t| types.is_some_and(|types| types.iter().any(|n| n.id() == Some(*t))))
            .unwrap_or(OBJ_ORDER.len())
    }
}

/// All subjects of an RDF file, ordered by type rank, English title and id.
#[derive(Debug, Default)]
pub struct Objects {
    objects: Vec<RdfObject>,
    index: HashMap<String, usize>,
    languages: BTreeSet<String>,
}

impl Objects {
    pub fn from_triples(triples: Vec<Spo>, config: &Config) -> Self {
        let mut by_id: HashMap<String, RdfObject> = HashMap::new();
        let mut languages = BTreeSet::new();
        for [s, p, o] in triples {
            let (Some(id), Node::Iri(pred)) = (s.id(), &p) else {
                log::debug!("skipping triple {s} {p} {o}, literal subject or non-IRI predicate");
                continue;
            };
            if let Node::Literal(lit) = &o {
                if let Some(lang) = lit.lang.as_ref().filter(|l| !l.is_empty()) {
                    languages.insert(lang.clone());
                }
            }
            by_id.entry(id.to_owned()).or_insert_with(|| RdfObject::new(id)).attributes.insert(pred.clone(), o);
        }

        let mut keyed: Vec<_> = by_id
            .into_values()
            .map(|obj| ((obj.type_rank(config), obj.title(config, "en").unwrap_or_default(), obj.id.clone()), obj))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        let objects: Vec<RdfObject> = keyed.into_iter().map(|(_, obj)| obj).collect();
        let index = objects.iter().enumerate().map(|(i, obj)| (obj.id.clone(), i)).collect();
        Objects { objects, index, languages }
    }

    pub fn get(&self, id: &str) -> Option<&RdfObject> {
        self.index.get(id).map(|&i| &self.objects[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RdfObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Language tags of all literals.
    pub fn languages(&self) -> &BTreeSet<String> {
        &self.languages
    }
}

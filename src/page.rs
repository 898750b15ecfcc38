//! Render RDF objects as an HTML page.
use crate::config::Config;
use crate::error::Error;
use crate::literal;
use crate::object::{Objects, RdfObject};
use crate::predicate::PredicateResolver;
use crate::rdf::prefix_iri;
use crate::resource::{AttributeView, NodeView, ObjView};
use crate::term::Node;
use crate::toggle::Label;
use serde::Serialize;
use tinytemplate::TinyTemplate;

static TEMPLATE: &str = std::include_str!("../data/template.html");
pub static CSS: &str = std::include_str!("../data/style.css");
pub static SCRIPT: &str = std::include_str!("../data/rdfconv.js");

const RDF_ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";

#[derive(Serialize)]
struct Page<'a> {
    title: &'a str,
    date: &'a str,
    nodes: &'a [NodeView],
}

/// Builds the [NodeView]s of a page and renders them with the page template.
pub struct PageRenderer<'a> {
    objects: &'a Objects,
    config: &'a Config,
    resolver: &'a mut PredicateResolver,
    prefixes: Vec<(String, String)>,
    pub skip_internal_links: bool,
    pub skip_literal_links: bool,
}

impl<'a> PageRenderer<'a> {
    pub fn new(objects: &'a Objects, config: &'a Config, resolver: &'a mut PredicateResolver) -> Self {
        PageRenderer {
            objects,
            config,
            resolver,
            prefixes: config.prefixes(),
            skip_internal_links: config.skip_links,
            skip_literal_links: config.skip_links,
        }
    }

    /// Catalogs, then datasets, then distributions, then all other objects.
    fn ordered(&self) -> Vec<&'a RdfObject> {
        let (objects, config): (&'a Objects, &'a Config) = (self.objects, self.config);
        let mut ordered: Vec<&'a RdfObject> = objects.iter().collect();
        ordered.sort_by_key(|obj| obj.type_rank(config));
        ordered
    }

    pub fn build_node_views(&mut self, language: &str) -> Vec<NodeView> {
        self.ordered().into_iter().map(|obj| self.node_view(obj, language)).collect()
    }

    fn node_view(&mut self, obj: &RdfObject, language: &str) -> NodeView {
        let rdf_type = obj.rdf_type(self.config).map(|t| match self.resolver.resolve(t, language) {
            Some(label) => label,
            None => prefix_iri(&self.prefixes, t),
        });
        NodeView {
            node_id: obj.fragment.clone(),
            rdf_about: obj.id.clone(),
            title: obj.title(self.config, language),
            rdf_type,
            desc: obj.description(self.config, language),
            attributes: self.attributes(obj, language),
            show_more: Label::ShowMore.as_str(),
        }
    }

    fn attributes(&mut self, obj: &RdfObject, language: &str) -> Vec<AttributeView> {
        let mut attributes = Vec::with_capacity(obj.attributes.len() + 1);
        let (title, link) = self.format_id(&obj.id, language, true);
        attributes.push(AttributeView {
            pred_link: RDF_ABOUT.to_owned(),
            pred_title: "About".to_owned(),
            objs: vec![ObjView { title, link }],
        });

        let mut predicates: Vec<&String> = obj.attributes.keys().collect();
        predicates.sort();
        for pred in predicates {
            let Some(values) = obj.attributes.get_vec(pred) else { continue };
            let pred_title = self.resolver.resolve(pred, language).unwrap_or_else(|| prefix_iri(&self.prefixes, pred));

            let mut objs = Vec::new();
            let literals: Vec<_> = values.iter().filter_map(Node::as_literal).collect();
            if !literals.is_empty() {
                let formatted = literal::format(literals, language, self.skip_literal_links);
                objs.push(ObjView { title: formatted.join(" "), link: None });
            }
            let mut others: Vec<ObjView> = values
                .iter()
                .filter_map(Node::id)
                .map(|id| {
                    let (title, link) = self.format_id(id, language, self.skip_internal_links);
                    ObjView { title, link }
                })
                .collect();
            others.sort_by(|a, b| a.title.cmp(&b.title));
            objs.extend(others);

            attributes.push(AttributeView { pred_link: pred.clone(), pred_title, objs });
        }
        attributes
    }

    fn is_local_ns(&self, iri: &str) -> bool {
        self.config.local_ns.iter().any(|ns| !ns.is_empty() && iri.starts_with(ns.as_str()))
    }

    /// HTML title and link target for an IRI or blank node.
    /// Objects on this page link to their fragment unless `skip_local` is set.
    fn format_id(&self, id: &str, language: &str, skip_local: bool) -> (String, Option<String>) {
        if let Some(obj) = self.objects.get(id) {
            let title = literal::escape(&obj.title(self.config, language).unwrap_or_else(|| prefix_iri(&self.prefixes, id)));
            let link = if skip_local { id.to_owned() } else { format!("#{}", obj.fragment) };
            return (title, Some(link));
        }
        let title = literal::escape(&prefix_iri(&self.prefixes, id));
        if id.starts_with("_:") || self.is_local_ns(id) {
            // nothing to link to
            return (title, None);
        }
        (title, Some(id.to_owned()))
    }

    /// The complete HTML page for a language.
    pub fn render(&mut self, title: &str, language: &str, date: &str) -> Result<String, Error> {
        let nodes = self.build_node_views(language);
        let mut tt = TinyTemplate::new();
        tt.add_template("page", TEMPLATE)?;
        let page = Page { title, date, nodes: &nodes };
        Ok(tt.render("page", &page)?)
    }
}

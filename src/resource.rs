//! Per-language view of an RDF object, handed to the page template and to library callers.
use serde::Serialize;

/// One rendered value of an attribute. `title` is HTML, `link` is a plain URL or fragment.
/// `link` serializes as null when absent, the page template tests it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ObjView {
    pub title: String,
    pub link: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AttributeView {
    pub pred_link: String,
    pub pred_title: String,
    pub objs: Vec<ObjView>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    /// HTML id of the object's widget
    pub node_id: String,
    pub rdf_about: String,
    pub title: Option<String>,
    pub rdf_type: Option<String>,
    pub desc: Option<String>,
    pub attributes: Vec<AttributeView>,
    /// initial label of the toggle control, panels start collapsed
    pub show_more: &'static str,
}

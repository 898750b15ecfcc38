//! Convert RDF files, typically DCAT catalogs, into human readable HTML pages.
//!
//! Each RDF subject becomes a widget with a summary and a collapsible "full info" panel.
//! The [toggle] module models the expand/collapse behavior that the generated pages ship with.
pub mod config;
pub mod converter;
pub mod error;
pub mod literal;
pub mod object;
pub mod page;
pub mod predicate;
pub mod rdf;
pub mod resource;
pub mod term;
pub mod toggle;

pub use crate::config::Config;
pub use crate::converter::Converter;
pub use crate::error::{Error, LanguageError};

//! Converter settings: embedded defaults, an optional TOML file and `RDFCONV_*` environment variables.
use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

static DEFAULT: &str = std::include_str!("../data/default.toml");

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// The first of these properties present on a resource gives its title.
    pub title_properties: Vec<String>,
    pub description_properties: Vec<String>,
    pub type_properties: Vec<String>,
    /// prefix -> namespace IRI, used to abbreviate IRIs such as "dcterms:title"
    #[serde(default)]
    pub namespaces: HashMap<String, String>,
    /// Namespaces whose resources are rendered as links within the page.
    #[serde(default)]
    pub local_ns: Vec<String>,
    #[serde(default)]
    pub resolve_labels: bool,
    #[serde(default)]
    pub skip_links: bool,
}

fn defaults() -> ConfigBuilder<DefaultState> {
    config::Config::builder().add_source(File::from_str(DEFAULT, FileFormat::Toml))
}

impl Config {
    /// Layers the given file (if any) and then the environment over the defaults.
    pub fn new(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = defaults();
        if let Some(path) = file {
            builder = builder.add_source(File::new(&path.to_string_lossy(), FileFormat::Toml));
        }
        builder
            .add_source(Environment::with_prefix("RDFCONV").try_parsing(true).list_separator(",").with_list_parse_key("local_ns"))
            .build()?
            .try_deserialize()
    }

    /// (prefix, namespace) pairs, longest namespace first so that the most specific one wins.
    pub fn prefixes(&self) -> Vec<(String, String)> {
        let mut p: Vec<(String, String)> = self.namespaces.iter().map(|(prefix, iri)| (prefix.clone(), iri.clone())).collect();
        p.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0)));
        p
    }
}

impl Default for Config {
    /// Only the embedded defaults, without file or environment overrides.
    fn default() -> Self {
        defaults().build().and_then(|c| c.try_deserialize()).expect("embedded default configuration is valid")
    }
}

//! Convert one RDF file into HTML pages, one per language.
use crate::config::Config;
use crate::error::{Error, LanguageError};
use crate::literal;
use crate::object::Objects;
use crate::page::{PageRenderer, CSS, SCRIPT};
use crate::predicate::PredicateResolver;
use crate::rdf::{self, Syntax};
use crate::resource::NodeView;
use bytesize::ByteSize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Language used when the input has no language tags, and for index.html.
pub const DEFAULT_LANGUAGE: &str = "en";
/// Accepts whatever languages the input contains.
pub const ALL_LANGUAGES: &str = "all";

pub struct Converter {
    config: Config,
    /// Languages the user asked for, validated against the input unless it contains "all".
    specified_languages: BTreeSet<String>,
    objects: Objects,
    resolver: PredicateResolver,
    /// File name of the loaded input, used to name the output pages.
    input_file: String,
    pub skip_links: bool,
}

impl Converter {
    pub fn new<S: AsRef<str>>(languages: &[S], config: Config) -> Self {
        let mut specified_languages: BTreeSet<String> =
            languages.iter().map(|l| l.as_ref().trim().to_owned()).filter(|l| !l.is_empty()).collect();
        if specified_languages.is_empty() {
            specified_languages.insert(ALL_LANGUAGES.to_owned());
        }
        let resolver = if config.resolve_labels { PredicateResolver::http() } else { PredicateResolver::disabled() };
        Converter {
            skip_links: config.skip_links,
            config,
            specified_languages,
            objects: Objects::default(),
            resolver,
            input_file: String::new(),
        }
    }

    /// Replaces the predicate label resolver, e.g. one with a custom fetcher.
    pub fn with_resolver(mut self, resolver: PredicateResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn load_file(&mut self, path: &Path) -> Result<(), Error> {
        let start = Instant::now();
        self.input_file = file_name(path);
        let triples = rdf::load_file(path)?;
        self.objects = Objects::from_triples(triples, &self.config);
        log::debug!("{} objects built from {} in {:?}", self.objects.len(), path.display(), start.elapsed());
        self.validate_languages()
    }

    /// Loads RDF text. `name` plays the role of the input file name.
    pub fn load_str(&mut self, name: &str, text: &str, syntax: Syntax) -> Result<(), Error> {
        self.input_file = name.to_owned();
        self.objects = Objects::from_triples(rdf::parse(text.as_bytes(), syntax, Path::new(name))?, &self.config);
        self.validate_languages()
    }

    pub fn objects(&self) -> &Objects {
        &self.objects
    }

    /// Languages encountered in the loaded input.
    pub fn languages(&self) -> &BTreeSet<String> {
        self.objects.languages()
    }

    /// Languages a page is written for: those of the input, English if there are none.
    pub fn output_languages(&self) -> Vec<String> {
        if self.languages().is_empty() {
            vec![DEFAULT_LANGUAGE.to_owned()]
        } else {
            self.languages().iter().cloned().collect()
        }
    }

    /// Makes sure the languages specified by the user are the same as the ones in the input.
    fn validate_languages(&self) -> Result<(), Error> {
        if self.specified_languages.contains(ALL_LANGUAGES) || &self.specified_languages == self.languages() {
            return Ok(());
        }
        Err(LanguageError::new(&self.input_file, &self.specified_languages, self.languages()).into())
    }

    fn renderer(&mut self) -> PageRenderer<'_> {
        let mut renderer = PageRenderer::new(&self.objects, &self.config, &mut self.resolver);
        renderer.skip_internal_links = self.skip_links;
        renderer.skip_literal_links = self.skip_links;
        renderer
    }

    /// The objects of the loaded input as seen on the page of a language, without writing anything.
    /// Useful for rendering the data differently.
    pub fn nodes(&mut self, language: &str) -> Vec<NodeView> {
        self.renderer().build_node_views(language)
    }

    /// Writes the pages and their assets into `folder`. With `index_html`, only an English
    /// index.html is written. Returns the paths of the written pages.
    pub fn output_html(&mut self, folder: &Path, index_html: bool) -> Result<Vec<PathBuf>, Error> {
        if !folder.exists() {
            fs::create_dir_all(folder).map_err(|e| Error::io(folder, e))?;
        } else if !folder.is_dir() {
            return Err(Error::NotADirectory { path: folder.to_path_buf() });
        }
        for (name, content) in [("style.css", CSS), ("rdfconv.js", SCRIPT)] {
            let path = folder.join(name);
            if !path.exists() {
                fs::write(&path, content).map_err(|e| Error::io(&path, e))?;
            }
        }

        let date = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        let title = stem(&self.input_file);
        let pages: Vec<(PathBuf, String)> = if index_html {
            vec![(folder.join("index.html"), DEFAULT_LANGUAGE.to_owned())]
        } else {
            self.output_languages().into_iter().map(|lang| (folder.join(format!("{title}.{lang}.html")), lang)).collect()
        };

        let mut written = Vec::with_capacity(pages.len());
        for (path, language) in pages {
            let html = self.renderer().render(&title, &language, &date)?;
            fs::write(&path, &html).map_err(|e| Error::io(&path, e))?;
            log::info!("wrote {} ({})", path.display(), ByteSize(html.len() as u64));
            written.push(path);
        }
        Ok(written)
    }
}

/// Writes `index.html` into `folder`, linking every other HTML page there, sorted by name.
/// Hidden files are left out.
pub fn write_page_index(folder: &Path) -> Result<PathBuf, Error> {
    let entries = fs::read_dir(folder).map_err(|e| Error::io(folder, e))?;
    let mut pages = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(folder, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == "index.html" || name.starts_with('.') || !name.contains("html") || !entry.path().is_file() {
            continue;
        }
        pages.push(name);
    }
    pages.sort();
    let html: String = pages
        .iter()
        .map(|name| {
            let name = literal::escape(name);
            format!("<a href=\"{name}\">{name}</a><br />\n")
        })
        .collect();
    let path = folder.join("index.html");
    fs::write(&path, html).map_err(|e| Error::io(&path, e))?;
    log::info!("wrote {} linking {} page(s)", path.display(), pages.len());
    Ok(path)
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

/// "catalog.ttl" -> "catalog", "catalog.ttl.zst" -> "catalog"
fn stem(file_name: &str) -> String {
    let name = file_name.strip_suffix(".zst").unwrap_or(file_name);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_owned(),
        _ => name.to_owned(),
    }
}

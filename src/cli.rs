//! Command line arguments.
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rdfconv",
    version,
    about = "RDF to HTML converter. Converts one or more RDF files into a more human readable HTML representation."
)]
pub struct Cli {
    /// DCAT file(s)
    #[arg(value_name = "DCAT_FILE", required = true, num_args = 1..)]
    pub dcat_files: Vec<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT_DIR")]
    pub output: PathBuf,

    /// Store as index.html
    #[arg(long = "index")]
    pub index_html: bool,

    /// Generate index.html with links to all pages in the output directory
    #[arg(long, conflicts_with_all = ["index_html", "json"])]
    pub create_index: bool,

    /// Namespaces to be considered local for rendering and referenced as fragments
    #[arg(long = "local-ns", value_name = "LOCAL_NS", num_args = 1..)]
    pub local_ns: Vec<String>,

    /// Languages (ISO 639) to generate, separated by comma. If omitted all encountered languages are generated.
    #[arg(long, default_value = "all", value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Watch input files for changes and run the conversion when a change occurs
    #[arg(long)]
    pub watch: bool,

    /// Set log level to DEBUG instead of WARN
    #[arg(long)]
    pub verbose: bool,

    /// File to log to. If omitted logging will be sent to stdout
    #[arg(long = "log-file", value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Configuration file (TOML) overriding the built-in defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Look up human readable predicate names in the published vocabularies
    #[arg(long)]
    pub resolve_labels: bool,

    /// Do not turn URLs and local references into links
    #[arg(long)]
    pub skip_links: bool,

    /// Print the objects of each language as JSON instead of writing HTML
    #[arg(long, conflicts_with_all = ["watch", "serve"])]
    pub json: bool,

    /// Serve the output directory on localhost at this port after converting
    #[arg(long, value_name = "PORT")]
    pub serve: Option<u16>,
}

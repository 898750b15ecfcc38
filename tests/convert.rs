use rdfconv::toggle::{Event, Label, MemoryHost, PanelState};
use rdfconv::{Config, Converter, Error};
use std::fs;
use std::path::Path;

const CATALOG: &str = r#"
@prefix dcat: <http://www.w3.org/ns/dcat#> .
@prefix dcterms: <http://purl.org/dc/terms/> .
@prefix foaf: <http://xmlns.com/foaf/0.1/> .

<http://example.com/catalog> a dcat:Catalog ;
    dcterms:title "Open data"@en, "Öppna data"@sv ;
    dcterms:publisher <http://example.com/org> ;
    dcat:dataset <http://example.com/ds/stops> .

<http://example.com/org> foaf:name "City of Example" .

<http://example.com/ds/stops> a dcat:Dataset ;
    dcterms:title "Bus stops"@en, "Busshållplatser"@sv ;
    dcterms:description "Positions of all bus stops, see http://example.com/docs/bus_stops.html."@en,
        "Alla busshållplatser"@sv ;
    dcat:keyword "transport"@en, "transport"@sv ;
    dcat:distribution [ a dcat:Distribution ; dcterms:title "CSV" ;
        dcat:downloadURL <http://example.com/files/stops.csv> ] .
"#;

fn write_input(dir: &Path) -> std::path::PathBuf {
    let input = dir.join("catalog.ttl");
    fs::write(&input, CATALOG).unwrap();
    input
}

#[test]
fn writes_one_page_per_language_with_assets() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());
    let out = dir.path().join("out");

    let mut converter = Converter::new(&["all"], Config::default());
    converter.load_file(&input).unwrap();
    let pages = converter.output_html(&out, false).unwrap();

    assert_eq!(pages, vec![out.join("catalog.en.html"), out.join("catalog.sv.html")]);
    assert!(out.join("style.css").is_file());
    assert!(out.join("rdfconv.js").is_file());

    let sv = fs::read_to_string(out.join("catalog.sv.html")).unwrap();
    assert!(sv.contains("Busshållplatser"));
    assert!(sv.contains("Öppna data"));
    assert_eq!(sv.matches(r#"class="rdf_obj""#).count(), converter.objects().len());

    let en = fs::read_to_string(out.join("catalog.en.html")).unwrap();
    assert!(en.contains(r#"<a href="http://example.com/docs/bus_stops.html" target="_blank">bus stops.html</a>"#));
}

#[test]
fn index_html_is_english_only() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());
    let out = dir.path().join("site");

    let mut converter = Converter::new(&["all"], Config::default());
    converter.load_file(&input).unwrap();
    let pages = converter.output_html(&out, true).unwrap();

    assert_eq!(pages, vec![out.join("index.html")]);
    assert!(!out.join("catalog.en.html").exists());
    assert!(fs::read_to_string(&pages[0]).unwrap().contains("Bus stops"));
}

#[test]
fn existing_assets_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    fs::write(out.join("style.css"), "/* custom */").unwrap();

    let mut converter = Converter::new(&["all"], Config::default());
    converter.load_file(&input).unwrap();
    converter.output_html(&out, false).unwrap();
    assert_eq!(fs::read_to_string(out.join("style.css")).unwrap(), "/* custom */");
}

#[test]
fn output_must_be_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let mut converter = Converter::new(&["all"], Config::default());
    converter.load_file(&input).unwrap();
    let err = converter.output_html(&input, false).unwrap_err();
    assert!(matches!(err, Error::NotADirectory { .. }));
}

#[test]
fn language_mismatch_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());
    let mut converter = Converter::new(&["en", "fi"], Config::default());
    let err = converter.load_file(&input).unwrap_err();
    assert!(err.to_string().contains("Specified: en,fi"), "{err}");
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut converter = Converter::new(&["all"], Config::default());
    let err = converter.load_file(&dir.path().join("missing.ttl")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn compressed_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("catalog.ttl.zst");
    fs::write(&input, zstd::encode_all(CATALOG.as_bytes(), 3).unwrap()).unwrap();

    let mut converter = Converter::new(&["all"], Config::default());
    converter.load_file(&input).unwrap();
    let pages = converter.output_html(&dir.path().join("out"), false).unwrap();
    assert!(pages[0].ends_with("catalog.en.html"));
}

#[test]
fn panels_of_a_converted_page() {
    let mut converter = Converter::new(&["all"], Config::default());
    converter.load_str("catalog.ttl", CATALOG, rdfconv::rdf::Syntax::Turtle).unwrap();
    let nodes = converter.nodes("en");
    let (mut host, controller) = MemoryHost::page(nodes.iter().map(|n| n.node_id.clone()));
    let dataset = &nodes.iter().find(|n| n.rdf_about == "http://example.com/ds/stops").unwrap().node_id;

    // following the catalog's link to the dataset opens the dataset panel
    let catalog = &nodes[0];
    let link = catalog.attributes.iter().flat_map(|a| &a.objs).find_map(|o| o.link.clone().filter(|l| l.ends_with(dataset.as_str()))).unwrap();
    controller.handle(&mut host, &Event::FragmentChange(link));
    host.finish_transitions(&controller);
    assert_eq!(controller.state(&host, dataset), Some(PanelState::Expanded));
    assert_eq!(host.label(dataset), Some(Label::ShowLess));
    assert_eq!(controller.state(&host, &catalog.node_id), Some(PanelState::Collapsed));

    controller.handle(&mut host, &Event::Click(dataset.clone()));
    host.finish_transitions(&controller);
    assert_eq!(host.label(dataset), Some(Label::ShowMore));
}

use hedera::prelude::*;
use test_case::test_case;

fn page() -> Vec<u8> {
    std::fs::read("tests/data/page.html").unwrap()
}

fn find(document: &Document, node: Node, tag: &str) -> Option<Node> {
    if document.name(node).unwrap() == tag && node.is_element() {
        return Some(node);
    }

    document
        .children(node)
        .unwrap()
        .into_iter()
        .find_map(|child| find(document, child, tag))
}

#[test]
fn empty_input_is_an_empty_document() {
    let config = ParseConfig::new().with_input_encoding("iso-8859-1");
    let parsed = Document::parse(b"", &config).unwrap();
    let created = DocumentBuilder::new_document(&config);

    assert!(parsed.root().is_none());
    assert_eq!(parsed.node_count(), created.node_count());
    assert_eq!(parsed.input_encoding(), created.input_encoding());
    assert_eq!(parsed.output_encoding(), created.output_encoding());
    assert_eq!(parsed.to_string(), created.to_string());
    assert_ne!(parsed.id(), created.id());
}

#[test_case(b"<p>hello</p>" ; "paragraph")]
#[test_case(b"just text" ; "text only")]
#[test_case(b"<div><span>unclosed" ; "unclosed tags")]
#[test_case(b"</p></p><<>>" ; "garbage")]
#[test_case(b"<p>caf\xE9</p>" ; "invalid utf8")]
fn recover_always_has_root(content: &[u8]) {
    let config = ParseConfig::new().with_options(ParseOptions::RECOVER);
    let document = Document::parse(content, &config).unwrap();

    let root = document.root().unwrap();
    assert!(root.is_element());
    assert_eq!(document.name(root).unwrap(), "html");
    assert_eq!(document.content_len(), content.len());
}

#[test]
fn unparsable_input_fails_with_fallback() {
    let config = ParseConfig::new().with_options(ParseOptions::NOERROR);
    let failure = Document::parse(b"<p>caf\xE9</p>", &config).unwrap_err();

    assert!(matches!(failure.error(), Error::ParseFailed(_)));
    let document = failure.into_fallback();
    assert!(document.root().is_none());
    assert_eq!(document.node_count(), 1);
}

#[test]
fn unknown_declared_encoding() {
    let strict = ParseConfig::new()
        .with_input_encoding("x-unknown")
        .with_options(ParseOptions::NOERROR);
    assert!(Document::parse(b"<p>x</p>", &strict).is_err());

    let relaxed = ParseConfig::new().with_input_encoding("x-unknown");
    let document = Document::parse(b"<p>x</p>", &relaxed).unwrap();
    assert_eq!(document.input_encoding(), "x-unknown");
}

#[test]
fn root_is_the_same_node() {
    let document = Document::parse(&page(), &ParseConfig::default()).unwrap();

    let first = document.root().unwrap();
    let second = document.root().unwrap();
    assert_eq!(first.id(), second.id());
    assert_eq!(document.name(first).unwrap(), document.name(second).unwrap());
    assert_eq!(document.content(first).unwrap(), document.content(second).unwrap());
    assert_eq!(document.child_count(first).unwrap(), document.child_count(second).unwrap());
}

#[test]
fn created_nodes() {
    let mut document = Document::parse(&page(), &ParseConfig::default()).unwrap();

    let div = document.create_element_node("div");
    assert_eq!(document.node_type(div).unwrap(), NodeType::Element);
    assert_eq!(document.name(div).unwrap(), "div");
    assert_eq!(document.parent(div).unwrap(), None);
    assert!(!document.is_attached(div).unwrap());

    let cdata = document.create_cdata("");
    assert_eq!(document.node_type(cdata).unwrap(), NodeType::CData);
    assert_eq!(document.content(cdata).unwrap().len(), 0);

    let body = find(&document, document.root().unwrap(), "body").unwrap();
    document.append_child(div, cdata).unwrap();
    document.append_child(body, div).unwrap();
    assert!(document.is_attached(cdata).unwrap());
}

#[test]
fn stale_and_foreign_nodes() {
    let mut document = Document::parse(&page(), &ParseConfig::default()).unwrap();
    let other = Document::parse(&page(), &ParseConfig::default()).unwrap();

    let list = find(&document, document.root().unwrap(), "ul").unwrap();
    let items = document.children(list).unwrap();
    assert!(document.remove(list).unwrap() > items.len());

    assert_eq!(document.children(list), Err(Error::StaleNode(list.id())));
    for item in items {
        assert_eq!(document.content(item), Err(Error::StaleNode(item.id())));
    }

    let foreign = other.root().unwrap();
    assert_eq!(document.name(foreign), Err(Error::ForeignNode(foreign.id())));

    // Freed slots are reused without reviving old handles
    let fresh = document.create_element_node("section");
    assert_eq!(document.name(fresh).unwrap(), "section");
    assert_eq!(document.name(list), Err(Error::StaleNode(list.id())));
}

#[test]
fn blanks_and_compact() {
    let config = ParseConfig::new().with_options(DEFAULT_PARSE_OPTIONS | ParseOptions::NOBLANKS);
    let document = Document::parse(&page(), &config).unwrap();
    let list = find(&document, document.root().unwrap(), "ul").unwrap();
    assert_eq!(document.child_count(list).unwrap(), 3);

    let pre = find(&document, document.root().unwrap(), "pre").unwrap();
    assert_eq!(document.content(pre).unwrap(), "  keep   this\n  ");

    let full = Document::parse(&page(), &ParseConfig::default()).unwrap();
    assert!(full.node_count() > document.node_count());
}

fn child_names(document: &Document, node: Node) -> Vec<String> {
    document
        .children(node)
        .unwrap()
        .into_iter()
        .map(|child| document.name(child).unwrap().to_string())
        .collect()
}

#[test]
fn compact_merges_text_left_by_unwrapping() {
    let options = ParseOptions::RECOVER | ParseOptions::NODEFDTD | ParseOptions::NOIMPLIED;
    let content = b"<title>t</title>  x";

    // The blank run lands in the implied head, the word in the implied body
    let split = Document::parse(content, &ParseConfig::new().with_options(options)).unwrap();
    assert_eq!(child_names(&split, split.document_node()), vec!["title", "#text", "#text"]);

    let config = ParseConfig::new().with_options(options | ParseOptions::COMPACT);
    let compact = Document::parse(content, &config).unwrap();
    let children = compact.children(compact.document_node()).unwrap();
    assert_eq!(child_names(&compact, compact.document_node()), vec!["title", "#text"]);
    assert_eq!(compact.content(children[1]).unwrap(), "  x");
    assert_eq!(compact.node_count(), split.node_count() - 1);
}

#[test]
fn blanks_between_inline_elements_are_kept() {
    let config = ParseConfig::new().with_options(DEFAULT_PARSE_OPTIONS | ParseOptions::NOBLANKS);
    let document = Document::parse(b"<div> <p><b>a</b> <i>b</i></p> </div>", &config).unwrap();

    let p = find(&document, document.root().unwrap(), "p").unwrap();
    assert_eq!(document.content(p).unwrap(), "a b");

    let div = find(&document, document.root().unwrap(), "div").unwrap();
    assert_eq!(child_names(&document, div), vec!["p"]);
}

#[test]
fn pedantic_reports_exact_diagnostics() {
    let content = b"<p>one</p></div>";
    let errors = |options: ParseOptions| {
        let document = Document::parse(content, &ParseConfig::new().with_options(options)).unwrap();
        document
            .diagnostics()
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
            .map(|diagnostic| diagnostic.message.clone())
            .collect::<Vec<_>>()
    };

    let plain = errors(ParseOptions::RECOVER);
    let pedantic = errors(ParseOptions::RECOVER | ParseOptions::PEDANTIC);

    assert!(plain.iter().any(|message| message == "Unexpected token"));
    assert!(plain.iter().all(|message| !message.contains("insertion mode")));
    assert!(pedantic.iter().any(|message| message.contains("in insertion mode")));
    assert!(pedantic.iter().map(String::len).sum::<usize>() > plain.iter().map(String::len).sum::<usize>());

    // NOERROR drops them either way
    assert!(errors(ParseOptions::RECOVER | ParseOptions::PEDANTIC | ParseOptions::NOERROR).is_empty());
}

#[test]
fn document_accessors() {
    let url = url::Url::parse("https://example.org/page.html").unwrap();
    let config = ParseConfig::new()
        .with_url(url.clone())
        .with_output_encoding("iso-8859-1\0");
    let content = page();
    let document = Document::parse(&content, &config).unwrap();

    assert_eq!(document.url(), Some(&url));
    assert_eq!(document.input_encoding(), DEFAULT_ENCODING);
    assert_eq!(document.output_encoding(), "iso-8859-1");
    assert_eq!(document.content_len(), content.len());
    assert_eq!(document.meta_encoding(), "utf-8");
}

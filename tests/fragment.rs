use hedera::html::engine::{EngineInput, EngineTree};
use hedera::prelude::*;

struct BrokenEngine;

impl ParseEngine for BrokenEngine {
    fn parse_document(&self, input: &EngineInput<'_>) -> Option<EngineTree> {
        Html5Engine.parse_document(input)
    }

    fn parse_fragment(&self, _input: &EngineInput<'_>, _context: &str) -> Option<EngineTree> {
        None
    }
}

#[test]
fn fragment_is_detached_until_appended() {
    let mut document = Document::parse(b"<div id=target></div>", &ParseConfig::default()).unwrap();
    let root = document.root().unwrap();
    let before = document.content(root).unwrap();

    let fragment = document
        .parse_fragment(b"<em>one</em><em>two</em>", None, DEFAULT_PARSE_OPTIONS)
        .unwrap();
    assert_eq!(fragment.children(&document).unwrap().len(), 2);
    assert_eq!(document.content(root).unwrap(), before);

    let body = document.children(root).unwrap()[1];
    let target = document.first_child(body).unwrap().unwrap();
    assert_eq!(document.attribute(target, "id").unwrap(), Some("target"));

    document.append_fragment(target, &fragment).unwrap();
    assert_eq!(document.content(root).unwrap(), "onetwo");
    assert!(fragment.is_empty(&document).unwrap());
}

#[test]
fn fragment_can_be_appended_as_child() {
    let mut document = Document::parse(b"<p></p>", &ParseConfig::default()).unwrap();
    let body = document.children(document.root().unwrap()).unwrap()[1];
    let p = document.first_child(body).unwrap().unwrap();

    let fragment = document.parse_fragment(b"a<br>b", None, DEFAULT_PARSE_OPTIONS).unwrap();
    document.append_child(p, fragment.node()).unwrap();

    let names: Vec<_> = document
        .children(p)
        .unwrap()
        .into_iter()
        .map(|node| document.name(node).unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["#text", "br", "#text"]);
}

#[test]
fn engine_failure_gives_empty_fragment() {
    let mut document = Document::parse(b"<p>x</p>", &ParseConfig::default()).unwrap();
    let failure = document
        .parse_fragment_with(&BrokenEngine, b"<b>x</b>", None, DEFAULT_PARSE_OPTIONS)
        .unwrap_err();

    assert!(matches!(failure.error(), Error::ParseFailed(_)));
    assert!(failure.to_string().starts_with("parse failed"));

    let fragment = failure.into_fallback();
    assert!(fragment.is_empty(&document).unwrap());
    assert_eq!(document.node_type(fragment.node()).unwrap(), NodeType::DocumentFragment);
}

#[test]
fn empty_fragment_input() {
    let mut document = DocumentBuilder::new_document(&ParseConfig::default());
    let fragment = document
        .parse_fragment_with(&BrokenEngine, b"", None, DEFAULT_PARSE_OPTIONS)
        .unwrap();

    assert!(fragment.is_empty(&document).unwrap());
}

#[test]
fn fragment_from_other_document_is_foreign() {
    let mut first = Document::parse(b"<p>x</p>", &ParseConfig::default()).unwrap();
    let mut second = Document::parse(b"<p>y</p>", &ParseConfig::default()).unwrap();

    let fragment = second.parse_fragment(b"<i>z</i>", None, DEFAULT_PARSE_OPTIONS).unwrap();
    let root = first.root().unwrap();

    assert_eq!(
        first.append_fragment(root, &fragment),
        Err(Error::ForeignNode(fragment.node().id()))
    );
}

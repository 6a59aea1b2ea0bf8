use hedera::prelude::*;
use test_case::test_case;

#[test_case("utf-8")]
#[test_case("ISO-8859-1")]
#[test_case("windows-1252")]
#[test_case("shift_jis")]
#[test_case("x-made-up" ; "unknown labels are stored as given")]
fn set_then_get(encoding: &str) {
    let mut document = Document::parse(b"<title>t</title><p>x</p>", &ParseConfig::default()).unwrap();

    document.set_meta_encoding(encoding).unwrap();
    assert_eq!(document.meta_encoding(), encoding);

    // Setting it twice does not add another declaration
    document.set_meta_encoding(encoding).unwrap();
    assert_eq!(document.meta_encoding(), encoding);
}

#[test]
fn replace_and_clear() {
    let content = std::fs::read("tests/data/page.html").unwrap();
    let mut document = Document::parse(&content, &ParseConfig::default()).unwrap();
    assert_eq!(document.meta_encoding(), "utf-8");

    document.set_meta_encoding("koi8-r").unwrap();
    assert_eq!(document.meta_encoding(), "koi8-r");

    document.set_meta_encoding("").unwrap();
    assert_eq!(document.meta_encoding(), "");
}

#[test]
fn rejected_requests() {
    let mut document = Document::parse(b"<p>x</p>", &ParseConfig::default()).unwrap();
    assert!(matches!(
        document.set_meta_encoding("html"),
        Err(Error::EncodingSetFailed(_))
    ));
    assert_eq!(document.meta_encoding(), "");

    let mut empty = Document::parse(b"", &ParseConfig::default()).unwrap();
    let err = empty.set_meta_encoding("utf-8").unwrap_err();
    assert!(err.to_string().starts_with("set meta encoding failed"));
}

#[test_case("x y")]
#[test_case("a;b")]
#[test_case(" ")]
fn labels_that_cannot_be_read_back_are_refused(encoding: &str) {
    let content = std::fs::read("tests/data/page.html").unwrap();
    let mut document = Document::parse(&content, &ParseConfig::default()).unwrap();

    assert!(matches!(
        document.set_meta_encoding(encoding),
        Err(Error::EncodingSetFailed(_))
    ));
    assert_eq!(document.meta_encoding(), "utf-8");
}

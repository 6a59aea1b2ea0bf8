//! Parsing engine
//!
//! The document layer never tokenizes or builds trees itself. It hands the raw bytes to a
//! [`ParseEngine`] which either returns a finished tree or signals failure. The default engine,
//! [`Html5Engine`], decodes the input with `encoding_rs` and lets html5ever construct the tree
//! inside a node arena. It never touches the network, so `NONET` always holds.
use crate::engine::report::Report;
use crate::engine::sink::{ArenaSink, SinkOutput, StartTagRecorder};
use crate::errors::ParseError;
use crate::node::arena::NodeArena;
use crate::node::data::document::QuirksMode;
use crate::node::node_impl::NodeImpl;
use crate::node::HTML_NAMESPACE;
use crate::options::ParseOptions;
use encoding_rs::Encoding;
use hedera_shared::encoding::{self, DEFAULT_ENCODING};
use hedera_shared::node::NodeId;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tokenizer::{BufferQueue, Tokenizer, TokenizerOpts, TokenizerResult};
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{LocalName, Namespace, ParseOpts, QualName};
use log::debug;
use url::Url;

pub(crate) mod report;
pub(crate) mod shaping;
pub(crate) mod sink;

/// Everything the engine gets to see of a parse request
#[derive(Clone, Copy, Debug)]
pub struct EngineInput<'a> {
    /// Raw input bytes
    pub content: &'a [u8],
    /// Source url of the input, if known
    pub url: Option<&'a Url>,
    /// Declared input encoding (normalized, never empty)
    pub encoding: Option<&'a str>,
    pub options: ParseOptions,
}

/// A tree produced by the engine. It is opaque to callers: the only thing that can be done with it
/// is handing it to a document.
#[derive(Debug)]
pub struct EngineTree {
    pub(crate) arena: NodeArena,
    /// Node whose children make up the parsed content: the document node for documents, the
    /// container element for fragments
    pub(crate) root: NodeId,
    pub(crate) quirks_mode: QuirksMode,
    pub(crate) diagnostics: Vec<ParseError>,
    /// Encoding the input bytes were decoded with
    pub(crate) encoding: &'static Encoding,
}

impl EngineTree {
    /// Name of the encoding the input was decoded with
    pub fn encoding_name(&self) -> String {
        encoding::canonical_name(self.encoding)
    }

    pub fn node_count(&self) -> usize {
        self.arena.node_count()
    }
}

/// A markup parsing engine. Returns `None` when no usable tree can be produced.
pub trait ParseEngine {
    /// Parses a complete document
    fn parse_document(&self, input: &EngineInput<'_>) -> Option<EngineTree>;

    /// Parses a fragment as if it was the content of a `context` element
    fn parse_fragment(&self, input: &EngineInput<'_>, context: &str) -> Option<EngineTree>;
}

/// Engine backed by the html5ever tree builder
#[derive(Clone, Copy, Debug, Default)]
pub struct Html5Engine;

impl Html5Engine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn parse_opts(options: ParseOptions) -> ParseOpts {
        let exact_errors = options.contains(ParseOptions::PEDANTIC);

        ParseOpts {
            tokenizer: TokenizerOpts {
                exact_errors,
                ..Default::default()
            },
            tree_builder: TreeBuilderOpts {
                exact_errors,
                ..Default::default()
            },
        }
    }

    /// Decodes the input bytes. A byte order mark wins over the declared encoding, which in turn
    /// wins over the default encoding.
    fn decode(input: &EngineInput<'_>, report: &mut Report) -> Option<(String, &'static Encoding)> {
        let recover = input.options.contains(ParseOptions::RECOVER);

        let declared = match input.encoding {
            Some(label) => match encoding::lookup(label) {
                Some(found) => Some(found),
                None if recover => {
                    report.warning(
                        format!("unsupported encoding '{label}', using {DEFAULT_ENCODING}"),
                        0,
                    );
                    None
                }
                None => {
                    report.error(format!("unsupported encoding '{label}'"), 0);
                    return None;
                }
            },
            None => None,
        };

        let (encoding, content) = match encoding::sniff_bom(input.content) {
            Some((found, bom_len)) => (found, input.content.get(bom_len..).unwrap_or_default()),
            None => (declared.unwrap_or(encoding_rs::UTF_8), input.content),
        };

        if recover {
            let (text, had_errors) = encoding.decode_without_bom_handling(content);
            if had_errors {
                report.warning(
                    format!("input is not valid {}, malformed bytes replaced", encoding.name()),
                    0,
                );
            }
            return Some((text.into_owned(), encoding));
        }

        match encoding.decode_without_bom_handling_and_without_replacement(content) {
            Some(text) => Some((text.into_owned(), encoding)),
            None => {
                report.error(format!("input is not valid {}", encoding.name()), 0);
                None
            }
        }
    }
}

impl ParseEngine for Html5Engine {
    fn parse_document(&self, input: &EngineInput<'_>) -> Option<EngineTree> {
        let mut report = Report::new(input.options);
        let (text, encoding) = Self::decode(input, &mut report)?;

        debug!(
            "parsing document of {} bytes as {} (url: {})",
            input.content.len(),
            encoding.name(),
            input.url.map_or("none", Url::as_str)
        );

        let opts = Self::parse_opts(input.options);
        let recorder = StartTagRecorder::new(ArenaSink::new(report), opts.tree_builder);
        let tokenizer = Tokenizer::new(recorder, opts.tokenizer);

        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(text.as_str()));
        while let TokenizerResult::Script(_) = tokenizer.feed(&queue) {}
        tokenizer.end();

        let (
            SinkOutput {
                mut arena,
                document,
                quirks_mode,
                mut report,
            },
            start_tags,
        ) = tokenizer.sink.finish();

        shaping::shape_document(&mut arena, document, &start_tags, input.options, &mut report);

        Some(EngineTree {
            arena,
            root: document,
            quirks_mode,
            diagnostics: report.into_diagnostics(),
            encoding,
        })
    }

    fn parse_fragment(&self, input: &EngineInput<'_>, context: &str) -> Option<EngineTree> {
        let mut report = Report::new(input.options);
        let (text, encoding) = Self::decode(input, &mut report)?;

        debug!(
            "parsing fragment of {} bytes as {} in <{context}>",
            input.content.len(),
            encoding.name()
        );

        let context_name = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(context));
        let sink = ArenaSink::new(report);
        let SinkOutput {
            mut arena,
            document,
            quirks_mode,
            report,
        } = html5ever::parse_fragment(sink, Self::parse_opts(input.options), context_name, Vec::new())
            .one(StrTendril::from(text.as_str()));

        // The tree builder puts the fragment content below an <html> element in the document
        let container = arena
            .node_ref(document)?
            .children()
            .iter()
            .copied()
            .find(|&id| arena.node_ref(id).and_then(NodeImpl::get_element_data).is_some())?;

        shaping::shape_fragment(&mut arena, container, input.options);

        Some(EngineTree {
            arena,
            root: container,
            quirks_mode,
            diagnostics: report.into_diagnostics(),
            encoding,
        })
    }
}

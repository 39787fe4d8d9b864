use crate::ast::SyntaxNode;
use crate::diagnostics::{Position, SourceRange};
use crate::error::LintResult;
use crate::html::inline_scripts;
use crate::parser::parse_script;

/// What kind of file a document was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Js,
    /// Markup with zero or more inline script blocks.
    Html,
}

/// Feature kinds a document can be queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    JsDocument,
}

/// One parsed script block owned by a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsDocument {
    pub ast: SyntaxNode,
    pub source_range: SourceRange,
}

/// Unit of analysis handed to lint rules. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    url: String,
    kind: DocumentKind,
    source_range: SourceRange,
    features: Vec<JsDocument>,
}

impl Document {
    /// A standalone JavaScript file: exactly one script feature covering it.
    pub fn from_js(url: impl Into<String>, source: &str) -> LintResult<Self> {
        DocumentBuilder::new(url, DocumentKind::Js)
            .script(source, Position::default())
            .map(DocumentBuilder::build)
    }

    /// An element file: one script feature per inline JavaScript block, with
    /// the document range covering all of the markup.
    pub fn from_html(url: impl Into<String>, markup: &str) -> LintResult<Self> {
        let mut builder = DocumentBuilder::new(url, DocumentKind::Html);
        for block in inline_scripts(markup)? {
            builder = builder.script(block.source, block.start)?;
        }
        Ok(builder.extend_to(end_of(markup)).build())
    }

    /// A document without any script features.
    pub fn empty(url: impl Into<String>, kind: DocumentKind) -> Self {
        DocumentBuilder::new(url, kind).build()
    }

    pub fn builder(url: impl Into<String>, kind: DocumentKind) -> DocumentBuilder {
        DocumentBuilder::new(url, kind)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn source_range(&self) -> SourceRange {
        self.source_range
    }

    /// Features of the requested kind, in document order.
    pub fn features(&self, kind: FeatureKind) -> impl Iterator<Item = &JsDocument> + '_ {
        match kind {
            FeatureKind::JsDocument => self.features.iter(),
        }
    }
}

/// Incrementally assembles a [`Document`] from its script blocks.
#[derive(Debug)]
pub struct DocumentBuilder {
    url: String,
    kind: DocumentKind,
    end: Position,
    features: Vec<JsDocument>,
}

impl DocumentBuilder {
    fn new(url: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            url: url.into(),
            kind,
            end: Position::default(),
            features: Vec::new(),
        }
    }

    /// Parse `source` as a script block starting at `start` in the document.
    pub fn script(mut self, source: &str, start: Position) -> LintResult<Self> {
        let ast = parse_script(source, start)?;
        let source_range = SourceRange::new(start, end_of(source).offset_by(start));
        self.end = self.end.max(source_range.end);
        self.features.push(JsDocument { ast, source_range });
        Ok(self)
    }

    /// Extend the document's range past its last script block, e.g. to
    /// cover trailing markup.
    #[must_use]
    pub fn extend_to(mut self, end: Position) -> Self {
        self.end = self.end.max(end);
        self
    }

    pub fn build(self) -> Document {
        Document {
            url: self.url,
            kind: self.kind,
            source_range: SourceRange::new(Position::default(), self.end),
            features: self.features,
        }
    }
}

fn end_of(source: &str) -> Position {
    let line = source.matches('\n').count();
    let column = source.rsplit('\n').next().map_or(0, str::len);
    Position::new(line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_document_has_single_feature_covering_source() {
        let doc = Document::from_js("el.js", "a();\nbc();").expect("parse");
        let features: Vec<_> = doc.features(FeatureKind::JsDocument).collect();
        assert_eq!(features.len(), 1);
        assert_eq!(
            features[0].source_range,
            SourceRange::new(Position::new(0, 0), Position::new(1, 5))
        );
        assert_eq!(doc.source_range(), features[0].source_range);
    }

    #[test]
    fn empty_document_has_no_features() {
        let doc = Document::empty("el.html", DocumentKind::Html);
        assert_eq!(doc.features(FeatureKind::JsDocument).count(), 0);
    }

    #[test]
    fn html_document_collects_inline_scripts() {
        let markup = "<dom-module>\n  <script>a();</script>\n</dom-module>\n<script>b();</script>\n";
        let doc = Document::from_html("x-a.html", markup).expect("parse");

        assert_eq!(doc.kind(), DocumentKind::Html);
        let starts: Vec<_> = doc
            .features(FeatureKind::JsDocument)
            .map(|f| f.source_range.start)
            .collect();
        assert_eq!(starts, vec![Position::new(1, 10), Position::new(3, 8)]);
        assert_eq!(doc.source_range().end, Position::new(4, 0));
    }

    #[test]
    fn html_without_scripts_is_an_empty_document() {
        let doc = Document::from_html("index.html", "<p>hi</p>").expect("parse");
        assert_eq!(doc.features(FeatureKind::JsDocument).count(), 0);
        assert_eq!(doc.source_range().end, Position::new(0, 9));
    }

    #[test]
    fn inline_scripts_keep_document_order_and_offsets() {
        let doc = Document::builder("el.html", DocumentKind::Html)
            .script("a();", Position::new(2, 8))
            .and_then(|b| b.script("b();\nc();", Position::new(6, 8)))
            .expect("parse")
            .extend_to(Position::new(9, 0))
            .build();

        let ranges: Vec<_> = doc
            .features(FeatureKind::JsDocument)
            .map(|f| f.source_range)
            .collect();
        assert_eq!(
            ranges,
            vec![
                SourceRange::new(Position::new(2, 8), Position::new(2, 12)),
                SourceRange::new(Position::new(6, 8), Position::new(7, 4)),
            ]
        );
        assert!(
            ranges
                .iter()
                .all(|range| doc.source_range().contains(range))
        );
    }
}

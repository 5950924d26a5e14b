//! Stockroom HTML Parser
//!
//! HTML5 parser built on html5ever, producing `stockroom_dom::Document`s
//! from server-rendered inventory pages.

mod parser;

pub use parser::HtmlParser;
pub use stockroom_dom::Document;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build DOM: {0}")]
    Dom(#[from] stockroom_dom::DomError),
}

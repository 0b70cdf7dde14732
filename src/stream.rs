//! Incremental XML parsing
//!
//! [`ElementStream`] walks a quick-xml event stream in a single forward pass
//! and yields one completed [`Element`] subtree per occurrence of a
//! designated tag. Content outside the designated subtrees is never
//! accumulated, so memory stays bounded by the largest single subtree plus
//! constant reader state regardless of how many subtrees the document holds.

use crate::element::Element;
use crate::error::{Error, ParseError, Result};
use crate::limits::Limits;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Streaming parser yielding designated-tag subtrees in document order
///
/// Between subtrees only a depth counter is kept; inside a subtree an
/// explicit stack of open frames is built and handed off whole when the
/// designated tag closes. A designated tag nested inside an open subtree is
/// treated as an ordinary child and only the outermost occurrence is
/// yielded.
pub struct ElementStream<R: BufRead> {
    reader: Reader<R>,
    /// Event buffer, reused across subtrees
    buf: Vec<u8>,
    /// Open frames of the subtree under construction, root frame first
    stack: Vec<Element>,
    designated: String,
    limits: Limits,
    /// Open-element depth outside any designated subtree
    outer_depth: usize,
    /// Elements seen so far in the subtree under construction
    subtree_elements: usize,
    seen_content: bool,
    finished: bool,
}

impl<R: BufRead> ElementStream<R> {
    /// Create a stream over `input`, yielding subtrees rooted at `tag`
    pub fn new(input: R, tag: impl Into<String>) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.trim_text(true);

        Self {
            reader,
            buf: Vec::new(),
            stack: Vec::new(),
            designated: tag.into(),
            limits: Limits::default(),
            outer_depth: 0,
            subtree_elements: 0,
            seen_content: false,
            finished: false,
        }
    }

    /// Replace the resource limits applied during the parse
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the designated tag name
    pub fn designated_tag(&self) -> &str {
        &self.designated
    }

    fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn parse_error(&self, message: impl Into<String>) -> Error {
        Error::Parse(ParseError::new(message).with_position(self.position()))
    }

    fn fail(&mut self, err: Error) -> Option<Result<Element>> {
        self.finished = true;
        Some(Err(err))
    }

    /// Build an element from a start tag, attributes in source order
    fn open_element(&self, start: &BytesStart) -> Result<Element> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| self.parse_error(format!("invalid element name: {}", e)))?
            .to_string();

        let mut element = Element::new(name);

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| self.parse_error(format!("failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| self.parse_error(format!("invalid attribute name: {}", e)))?
                .to_string();

            let attr_value = attr
                .unescape_value()
                .map_err(|e| self.parse_error(format!("failed to unescape attribute value: {}", e)))?
                .to_string();

            element.attributes.insert(attr_name, attr_value);
        }

        self.limits.check_attributes(element.attributes.len())?;

        Ok(element)
    }

    /// Open a frame or attach a leaf for a start/empty tag inside a subtree
    fn enter_element(&mut self, start: &BytesStart) -> Result<Element> {
        self.limits
            .check_depth(self.outer_depth + self.stack.len() + 1)?;
        let element = self.open_element(start)?;
        self.subtree_elements += 1;
        self.limits.check_subtree_elements(self.subtree_elements)?;
        Ok(element)
    }

    /// Attach a text fragment to the innermost open frame
    fn push_text(&mut self, text: &str) {
        if let Some(current) = self.stack.last_mut() {
            if !text.trim().is_empty() {
                current.set_leading_text(text.to_string());
            }
        }
    }

    /// Advance the reader until a subtree completes, an error occurs, or the
    /// document ends
    fn advance(&mut self, buf: &mut Vec<u8>) -> Option<Result<Element>> {
        loop {
            buf.clear();
            let event = match self.reader.read_event_into(buf) {
                Ok(event) => event,
                Err(e) => {
                    let err = self.parse_error(format!("malformed XML: {}", e));
                    return self.fail(err);
                }
            };

            match event {
                Event::Start(e) => {
                    self.seen_content = true;

                    let inside_subtree =
                        !self.stack.is_empty() || e.name().as_ref() == self.designated.as_bytes();

                    if inside_subtree {
                        match self.enter_element(&e) {
                            Ok(element) => self.stack.push(element),
                            Err(err) => return self.fail(err),
                        }
                    } else {
                        if let Err(err) =
                            self.limits.check_depth(self.outer_depth + 1)
                        {
                            return self.fail(err);
                        }
                        self.outer_depth += 1;
                    }
                }
                Event::Empty(e) => {
                    self.seen_content = true;

                    let inside_subtree =
                        !self.stack.is_empty() || e.name().as_ref() == self.designated.as_bytes();
                    if !inside_subtree {
                        continue;
                    }

                    let element = match self.enter_element(&e) {
                        Ok(element) => element,
                        Err(err) => return self.fail(err),
                    };

                    match self.stack.last_mut() {
                        Some(parent) => parent.add_child(element),
                        // A self-closing designated tag is a complete subtree
                        None => {
                            self.subtree_elements = 0;
                            return Some(Ok(element));
                        }
                    }
                }
                Event::End(_) => match self.stack.pop() {
                    Some(closed) => match self.stack.last_mut() {
                        Some(parent) => parent.add_child(closed),
                        None => {
                            // Designated tag closed: hand the subtree off
                            self.subtree_elements = 0;
                            return Some(Ok(closed));
                        }
                    },
                    None => {
                        self.outer_depth = self.outer_depth.saturating_sub(1);
                    }
                },
                Event::Text(e) => match e.unescape() {
                    Ok(text) => self.push_text(&text),
                    Err(e) => {
                        let err = self.parse_error(format!("failed to unescape text: {}", e));
                        return self.fail(err);
                    }
                },
                Event::CData(e) => {
                    // CDATA carries no escaping; treat it as plain text
                    match std::str::from_utf8(&e) {
                        Ok(text) => {
                            let text = text.to_string();
                            self.push_text(&text);
                        }
                        Err(e) => {
                            let err = self.parse_error(format!("invalid UTF-8 in CDATA: {}", e));
                            return self.fail(err);
                        }
                    }
                }
                Event::Eof => {
                    self.finished = true;

                    if !self.stack.is_empty() {
                        return Some(Err(self.parse_error(format!(
                            "unexpected end of stream inside <{}> element",
                            self.stack[0].tag()
                        ))));
                    }
                    if self.outer_depth > 0 {
                        return Some(Err(self.parse_error(
                            "unexpected end of stream: unclosed ancestor element",
                        )));
                    }
                    if !self.seen_content {
                        return Some(Err(
                            self.parse_error("empty input: no XML content found")
                        ));
                    }
                    return None;
                }
                // Declarations, comments and processing instructions are skipped
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for ElementStream<R> {
    type Item = Result<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        // The event buffer is taken out for the duration of the walk so
        // events may borrow it while frames move through `self`
        let mut buf = std::mem::take(&mut self.buf);
        let item = self.advance(&mut buf);
        buf.clear();
        self.buf = buf;
        item
    }
}

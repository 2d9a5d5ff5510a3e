//! Streaming extraction of element text from the SDN XML document.
//!
//! [`TextWalker`] yields, in document order, the direct text of every element
//! (the text between its start tag and its first child or end tag; text that
//! follows a child element is ignored). Elements whose local name ends with
//! the coded-value marker (e.g. `<Value>`, `<DetailValue>`) are skipped. Each
//! text is boundary-trimmed and only non-empty results are produced.
//!
//! The walker never expands DTD entities: a DOCTYPE that declares entities is
//! rejected outright and references to unknown entities fail the parse. Any
//! error ends the sequence.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::errors::{BlocklistError, Result};
use crate::tokenizer::trim_boundary;

/// Lazy, non-restartable sequence of element texts.
pub struct TextWalker<'a> {
    reader: Reader<&'a [u8]>,
    coded_value_suffix: &'a str,
    open: Option<OpenText>,
    depth: usize,
    seen_root: bool,
    finished: bool,
}

/// Text collected for the most recently opened element.
struct OpenText {
    coded: bool,
    text: String,
}

enum Step {
    Yield(String),
    Continue,
    Done,
}

/// Walk `xml`, skipping elements whose local name ends with `coded_value_suffix`.
pub fn leaf_texts<'a>(xml: &'a str, coded_value_suffix: &'a str) -> TextWalker<'a> {
    TextWalker::new(xml, coded_value_suffix)
}

impl<'a> TextWalker<'a> {
    pub fn new(xml: &'a str, coded_value_suffix: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
            coded_value_suffix,
            open: None,
            depth: 0,
            seen_root: false,
            finished: false,
        }
    }

    fn step(&mut self) -> Result<Step> {
        let event = self
            .reader
            .read_event()
            .map_err(|e| self.parse_error(e))?;

        match event {
            Event::Start(start) => {
                self.check_single_root()?;
                let flushed = self.flush();
                self.depth += 1;
                self.seen_root = true;
                self.open = Some(OpenText {
                    coded: self.is_coded(start.local_name().as_ref()),
                    text: String::new(),
                });
                Ok(flushed.map_or(Step::Continue, Step::Yield))
            }
            Event::Empty(_) => {
                self.check_single_root()?;
                self.seen_root = true;
                Ok(self.flush().map_or(Step::Continue, Step::Yield))
            }
            Event::End(_) => {
                if self.depth == 0 {
                    return Err(self.parse_error("end tag without a matching start tag"));
                }
                self.depth -= 1;
                Ok(self.flush().map_or(Step::Continue, Step::Yield))
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| self.parse_error(e))?;
                self.push_text(&text)?;
                Ok(Step::Continue)
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata).into_owned();
                self.push_text(&text)?;
                Ok(Step::Continue)
            }
            Event::DocType(doctype) => {
                if String::from_utf8_lossy(&doctype).contains("<!ENTITY") {
                    return Err(BlocklistError::EntitiesForbidden);
                }
                Ok(Step::Continue)
            }
            Event::Eof => {
                if self.depth > 0 {
                    return Err(self.parse_error("unclosed element at end of document"));
                }
                if !self.seen_root {
                    return Err(self.parse_error("no element found"));
                }
                Ok(Step::Done)
            }
            _ => Ok(Step::Continue),
        }
    }

    fn check_single_root(&self) -> Result<()> {
        if self.depth == 0 && self.seen_root {
            return Err(self.parse_error("junk after document element"));
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) -> Result<()> {
        if self.depth == 0 {
            if !text.trim().is_empty() {
                return Err(self.parse_error("text outside the document element"));
            }
            return Ok(());
        }
        if let Some(open) = self.open.as_mut() {
            open.text.push_str(text);
        }
        Ok(())
    }

    /// Close the pending element text, returning it if it should be yielded.
    fn flush(&mut self) -> Option<String> {
        let open = self.open.take()?;
        if open.coded {
            return None;
        }
        let trimmed = trim_boundary(&open.text);
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn is_coded(&self, local_name: &[u8]) -> bool {
        local_name.ends_with(self.coded_value_suffix.as_bytes())
    }

    fn parse_error(&self, reason: impl std::fmt::Display) -> BlocklistError {
        BlocklistError::xml_parse(self.reader.buffer_position() as u64, reason.to_string())
    }
}

impl Iterator for TextWalker<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            match self.step() {
                Ok(Step::Yield(text)) => return Some(Ok(text)),
                Ok(Step::Continue) => continue,
                Ok(Step::Done) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

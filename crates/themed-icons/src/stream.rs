//! Forward-only element stream over mapping documents.
//!
//! The stream reduces an XML document to start and end events for elements,
//! annotating each with its nesting depth. Depth is tracked here rather than
//! taken from the underlying parser: the root element's start tag has depth 1,
//! its children depth 2, and an end event carries the depth of the element it
//! closes.
//!
//! ```ignore
//! use themed_icons::stream::{ElementStream, ElementEvent};
//!
//! let mut stream = ElementStream::from_str(r#"<icons><icon package="a"/></icons>"#);
//! while let Some(event) = stream.next_event()? {
//!     if let ElementEvent::Start(element) = event {
//!         println!("{} at depth {}", element.name(), element.depth());
//!     }
//! }
//! ```

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// A start tag with its attributes, kept in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    depth: usize,
}

impl Element {
    /// Create an element directly, for event sources other than
    /// [`ElementStream`].
    pub fn new<K, V>(
        name: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, V)>,
        depth: usize,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            depth,
        }
    }

    /// The tag name as written, including any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tag name without a namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Nesting depth of this element (the root element is at depth 1).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Look up an attribute value.
    ///
    /// An exact match wins; otherwise the first prefixed attribute whose
    /// local name matches is accepted, so `drawable` also finds
    /// `android:drawable`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .or_else(|| {
                self.attributes
                    .iter()
                    .find(|(key, _)| local_name(key) == name)
            })
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over all attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Events emitted by [`ElementStream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementEvent {
    /// An element was opened.
    Start(Element),
    /// An element was closed.
    End { name: String, depth: usize },
}

impl ElementEvent {
    /// Depth of the element this event belongs to.
    pub fn depth(&self) -> usize {
        match self {
            ElementEvent::Start(element) => element.depth,
            ElementEvent::End { depth, .. } => *depth,
        }
    }
}

/// A lazy, finite, non-restartable sequence of [`ElementEvent`]s.
///
/// Self-closing elements produce a `Start` immediately followed by an `End`.
/// Text, comments, declarations, processing instructions and doctypes are
/// skipped. Reaching the end of input while elements are still open is a
/// parse error. After the first error or the end of the document the stream
/// yields nothing more.
pub struct ElementStream<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    depth: usize,
    pending_end: Option<String>,
    finished: bool,
}

impl<'a> ElementStream<&'a [u8]> {
    /// Creates a stream over document text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &'a str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl<R: BufRead> ElementStream<R> {
    /// Creates a stream from a buffered source.
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(true);
        ElementStream {
            reader,
            buf: Vec::new(),
            depth: 0,
            pending_end: None,
            finished: false,
        }
    }

    /// Current nesting depth (0 outside the root element).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Reads the next element event.
    ///
    /// Returns `None` once the document has ended.
    pub fn next_event(&mut self) -> Result<Option<ElementEvent>> {
        if self.finished {
            return Ok(None);
        }
        let result = self.read_event();
        if matches!(result, Err(_) | Ok(None)) {
            self.finished = true;
        }
        result
    }

    fn read_event(&mut self) -> Result<Option<ElementEvent>> {
        if let Some(name) = self.pending_end.take() {
            let depth = self.depth;
            self.depth -= 1;
            return Ok(Some(ElementEvent::End { name, depth }));
        }

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    return Err(Error::parse(
                        e.to_string(),
                        self.reader.buffer_position() as u64,
                    ));
                }
            };

            match event {
                Event::Start(start) => {
                    self.depth += 1;
                    let position = self.reader.buffer_position() as u64;
                    let element = read_element(&start, self.depth, position)?;
                    return Ok(Some(ElementEvent::Start(element)));
                }
                Event::Empty(empty) => {
                    self.depth += 1;
                    let position = self.reader.buffer_position() as u64;
                    let element = read_element(&empty, self.depth, position)?;
                    self.pending_end = Some(element.name.clone());
                    return Ok(Some(ElementEvent::Start(element)));
                }
                Event::End(end) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    let depth = self.depth;
                    self.depth = self.depth.saturating_sub(1);
                    return Ok(Some(ElementEvent::End { name, depth }));
                }
                Event::Eof => {
                    if self.depth > 0 {
                        return Err(Error::parse(
                            format!(
                                "unexpected end of document with {} unclosed element(s)",
                                self.depth
                            ),
                            self.reader.buffer_position() as u64,
                        ));
                    }
                    return Ok(None);
                }
                _ => continue,
            }
        }
    }
}

impl<R: BufRead> Iterator for ElementStream<R> {
    type Item = Result<ElementEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

/// Builds an [`Element`] from a start tag, unescaping attribute values.
fn read_element(start: &BytesStart<'_>, depth: usize, position: u64) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::parse(e.to_string(), position))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::parse(e.to_string(), position))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        depth,
    })
}

/// Strips a namespace prefix from a qualified name.
fn local_name(name: &str) -> &str {
    match name.split_once(':') {
        Some((_, local)) => local,
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(xml: &str) -> Vec<ElementEvent> {
        ElementStream::from_str(xml)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_depth_tracking() {
        let events = collect(r#"<icons><group><icon package="a"/></group></icons>"#);
        let depths: Vec<usize> = events.iter().map(ElementEvent::depth).collect();
        assert_eq!(depths, vec![1, 2, 3, 3, 2, 1]);
    }

    #[test]
    fn test_empty_element_emits_start_and_end() {
        let events = collect(r#"<icons><icon package="a" drawable="@drawable/x"/></icons>"#);
        assert_eq!(events.len(), 4);
        match &events[1] {
            ElementEvent::Start(element) => {
                assert_eq!(element.name(), "icon");
                assert_eq!(element.attribute("package"), Some("a"));
                assert_eq!(element.attribute("drawable"), Some("@drawable/x"));
            }
            other => panic!("expected start, got {other:?}"),
        }
        assert_eq!(
            events[2],
            ElementEvent::End {
                name: "icon".to_string(),
                depth: 2,
            }
        );
    }

    #[test]
    fn test_skips_text_and_comments() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
            <!-- generated -->
            <icons>
                text
                <icon package="a"/>
            </icons>"#;
        let events = collect(xml);
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_prefixed_attribute_fallback() {
        let events = collect(r#"<icons xmlns:android="x"><icon android:drawable="@drawable/y"/></icons>"#);
        let ElementEvent::Start(element) = &events[1] else {
            panic!("expected start");
        };
        assert_eq!(element.attribute("drawable"), Some("@drawable/y"));
        assert_eq!(element.attribute("android:drawable"), Some("@drawable/y"));
        assert_eq!(element.attribute("package"), None);
    }

    #[test]
    fn test_local_name() {
        let events = collect(r#"<res:icons xmlns:res="x"/>"#);
        let ElementEvent::Start(element) = &events[0] else {
            panic!("expected start");
        };
        assert_eq!(element.name(), "res:icons");
        assert_eq!(element.local_name(), "icons");
    }

    #[test]
    fn test_unclosed_document_is_error() {
        let mut stream = ElementStream::from_str(r#"<icons><icon package="a"/>"#);
        let mut saw_error = false;
        while let Some(event) = stream.next() {
            if event.is_err() {
                saw_error = true;
            }
        }
        assert!(saw_error);
    }

    #[test]
    fn test_mismatched_end_is_error_and_fuses() {
        let mut stream = ElementStream::from_str("<icons><icon></icons>");
        let results: Vec<_> = stream.by_ref().collect();
        assert!(results.last().unwrap().is_err());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_empty_input_has_no_events() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let events = collect(r#"<icons><icon package="com.a&amp;b" drawable="&#64;drawable/x"/></icons>"#);
        let ElementEvent::Start(element) = &events[1] else {
            panic!("expected start");
        };
        assert_eq!(element.attribute("package"), Some("com.a&b"));
        assert_eq!(element.attribute("drawable"), Some("@drawable/x"));
    }

    #[test]
    fn test_unknown_entity_is_error() {
        let results: Vec<_> = ElementStream::from_str(r#"<icons><icon package="&bogus;"/></icons>"#).collect();
        assert!(results.iter().any(|r| matches!(r, Err(Error::Parse { .. }))));
    }

    #[test]
    fn test_local_name_fallback_follows_document_order() {
        let events = collect(
            r#"<icons xmlns:a="x" xmlns:b="y"><icon b:drawable="@drawable/first" a:drawable="@drawable/second"/></icons>"#,
        );
        let ElementEvent::Start(element) = &events[1] else {
            panic!("expected start");
        };
        assert_eq!(element.attribute("drawable"), Some("@drawable/first"));
        let keys: Vec<&str> = element.attributes().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b:drawable", "a:drawable"]);
    }
}

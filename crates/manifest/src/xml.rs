//! Small helpers over quick-xml events shared by both parsers.

use quick_xml::events::{BytesCData, BytesStart, BytesText};

/// Get a non-namespaced attribute, unescaped
pub(crate) fn get_attr(e: &BytesStart, name: &str) -> Result<Option<String>, quick_xml::Error> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Text collected for the element currently being read.
///
/// `F` identifies which element the text belongs to; text outside a tracked
/// element is dropped.
pub(crate) struct ElementText<F> {
    field: Option<F>,
    text: String,
}

impl<F: Copy + PartialEq> ElementText<F> {
    pub(crate) fn new() -> Self {
        Self {
            field: None,
            text: String::new(),
        }
    }

    pub(crate) fn begin(&mut self, field: F) {
        self.field = Some(field);
        self.text.clear();
    }

    pub(crate) fn push_text(&mut self, t: &BytesText) -> Result<(), quick_xml::Error> {
        if self.field.is_some() {
            self.text.push_str(&t.unescape()?);
        }
        Ok(())
    }

    pub(crate) fn push_cdata(&mut self, c: &BytesCData) {
        if self.field.is_some() {
            self.text.push_str(&String::from_utf8_lossy(c));
        }
    }

    /// Close `field`, returning its trimmed text if it was the one open
    pub(crate) fn end(&mut self, field: F) -> Option<String> {
        if self.field == Some(field) {
            self.field = None;
            Some(self.text.trim().to_string())
        } else {
            None
        }
    }
}

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

use crate::core::KsefError;

/// Encoded document: UTF-8 bytes including the XML declaration.
pub type XmlResult = Result<Vec<u8>, KsefError>;

fn xml_io(e: std::io::Error) -> KsefError {
    KsefError::EncodingFailure(format!("XML write error: {e}"))
}

/// Streaming element writer. Elements are emitted in call order.
pub(crate) struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub(crate) fn new() -> Result<Self, KsefError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }

    pub(crate) fn start_element(&mut self, name: &str) -> Result<&mut Self, KsefError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub(crate) fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, KsefError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub(crate) fn end_element(&mut self, name: &str) -> Result<&mut Self, KsefError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    /// `<name/>`: present but without content.
    pub(crate) fn empty_element(&mut self, name: &str) -> Result<&mut Self, KsefError> {
        self.writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub(crate) fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, KsefError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    pub(crate) fn text_element_with_attrs(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, KsefError> {
        self.start_element_with_attrs(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Text element when `text` is present, empty element otherwise.
    pub(crate) fn optional_text_element(
        &mut self,
        name: &str,
        text: Option<&str>,
    ) -> Result<&mut Self, KsefError> {
        match text {
            Some(text) => self.text_element(name, text),
            None => self.empty_element(name),
        }
    }
}

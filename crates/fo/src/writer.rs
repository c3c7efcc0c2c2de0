//! A thin wrapper over `quick_xml::Writer` with the helpers the generators need.

use crate::error::GenerateError;
use quick_xml::Writer;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use std::borrow::Cow;

pub const FO_NS: &str = "http://www.w3.org/1999/XSL/Format";
pub const FOX_NS: &str = "http://xmlgraphics.apache.org/fop/extensions";

/// An ordered attribute list. Later pushes of the same name replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoAttrs(Vec<(&'static str, String)>);

impl FoAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn push_opt<T>(&mut self, name: &'static str, value: Option<T>, f: impl FnOnce(T) -> String) {
        if let Some(v) = value {
            self.push(name, f(v));
        }
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(n, v)| (*n, v.as_str()))
    }
}

/// Attribute values keep apostrophes literal so `url('...')` reads as written.
fn attribute<'a>(key: &'a str, value: &'a str) -> Attribute<'a> {
    let value = if value.contains(['&', '<', '"']) {
        Cow::Owned(
            value
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('"', "&quot;")
                .into_bytes(),
        )
    } else {
        Cow::Borrowed(value.as_bytes())
    };
    Attribute {
        key: QName(key.as_bytes()),
        value,
    }
}

pub struct FoWriter {
    inner: Writer<Vec<u8>>,
}

impl FoWriter {
    pub fn new(pretty: bool) -> Self {
        let inner = if pretty {
            Writer::new_with_indent(Vec::new(), b' ', 2)
        } else {
            Writer::new(Vec::new())
        };
        Self { inner }
    }

    pub fn declaration(&mut self) -> Result<(), GenerateError> {
        self.inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    fn element<'a>(name: &'a str, attrs: &'a FoAttrs) -> BytesStart<'a> {
        let mut start = BytesStart::new(name);
        for (key, value) in attrs.iter() {
            start.push_attribute(attribute(key, value));
        }
        start
    }

    pub fn start(&mut self, name: &str, attrs: &FoAttrs) -> Result<(), GenerateError> {
        self.inner.write_event(Event::Start(Self::element(name, attrs)))?;
        Ok(())
    }

    /// Opens an element whose attributes are not all known ahead of time (namespaces).
    pub fn start_raw(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), GenerateError> {
        let mut start = BytesStart::new(name);
        for (key, value) in attrs {
            start.push_attribute(attribute(key, value));
        }
        self.inner.write_event(Event::Start(start))?;
        Ok(())
    }

    pub fn open(&mut self, name: &str) -> Result<(), GenerateError> {
        self.inner.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    pub fn end(&mut self, name: &str) -> Result<(), GenerateError> {
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    pub fn empty(&mut self, name: &str, attrs: &FoAttrs) -> Result<(), GenerateError> {
        self.inner.write_event(Event::Empty(Self::element(name, attrs)))?;
        Ok(())
    }

    /// Escaped character data.
    pub fn text(&mut self, text: &str) -> Result<(), GenerateError> {
        self.inner.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// `<name>text</name>` with no attributes.
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<(), GenerateError> {
        self.open(name)?;
        self.text(text)?;
        self.end(name)
    }

    /// Appends already generated markup verbatim.
    pub fn splice(&mut self, fragment: &[u8]) {
        self.inner.get_mut().extend_from_slice(fragment);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }

    pub fn into_string(self) -> Result<String, GenerateError> {
        Ok(String::from_utf8(self.into_bytes())?)
    }
}

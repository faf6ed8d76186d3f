use std::io::{BufRead, Write};

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};
use rust_decimal::{Decimal, RoundingStrategy};

use super::DATE_FORMAT;
use crate::core::InvoiceError;

/// Deepest element nesting the reader accepts. CII documents stay well
/// below 20 levels.
pub(crate) const MAX_DEPTH: usize = 64;

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn xml_io(e: std::io::Error) -> InvoiceError {
    InvoiceError::Write(format!("XML write error: {e}"))
}

/// Indented XML writer that never emits empty elements or attributes.
pub(crate) struct XmlWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(inner: W) -> Result<Self, InvoiceError> {
        let mut writer = Writer::new_with_indent(inner, b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, InvoiceError> {
        self.start_element_with_attrs(name, &[])
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, InvoiceError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs.iter().filter(|(_, v)| !v.trim().is_empty()) {
            elem.push_attribute((*k, *v));
        }
        self.writer.write_event(Event::Start(elem)).map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, InvoiceError> {
        self.writer.write_event(Event::End(BytesEnd::new(name))).map_err(xml_io)?;
        Ok(self)
    }

    /// Write `<name>text</name>`; blank text writes nothing.
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, InvoiceError> {
        self.text_element_with_attrs(name, text, &[])
    }

    pub fn text_element_with_attrs(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, InvoiceError> {
        if text.trim().is_empty() {
            return Ok(self);
        }
        self.start_element_with_attrs(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Optional text element.
    pub fn opt_element(&mut self, name: &str, text: Option<&str>) -> Result<&mut Self, InvoiceError> {
        match text {
            Some(text) => self.text_element(name, text),
            None => Ok(self),
        }
    }

    /// `<parent><child>text</child></parent>`, skipped when the text is blank.
    pub fn wrapped_element(
        &mut self,
        parent: &str,
        child: &str,
        text: Option<&str>,
    ) -> Result<&mut Self, InvoiceError> {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return Ok(self);
        };
        self.start_element(parent)?;
        self.text_element(child, text)?;
        self.end_element(parent)
    }

    /// Monetary amount with exactly two fractional digits.
    pub fn amount_element(
        &mut self,
        name: &str,
        amount: Decimal,
        currency: Option<&str>,
    ) -> Result<&mut Self, InvoiceError> {
        let text = format_amount(amount);
        match currency {
            Some(c) => self.text_element_with_attrs(name, &text, &[("currencyID", c)]),
            None => self.text_element(name, &text),
        }
    }

    pub fn quantity_element(
        &mut self,
        name: &str,
        quantity: Decimal,
        unit: &str,
    ) -> Result<&mut Self, InvoiceError> {
        self.text_element_with_attrs(name, &format_quantity(quantity), &[("unitCode", unit)])
    }

    /// `<name><{data_type}:{tag} format="102">YYYYMMDD</...></name>`.
    pub fn date_element(
        &mut self,
        name: &str,
        tag: &str,
        date: NaiveDate,
    ) -> Result<&mut Self, InvoiceError> {
        self.start_element(name)?;
        self.text_element_with_attrs(
            tag,
            &date.format("%Y%m%d").to_string(),
            &[("format", DATE_FORMAT)],
        )?;
        self.end_element(name)
    }
}

/// Monetary value: rounded half away from zero, exactly two places.
pub(crate) fn format_amount(d: Decimal) -> String {
    fixed(d, 2)
}

/// Quantity: exactly four places.
pub(crate) fn format_quantity(d: Decimal) -> String {
    fixed(d, 4)
}

/// Percentage rate without trailing zeros ("19", "7.5").
pub(crate) fn format_rate(d: Decimal) -> String {
    d.normalize().to_string()
}

/// Unit price: at least two places, more only when the value carries them.
pub(crate) fn format_price(d: Decimal) -> String {
    let mut v = d.normalize();
    if v.scale() < 2 {
        v.rescale(2);
    }
    v.to_string()
}

fn fixed(d: Decimal, dp: u32) -> String {
    let mut v = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    v.rescale(dp);
    v.to_string()
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// An element of a parsed document, namespace resolved.
#[derive(Debug, Default)]
pub(crate) struct Element {
    pub ns: String,
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed text, `None` when blank.
    pub fn text(&self) -> Option<&str> {
        Some(self.text.trim()).filter(|t| !t.is_empty())
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First element along a path of local names.
    pub fn find(&self, path: &[&str]) -> Option<&Element> {
        path.iter().try_fold(self, |elem, name| elem.child(name))
    }

    /// Trimmed text at the end of `path`, as an owned string.
    pub fn text_at(&self, path: &[&str]) -> Option<String> {
        self.find(path).and_then(Element::text).map(str::to_owned)
    }
}

/// Read a whole document into an element tree.
pub(crate) fn parse_tree<R: BufRead>(input: R) -> Result<Element, InvoiceError> {
    let mut reader = NsReader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (resolved, event) = match reader.read_resolved_event_into(&mut buf) {
            Ok(pair) => pair,
            Err(e) => return Err(InvoiceError::parse(format!("malformed XML: {e}"))),
        };
        let ns = match resolved {
            ResolveResult::Bound(Namespace(uri)) => String::from_utf8_lossy(uri).into_owned(),
            _ => String::new(),
        };

        match event {
            Event::Start(e) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(InvoiceError::parse(format!(
                        "elements nested deeper than {MAX_DEPTH} levels"
                    )));
                }
                stack.push(element(ns, &e)?);
            }
            Event::Empty(e) => {
                let elem = element(ns, &e)?;
                attach(&mut stack, &mut root, elem)?;
            }
            Event::End(_) => {
                let Some(elem) = stack.pop() else {
                    return Err(InvoiceError::parse("unbalanced end tag"));
                };
                attach(&mut stack, &mut root, elem)?;
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| InvoiceError::parse(format!("malformed text: {e}")))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(InvoiceError::parse("unexpected end of document"));
    }
    root.ok_or_else(|| InvoiceError::parse("no root element"))
}

fn element(ns: String, start: &BytesStart<'_>) -> Result<Element, InvoiceError> {
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| InvoiceError::parse(format!("malformed attribute: {e}")))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| InvoiceError::parse(format!("malformed attribute value: {e}")))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(Element {
        ns,
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attrs,
        ..Element::default()
    })
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    elem: Element,
) -> Result<(), InvoiceError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(elem),
        None if root.is_none() => *root = Some(elem),
        None => return Err(InvoiceError::parse("more than one root element")),
    }
    Ok(())
}

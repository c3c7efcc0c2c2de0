use crate::element::Element;
use serde::{Deserialize, Serialize};

/// Descriptive metadata written to the output's declarations block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

impl DocumentMetadata {
    /// The title, if present and not blank.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// A run of pages sharing one page master and one set of header/footer regions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSequence {
    /// Page master name; the sheet's first master when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_master: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<Element>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Vec<Element>>,
    #[serde(default)]
    pub body: Vec<Element>,
}

impl PageSequence {
    pub fn new(page_master: impl Into<String>) -> Self {
        Self {
            page_master: Some(page_master.into()),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, header: Vec<Element>) -> Self {
        self.header = Some(header);
        self
    }

    pub fn with_footer(mut self, footer: Vec<Element>) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn with_body(mut self, body: Vec<Element>) -> Self {
        self.body = body;
        self
    }
}

/// The root of the content tree. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub sequences: Vec<PageSequence>,
}

impl Document {
    /// Every body element of every sequence, depth first.
    pub fn visit_body<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        fn walk<'a>(elements: &'a [Element], visit: &mut impl FnMut(&'a Element)) {
            for element in elements {
                visit(element);
                match element {
                    Element::Section { children, .. } | Element::Part { children, .. } => {
                        walk(children, visit)
                    }
                    Element::List { items, .. } => {
                        for item in items {
                            walk(&item.children, visit);
                        }
                    }
                    Element::Table { table, .. } | Element::LayoutTable { table, .. } => {
                        for cell in table.cells() {
                            walk(&cell.children, visit);
                        }
                    }
                    _ => {}
                }
            }
        }
        for sequence in &self.sequences {
            walk(&sequence.body, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_counts_as_missing() {
        let meta = DocumentMetadata {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(meta.title(), None);
    }

    #[test]
    fn visit_body_reaches_nested_elements() {
        let doc = Document {
            metadata: DocumentMetadata::default(),
            sequences: vec![PageSequence::default().with_body(vec![Element::section(vec![
                Element::headline(1, "A"),
                Element::text("x"),
            ])])],
        };
        let mut count = 0;
        doc.visit_body(&mut |_| count += 1);
        assert_eq!(count, 3);
    }
}

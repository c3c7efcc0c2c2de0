//! Incremental document assembly with heading-level normalization.

use crate::document::{Document, DocumentMetadata, PageSequence};
use crate::element::Element;
use crate::headings::HeadingLevelTracker;

/// Builds a [`Document`], passing every body headline through one
/// [`HeadingLevelTracker`] in document order, across sequences and nested
/// containers. Header and footer content is stored as given.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    metadata: DocumentMetadata,
    sequences: Vec<PageSequence>,
    headings: HeadingLevelTracker,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-assembles an already built (e.g. deserialized) document so its
    /// headings are normalized.
    pub fn import(document: Document) -> Self {
        let mut builder = Self::new().metadata(document.metadata);
        for sequence in document.sequences {
            builder.push_sequence(sequence);
        }
        builder
    }

    pub fn metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.metadata.author = Some(author.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.metadata.subject = Some(subject.into());
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.metadata.keywords.push(keyword.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.metadata.language = Some(language.into());
        self
    }

    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.metadata.creator = Some(creator.into());
        self
    }

    pub fn sequence(mut self, sequence: PageSequence) -> Self {
        self.push_sequence(sequence);
        self
    }

    /// Appends a sequence, normalizing the headlines of its body.
    pub fn push_sequence(&mut self, mut sequence: PageSequence) {
        let body = std::mem::take(&mut sequence.body);
        self.sequences.push(sequence);
        for element in body {
            self.push(element);
        }
    }

    /// Appends a body element to the current sequence, opening a default
    /// sequence if there is none.
    pub fn push(&mut self, mut element: Element) {
        normalize(&mut element, &mut self.headings);
        if self.sequences.is_empty() {
            self.sequences.push(PageSequence::default());
        }
        if let Some(current) = self.sequences.last_mut() {
            current.body.push(element);
        }
    }

    pub fn element(mut self, element: Element) -> Self {
        self.push(element);
        self
    }

    /// Level of the last accepted heading, 0 before the first.
    pub fn last_heading_level(&self) -> u8 {
        self.headings.last_level()
    }

    pub fn build(self) -> Document {
        Document {
            metadata: self.metadata,
            sequences: self.sequences,
        }
    }
}

fn normalize(element: &mut Element, headings: &mut HeadingLevelTracker) {
    match element {
        Element::Headline { level, .. } => *level = headings.next(*level),
        Element::Section { children, .. } | Element::Part { children, .. } => {
            children.iter_mut().for_each(|c| normalize(c, headings));
        }
        Element::List { items, .. } => {
            for item in items {
                item.children.iter_mut().for_each(|c| normalize(c, headings));
            }
        }
        Element::Table { table, .. } | Element::LayoutTable { table, .. } => {
            let sections = table.header.iter_mut().chain(std::iter::once(&mut table.body));
            for section in sections {
                for row in &mut section.rows {
                    for cell in &mut row.cells {
                        cell.children.iter_mut().for_each(|c| normalize(c, headings));
                    }
                }
            }
        }
        Element::Paragraph { .. } | Element::Image { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ListItem, ListOrdering};

    fn levels(doc: &Document) -> Vec<u8> {
        let mut out = Vec::new();
        doc.visit_body(&mut |e| {
            if let Element::Headline { level, .. } = e {
                out.push(*level);
            }
        });
        out
    }

    #[test]
    fn normalizes_across_sequences_and_containers() {
        let doc = DocumentBuilder::new()
            .sequence(PageSequence::default().with_body(vec![Element::headline(2, "A")]))
            .sequence(PageSequence::default().with_body(vec![Element::section(vec![
                Element::headline(4, "B"),
                Element::list(
                    ListOrdering::Ordered,
                    vec![ListItem::new(vec![Element::headline(6, "C")])],
                ),
            ])]))
            .build();
        assert_eq!(levels(&doc), vec![1, 2, 3]);
    }

    #[test]
    fn header_headlines_are_left_alone() {
        let doc = DocumentBuilder::new()
            .sequence(
                PageSequence::new("default")
                    .with_header(vec![Element::headline(5, "Running title")])
                    .with_body(vec![Element::headline(1, "Body")]),
            )
            .build();
        let header = doc.sequences[0].header.as_ref().unwrap();
        assert!(matches!(header[0], Element::Headline { level: 5, .. }));
        assert_eq!(levels(&doc), vec![1]);
    }

    #[test]
    fn push_opens_a_default_sequence() {
        let mut builder = DocumentBuilder::new().title("Report");
        builder.push(Element::headline(1, "One"));
        builder.push(Element::headline(3, "Two"));
        assert_eq!(builder.last_heading_level(), 2);
        let doc = builder.build();
        assert_eq!(doc.sequences.len(), 1);
        assert_eq!(doc.sequences[0].page_master, None);
        assert_eq!(doc.metadata.title(), Some("Report"));
    }

    #[test]
    fn import_normalizes_deserialized_documents() {
        let json = r#"{
            "metadata": { "title": "T" },
            "sequences": [ { "body": [
                { "type": "headline", "level": 1, "content": [] },
                { "type": "headline", "level": 2, "content": [] },
                { "type": "headline", "level": 4, "content": [] },
                { "type": "headline", "level": 3, "content": [] },
                { "type": "headline", "level": 1, "content": [] }
            ] } ]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        let doc = DocumentBuilder::import(doc).build();
        assert_eq!(levels(&doc), vec![1, 2, 3, 3, 1]);
    }
}

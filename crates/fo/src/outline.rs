//! Turns the flat, ordered heading list into a nested bookmark tree.
//!
//! Levels are expected to be continuous already (see
//! `folio_idf::HeadingLevelTracker`); no re-checking happens here.

use crate::error::GenerateError;
use crate::writer::{FoAttrs, FoWriter};
use folio_types::Heading;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineEvent<'a> {
    Open(&'a Heading),
    Close,
}

/// The open/close sequence for `headings`. Every entry opened is closed.
pub fn outline_events(headings: &[Heading]) -> Vec<OutlineEvent<'_>> {
    let mut events = Vec::with_capacity(headings.len() * 2);
    let mut last_level = 0u8;
    for heading in headings {
        debug_assert!(
            (1..=last_level.saturating_add(1)).contains(&heading.level),
            "heading level {} after {} is not continuous",
            heading.level,
            last_level
        );
        let closes = if last_level == 0 || heading.level > last_level {
            0
        } else {
            last_level - heading.level + 1
        };
        events.extend((0..closes).map(|_| OutlineEvent::Close));
        events.push(OutlineEvent::Open(heading));
        last_level = heading.level;
    }
    events.extend((0..last_level).map(|_| OutlineEvent::Close));
    events
}

/// Writes `fo:bookmark-tree`. Nothing is written when there are no headings.
pub fn write_bookmark_tree(out: &mut FoWriter, headings: &[Heading]) -> Result<(), GenerateError> {
    if headings.is_empty() {
        return Ok(());
    }
    out.open("fo:bookmark-tree")?;
    for event in outline_events(headings) {
        match event {
            OutlineEvent::Open(heading) => {
                out.start(
                    "fo:bookmark",
                    &FoAttrs::new().with("internal-destination", heading.id.as_str()),
                )?;
                out.text_element("fo:bookmark-title", &heading.text)?;
            }
            OutlineEvent::Close => out.end("fo:bookmark")?,
        }
    }
    out.end("fo:bookmark-tree")
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_idf::HeadingLevelTracker;
    use proptest::prelude::*;

    fn headings(levels: &[u8]) -> Vec<Heading> {
        levels
            .iter()
            .enumerate()
            .map(|(i, level)| Heading::new(*level, format!("h{}", i), format!("Heading {}", i)))
            .collect()
    }

    #[test]
    fn sibling_and_nested_entries() {
        let hs = headings(&[1, 2, 3, 3, 1]);
        let rendered: String = outline_events(&hs)
            .iter()
            .map(|e| match e {
                OutlineEvent::Open(h) => format!("<{}", h.id),
                OutlineEvent::Close => ">".to_string(),
            })
            .collect();
        assert_eq!(rendered, "<h0<h1<h2><h3>>><h4>");
    }

    #[test]
    fn writes_nested_bookmarks() {
        let mut out = FoWriter::new(false);
        write_bookmark_tree(&mut out, &headings(&[1, 2])).unwrap();
        assert_eq!(
            out.into_string().unwrap(),
            concat!(
                r#"<fo:bookmark-tree><fo:bookmark internal-destination="h0">"#,
                "<fo:bookmark-title>Heading 0</fo:bookmark-title>",
                r#"<fo:bookmark internal-destination="h1">"#,
                "<fo:bookmark-title>Heading 1</fo:bookmark-title>",
                "</fo:bookmark></fo:bookmark></fo:bookmark-tree>"
            )
        );
    }

    #[test]
    fn empty_outline_writes_nothing() {
        let mut out = FoWriter::new(false);
        write_bookmark_tree(&mut out, &[]).unwrap();
        assert!(out.into_string().unwrap().is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not continuous")]
    fn skipped_levels_are_rejected_in_debug_builds() {
        outline_events(&headings(&[1, 3]));
    }

    proptest! {
        #[test]
        fn opens_and_closes_balance(requested in prop::collection::vec(0u8..9, 0..40)) {
            let mut tracker = HeadingLevelTracker::new();
            let levels: Vec<u8> = requested.iter().map(|l| tracker.next(*l)).collect();
            let hs = headings(&levels);
            let mut depth = 0i32;
            let mut opens = 0;
            for event in outline_events(&hs) {
                match event {
                    OutlineEvent::Open(h) => {
                        opens += 1;
                        depth += 1;
                        prop_assert_eq!(depth, i32::from(h.level));
                    }
                    OutlineEvent::Close => depth -= 1,
                }
                prop_assert!(depth >= 0);
            }
            prop_assert_eq!(opens, hs.len());
            prop_assert_eq!(depth, 0);
        }
    }
}

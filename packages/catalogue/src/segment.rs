//! Entry segmentation.
//!
//! Finds the catalogue region in the paragraph stream and groups its
//! paragraphs into one block per entry, starting a new block at every
//! paragraph that looks like an entry header.

use tracing::{debug, info, warn};

use crate::config::{is_entry_header, RegionMarkers};
use crate::types::{EntryBlock, Paragraph};

/// Splits a paragraph stream into entry blocks.
#[derive(Debug, Clone)]
pub struct Segmenter {
    region: RegionMarkers,
}

impl Segmenter {
    pub fn new(region: RegionMarkers) -> Self {
        Self { region }
    }

    /// Group the paragraphs of the catalogue region into entry blocks.
    ///
    /// Paragraphs before the region-start marker and from the region-end
    /// marker onwards are ignored; the markers themselves and blank
    /// paragraphs never end up in a block.
    pub fn segment(&self, paragraphs: &[Paragraph]) -> Vec<EntryBlock> {
        let mut blocks = Vec::new();
        let mut current = EntryBlock::default();
        let mut in_region = false;

        for paragraph in paragraphs {
            if !in_region {
                if paragraph.text == self.region.start {
                    info!(index = paragraph.index, marker = %self.region.start, "Catalogue region starts");
                    in_region = true;
                }
                continue;
            }

            if paragraph.text == self.region.end {
                info!(index = paragraph.index, marker = %self.region.end, "Catalogue region ends");
                break;
            }

            if paragraph.is_blank() {
                continue;
            }

            if is_entry_header(&paragraph.text) {
                debug!(index = paragraph.index, header = %paragraph.text, "Entry boundary");
                if !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
                current = EntryBlock::new(paragraph.clone());
            } else {
                current.push(paragraph.clone());
            }
        }

        if !current.is_empty() {
            blocks.push(current);
        }

        if !in_region {
            warn!(marker = %self.region.start, "Catalogue region start marker not found");
        }

        blocks
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(RegionMarkers::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::paragraphs_from;
    use pretty_assertions::assert_eq;

    fn block_texts(blocks: &[EntryBlock]) -> Vec<Vec<&str>> {
        blocks.iter().map(EntryBlock::texts).collect()
    }

    #[test]
    fn test_segment_basic() {
        let paragraphs = paragraphs_from([
            "Introduction",
            "Basel 1533",
            "Catalogue",
            "Basel 1533",
            "Euclidis elementorum libri XV",
            "",
            "folio. 15 books",
            "Paris 1543a",
            "Les six premiers livres",
            "Appendices",
            "Leiden 1600",
            "Ignored",
        ]);

        let blocks = Segmenter::default().segment(&paragraphs);

        assert_eq!(
            block_texts(&blocks),
            vec![
                vec!["Basel 1533", "Euclidis elementorum libri XV", "folio. 15 books"],
                vec!["Paris 1543a", "Les six premiers livres"],
            ]
        );
    }

    #[test]
    fn test_segment_keeps_source_indices() {
        let paragraphs = paragraphs_from(["Catalogue", "", "Basel 1533", "title"]);
        let blocks = Segmenter::default().segment(&paragraphs);

        let indices: Vec<usize> = blocks[0].paragraphs.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![2, 3]);
    }

    #[test]
    fn test_segment_without_region_start() {
        let paragraphs = paragraphs_from(["Basel 1533", "title", "Appendices"]);
        assert!(Segmenter::default().segment(&paragraphs).is_empty());
    }

    #[test]
    fn test_segment_flushes_at_end_of_input() {
        let paragraphs = paragraphs_from(["Catalogue", "Basel 1533", "title"]);
        let blocks = Segmenter::default().segment(&paragraphs);
        assert_eq!(block_texts(&blocks), vec![vec!["Basel 1533", "title"]]);
    }

    #[test]
    fn test_segment_leading_text_forms_own_block() {
        let paragraphs = paragraphs_from([
            "Catalogue",
            "Entries are ordered by year.",
            "Basel 1533",
            "title",
        ]);
        let blocks = Segmenter::default().segment(&paragraphs);
        assert_eq!(
            block_texts(&blocks),
            vec![vec!["Entries are ordered by year."], vec!["Basel 1533", "title"]]
        );
    }

    #[test]
    fn test_segment_region_start_seen_once() {
        // A second "Catalogue" paragraph inside the region is ordinary text.
        let paragraphs = paragraphs_from(["Catalogue", "Basel 1533", "Catalogue", "title"]);
        let blocks = Segmenter::default().segment(&paragraphs);
        assert_eq!(
            block_texts(&blocks),
            vec![vec!["Basel 1533", "Catalogue", "title"]]
        );
    }

    #[test]
    fn test_segment_custom_markers() {
        let segmenter = Segmenter::new(RegionMarkers {
            start: "Katalog".to_string(),
            end: "Anhang".to_string(),
        });
        let paragraphs = paragraphs_from(["Katalog", "Köln 1600", "titel", "Anhang", "Basel 1533"]);
        let blocks = segmenter.segment(&paragraphs);
        assert_eq!(block_texts(&blocks), vec![vec!["Köln 1600", "titel"]]);
    }

    #[test]
    fn test_segment_partitions_region() {
        let paragraphs = paragraphs_from([
            "front matter",
            "Catalogue",
            "preface",
            "Basel 1533",
            "a",
            " ",
            "b",
            "Paris 1543a",
            "Lyon 1550",
            "c",
            "Appendices",
            "back matter",
        ]);
        let blocks = Segmenter::default().segment(&paragraphs);

        let assigned: Vec<usize> = blocks
            .iter()
            .flat_map(|b| b.paragraphs.iter().map(|p| p.index))
            .collect();
        let expected: Vec<usize> = paragraphs[2..10]
            .iter()
            .filter(|p| !p.is_blank())
            .map(|p| p.index)
            .collect();

        assert_eq!(assigned, expected);
        assert!(blocks.iter().all(|b| !b.is_empty()));
    }
}

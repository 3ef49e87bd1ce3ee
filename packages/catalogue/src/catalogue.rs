//! Catalogue parsing pipeline.
//!
//! Ties the stages together: paragraphs are segmented into entry blocks,
//! each block is decomposed into fields and classified by language.
//! Blocks that fail extraction are skipped and reported; they never abort
//! the run.

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::CatalogueConfig;
use crate::error::{ParseError, Result};
use crate::extract::FieldExtractor;
use crate::language::{LanguageClassifier, LanguageDetector, LinguaDetector};
use crate::segment::Segmenter;
use crate::source::{open_source, ParagraphSource};
use crate::types::{CatalogueEntry, CatalogueRun, EntryBlock, Paragraph, SkippedEntry};

/// Parses a paragraph sequence into catalogue entries.
#[derive(Debug)]
pub struct CatalogueParser {
    segmenter: Segmenter,
    extractor: FieldExtractor,
    classifier: LanguageClassifier,
    parallel: bool,
}

impl CatalogueParser {
    /// Create a parser using the given detector for language classification.
    pub fn new(config: CatalogueConfig, detector: Box<dyn LanguageDetector>) -> Self {
        Self {
            segmenter: Segmenter::new(config.region),
            extractor: FieldExtractor::new(config.vocabulary),
            classifier: LanguageClassifier::new(detector, config.classifier),
            parallel: false,
        }
    }

    /// Create a parser backed by the `lingua` detector for the configured
    /// candidate languages.
    pub fn with_lingua(config: CatalogueConfig) -> Result<Self> {
        config.validate()?;
        let detector = LinguaDetector::new(&config.classifier.candidates)?;
        Ok(Self::new(config, Box::new(detector)))
    }

    /// Extract entries on the rayon thread pool.
    ///
    /// Output order is document order either way.
    #[must_use]
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Parse one entry block into a classified entry.
    pub fn parse_block(&self, block: &EntryBlock) -> std::result::Result<CatalogueEntry, ParseError> {
        let mut entry = self.extractor.extract(block)?;
        entry.language = self.classifier.classify(&entry.body());
        Ok(entry)
    }

    /// Segment and parse a paragraph sequence.
    pub fn parse_paragraphs(&self, paragraphs: &[Paragraph]) -> CatalogueRun {
        let blocks = self.segmenter.segment(paragraphs);
        info!(blocks = blocks.len(), parallel = self.parallel, "Parsing entry blocks");

        let results: Vec<_> = if self.parallel {
            blocks
                .into_par_iter()
                .map(|block| {
                    let result = self.parse_block(&block);
                    (block, result)
                })
                .collect()
        } else {
            blocks
                .into_iter()
                .map(|block| {
                    let result = self.parse_block(&block);
                    (block, result)
                })
                .collect()
        };

        let mut run = CatalogueRun::default();
        for (block, result) in results {
            match result {
                Ok(entry) => {
                    debug!(key = %entry.key, language = %entry.language, "Parsed entry");
                    run.entries.push(entry);
                }
                Err(error) => {
                    let skipped = SkippedEntry { block, error };
                    warn!(header = %skipped.header_text(), error = %skipped.error, "Skipping entry");
                    debug!(paragraphs = ?skipped.block.texts(), "Skipped entry block");
                    run.skipped.push(skipped);
                }
            }
        }

        info!(
            entries = run.entry_count(),
            skipped = run.skipped_count(),
            "Catalogue parsed"
        );
        run
    }

    /// Read all paragraphs from a source and parse them.
    pub fn parse_source(&self, source: &dyn ParagraphSource) -> Result<CatalogueRun> {
        let paragraphs = source.paragraphs()?;
        Ok(self.parse_paragraphs(&paragraphs))
    }
}

/// Parse the catalogue in a `.docx` or `.txt` file.
///
/// Convenience wrapper that builds a `lingua`-backed parser, so it loads the
/// language models on every call.
pub fn parse_catalogue(path: &Path, config: CatalogueConfig) -> Result<CatalogueRun> {
    let source = open_source(path)?;
    let parser = CatalogueParser::with_lingua(config)?;
    parser.parse_source(source.as_ref())
}

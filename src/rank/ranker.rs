//! End-to-end ranking of a document collection.

use crossbeam_channel::unbounded;

use crate::error::Result;
use crate::model::{CollectionResult, PageSpans, ScoredSection, Sequence};
use crate::outline::HeadingConfig;

use super::aggregate::{CollectionAggregator, RankOptions};
use super::persona::{PersonaProfile, PersonaWeighter, PersonaWeights};
use super::score::{RelevanceScorer, ScoringConfig};
use super::segment::SectionSegmenter;

/// Pages of one document, keyed by its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPages {
    /// Document identifier (its filename)
    pub document_id: String,
    /// Pages in document order
    pub pages: Vec<PageSpans>,
}

impl DocumentPages {
    /// Create a document.
    pub fn new(document_id: impl Into<String>, pages: Vec<PageSpans>) -> Self {
        Self {
            document_id: document_id.into(),
            pages,
        }
    }
}

/// Ranking outcome of one collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedCollection {
    /// Selected sections and their statistics
    pub result: CollectionResult,
    /// Number of sections scored across all documents
    pub total_sections: usize,
    /// Documents that produced at least one section, in input order
    pub contributing_documents: Vec<String>,
}

/// Segments, scores and aggregates the documents of a collection.
///
/// Documents are processed independently (in parallel by default) and merged
/// by document index, so the result never depends on completion order.
#[derive(Debug, Clone)]
pub struct CollectionRanker {
    heading: HeadingConfig,
    weighter: PersonaWeighter,
    scorer: RelevanceScorer,
    aggregator: CollectionAggregator,
    parallel: bool,
}

impl Default for CollectionRanker {
    fn default() -> Self {
        Self {
            heading: HeadingConfig::default(),
            weighter: PersonaWeighter::default(),
            scorer: RelevanceScorer::default(),
            aggregator: CollectionAggregator::default(),
            parallel: true,
        }
    }
}

impl CollectionRanker {
    /// Create a ranker with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading configuration used for segmentation.
    pub fn with_heading_config(mut self, config: HeadingConfig) -> Self {
        self.heading = config;
        self
    }

    /// Set the persona keyword weights.
    pub fn with_persona_weights(mut self, weights: PersonaWeights) -> Self {
        self.weighter = PersonaWeighter::new(weights);
        self
    }

    /// Set the scoring constants.
    pub fn with_scoring(mut self, config: ScoringConfig) -> Self {
        self.scorer = RelevanceScorer::new(config);
        self
    }

    /// Set the selection options.
    pub fn with_rank_options(mut self, options: RankOptions) -> Self {
        self.aggregator = CollectionAggregator::new(options);
        self
    }

    /// Enable or disable per-document parallelism.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the persona profile for a role and task.
    pub fn profile(&self, role: &str, task: &str) -> PersonaProfile {
        self.weighter.profile(role, task)
    }

    /// Segment and score one document.
    pub fn score_document(
        &self,
        doc_index: usize,
        document_id: &str,
        pages: &[PageSpans],
        profile: &PersonaProfile,
    ) -> Result<Vec<ScoredSection>> {
        let segmenter = SectionSegmenter::new(document_id, self.heading.clone())?;
        let scored = segmenter
            .segment(pages)
            .into_iter()
            .enumerate()
            .map(|(i, section)| {
                let score = self.scorer.score(&section, profile);
                ScoredSection::new(section, score, Sequence::new(doc_index, i))
            })
            .collect();
        Ok(scored)
    }

    /// Rank documents whose pages are already in memory.
    pub fn rank(&self, documents: &[DocumentPages], profile: &PersonaProfile) -> RankedCollection {
        let ids: Vec<&str> = documents.iter().map(|d| d.document_id.as_str()).collect();
        let per_document = self.fan_out(ids.len(), |i| {
            self.score_document(i, ids[i], &documents[i].pages, profile)
        });
        self.merge(&ids, per_document)
    }

    /// Rank documents loaded on demand.
    ///
    /// `load` receives the document index and identifier. A document whose
    /// load fails contributes no sections and is logged.
    pub fn rank_with<F>(&self, ids: &[&str], profile: &PersonaProfile, load: F) -> RankedCollection
    where
        F: Fn(usize, &str) -> Result<Vec<PageSpans>> + Sync,
    {
        let per_document = self.fan_out(ids.len(), |i| {
            let pages = load(i, ids[i])?;
            self.score_document(i, ids[i], &pages, profile)
        });
        self.merge(ids, per_document)
    }

    fn fan_out<F>(&self, count: usize, work: F) -> Vec<(usize, Result<Vec<ScoredSection>>)>
    where
        F: Fn(usize) -> Result<Vec<ScoredSection>> + Sync,
    {
        if !self.parallel || count <= 1 {
            return (0..count).map(|i| (i, work(i))).collect();
        }

        let (tx, rx) = unbounded();
        let work = &work;
        rayon::scope(|s| {
            for i in 0..count {
                let tx = tx.clone();
                s.spawn(move |_| {
                    // The receiver outlives the scope.
                    let _ = tx.send((i, work(i)));
                });
            }
        });
        drop(tx);

        let mut results: Vec<_> = rx.iter().collect();
        results.sort_by_key(|(i, _)| *i);
        results
    }

    fn merge(
        &self,
        ids: &[&str],
        per_document: Vec<(usize, Result<Vec<ScoredSection>>)>,
    ) -> RankedCollection {
        let mut all = Vec::new();
        let mut contributing_documents = Vec::new();

        for (i, outcome) in per_document {
            match outcome {
                Ok(sections) => {
                    log::info!("{}: {} sections", ids[i], sections.len());
                    if !sections.is_empty() {
                        contributing_documents.push(ids[i].to_string());
                    }
                    all.extend(sections);
                }
                Err(e) => log::warn!("Skipping {}: {}", ids[i], e),
            }
        }

        let total_sections = all.len();
        RankedCollection {
            result: self.aggregator.aggregate(all),
            total_sections,
            contributing_documents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{BBox, PageContext, TextSpan};

    fn page(index: u32, spans: Vec<(&str, f32, bool)>) -> PageSpans {
        let mut page = PageSpans::new(PageContext::new(index, 600.0, 800.0));
        for (text, size, bold) in spans {
            page.push(
                TextSpan::new(text, size, "Times", BBox::new(50.0, 0.0, 150.0, 10.0), index)
                    .with_bold(bold),
            );
        }
        page
    }

    fn collection() -> Vec<DocumentPages> {
        vec![
            DocumentPages::new(
                "cities.pdf",
                vec![page(
                    0,
                    vec![
                        ("Nice", 18.0, true),
                        ("A city on the coast with museums.", 10.0, false),
                        ("Nightlife", 16.0, true),
                        ("Bars and clubs stay open late for groups.", 10.0, false),
                    ],
                )],
            ),
            DocumentPages::new(
                "cuisine.pdf",
                vec![page(
                    0,
                    vec![
                        ("Cuisine", 18.0, true),
                        ("Seafood and local cuisine for a group trip.", 10.0, false),
                    ],
                )],
            ),
            DocumentPages::new("empty.pdf", vec![page(0, vec![])]),
        ]
    }

    #[test]
    fn test_rank_collection() {
        let ranker = CollectionRanker::new();
        let profile = ranker.profile("Travel Planner", "Plan a trip with nightlife and cuisine");
        let ranked = ranker.rank(&collection(), &profile);

        assert_eq!(ranked.total_sections, 3);
        assert_eq!(ranked.contributing_documents, vec!["cities.pdf", "cuisine.pdf"]);

        let first = &ranked.result.extracted_sections[0];
        assert_eq!(first.section_title, "Cuisine");
        assert_eq!(first.document_filename, "cuisine.pdf");

        let last = ranked.result.extracted_sections.last().unwrap();
        assert_eq!(last.section_title, "Nice");
        assert_eq!(last.relevance_score, 0.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let docs = collection();
        let parallel = CollectionRanker::new();
        let sequential = CollectionRanker::new().with_parallel(false);
        let profile = parallel.profile("Travel Planner", "nightlife cuisine trip");

        for _ in 0..5 {
            assert_eq!(parallel.rank(&docs, &profile), sequential.rank(&docs, &profile));
        }
    }

    #[test]
    fn test_empty_persona_scores_zero_in_discovery_order() {
        let ranker = CollectionRanker::new();
        let profile = ranker.profile("", "");
        let ranked = ranker.rank(&collection(), &profile);

        let titles: Vec<&str> = ranked
            .result
            .extracted_sections
            .iter()
            .map(|s| s.section_title.as_str())
            .collect();
        assert_eq!(titles, vec!["Nice", "Nightlife", "Cuisine"]);
        assert!(ranked
            .result
            .extracted_sections
            .iter()
            .all(|s| s.relevance_score == 0.0));
        assert_eq!(ranked.result.tier_counts.low, 3);
    }

    #[test]
    fn test_failed_load_contributes_nothing() {
        let docs = collection();
        let ranker = CollectionRanker::new();
        let profile = ranker.profile("Travel Planner", "cuisine");
        let ids = ["cities.pdf", "broken.pdf", "cuisine.pdf"];

        let ranked = ranker.rank_with(&ids, &profile, |i, id| {
            if id == "broken.pdf" {
                return Err(Error::PdfParse("bad xref".to_string()));
            }
            let doc = if i == 0 { &docs[0] } else { &docs[1] };
            Ok(doc.pages.clone())
        });

        assert_eq!(ranked.total_sections, 3);
        assert_eq!(ranked.contributing_documents, vec!["cities.pdf", "cuisine.pdf"]);
    }

    #[test]
    fn test_empty_document_id_is_skipped() {
        let ranker = CollectionRanker::new();
        let profile = ranker.profile("planner", "cuisine");
        let docs = vec![DocumentPages::new("", collection()[1].pages.clone())];
        let ranked = ranker.rank(&docs, &profile);
        assert_eq!(ranked.total_sections, 0);
        assert!(ranked.result.extracted_sections.is_empty());
    }

    #[test]
    fn test_no_documents() {
        let ranker = CollectionRanker::new();
        let profile = ranker.profile("planner", "cuisine");
        let ranked = ranker.rank(&[], &profile);
        assert_eq!(ranked, RankedCollection::default());
    }
}

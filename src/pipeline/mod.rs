//! End-to-end classification of a contract collection.
//!
//! Per record: normalize → correct typos → strip leading stop words →
//! classify contractual object → classify sub-category → roll up to
//! macro-category. Records whose macro-category is the fallback are
//! separated from the retained set at the end.

pub mod prefilter;

use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::ConfigError;
use crate::models::{Classification, ClassifiedContract, ContractRecord, PrefilterStats};
use crate::taxonomy::classifier::KeywordClassifier;
use crate::taxonomy::rollup::TaxonomyRollup;
use crate::text::normalize::normalize;
use crate::text::prefix::{strip_prefix, StopWords};
use crate::text::typos::TypoCorrector;

use prefilter::Prefilter;

/// Compiled, validated configuration shared read-only by all workers.
#[derive(Debug, Clone)]
pub struct ClassificationPipeline {
    stopwords: StopWords,
    typos: TypoCorrector,
    objects: KeywordClassifier,
    subcategories: KeywordClassifier,
    rollup: TaxonomyRollup,
    prefilter: Prefilter,
}

/// Result of [`ClassificationPipeline::run`].
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    /// Records received, before the prefilter.
    pub input: usize,
    pub prefilter: PrefilterStats,
    /// Classified records with a macro-category other than the fallback.
    pub retained: Vec<ClassifiedContract>,
    /// Classified records that fell into the fallback macro-category.
    pub discarded: Vec<ClassifiedContract>,
}

impl PipelineOutcome {
    pub fn classified(&self) -> usize {
        self.retained.len() + self.discarded.len()
    }

    /// Share of classified records that were retained, in percent.
    pub fn retained_percentage(&self) -> f64 {
        let classified = self.classified();
        if classified == 0 {
            return 0.0;
        }
        self.retained.len() as f64 / classified as f64 * 100.0
    }
}

impl ClassificationPipeline {
    /// Validate and compile every table in `config`.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let stopwords = StopWords::new(&config.text.stopwords)?;
        let typos = TypoCorrector::new(&config.text.typos)?;
        let objects = KeywordClassifier::new("object", &config.objects)?;
        let subcategories = KeywordClassifier::new("sub-category", &config.subcategories)?;
        let rollup = TaxonomyRollup::new(&config.macros, subcategories.labels())?;
        let prefilter = Prefilter::new(&config.filter)?;

        debug!(
            stopwords = stopwords.len(),
            objects = config.objects.len(),
            subcategories = config.subcategories.len(),
            macros = config.macros.len(),
            "pipeline configuration validated"
        );

        Ok(Self {
            stopwords,
            typos,
            objects,
            subcategories,
            rollup,
            prefilter,
        })
    }

    /// Normalized, typo-corrected, prefix-stripped text.
    pub fn clean_text(&self, description: Option<&str>) -> Option<String> {
        let normalized = normalize(description)?;
        let corrected = self.typos.correct(&normalized);
        Some(strip_prefix(&corrected, &self.stopwords).to_string())
    }

    /// Classify one record. The source record is copied, never modified.
    pub fn classify_record(&self, record: &ContractRecord) -> ClassifiedContract {
        let texto = self.clean_text(record.descripcion.as_deref());
        let objects = self.objects.classify(texto.as_deref());
        let subcategories = self.subcategories.classify(texto.as_deref());
        let macrocategoria = self.rollup.rollup(&subcategories.principal).to_string();
        let family = self
            .prefilter
            .unspsc_family(record.codigo_categoria.as_deref());

        ClassifiedContract {
            record: record.clone(),
            classification: Classification {
                texto,
                objetos: objects.all,
                objeto_contractual: objects.principal,
                subcategorias: subcategories.all,
                subcategoria: subcategories.principal,
                macrocategoria,
                codigo_familia_unspsc: family.as_ref().map(|f| f.code.clone()),
                nombre_familia_unspsc: family.and_then(|f| f.name),
            },
        }
    }

    /// Drop records that fail the status / sector / family checks.
    pub fn prefilter(&self, records: Vec<ContractRecord>) -> (Vec<ContractRecord>, PrefilterStats) {
        let mut stats = PrefilterStats::default();
        let kept = records
            .into_iter()
            .filter(|record| match self.prefilter.check(record) {
                Ok(()) => true,
                Err(reason) => {
                    debug!(id = ?record.id_contrato, %reason, "record dropped by prefilter");
                    stats.record(reason);
                    false
                }
            })
            .collect();
        (kept, stats)
    }

    /// Classify every record in parallel. Output order follows input order.
    ///
    /// `progress` advances once per record; pass [`ProgressBar::hidden`] when
    /// nothing should be drawn.
    pub fn classify_all(
        &self,
        records: &[ContractRecord],
        progress: &ProgressBar,
    ) -> Vec<ClassifiedContract> {
        progress.set_length(records.len() as u64);
        let classified = records
            .par_iter()
            .progress_with(progress.clone())
            .map(|record| self.classify_record(record))
            .collect();
        progress.finish_and_clear();
        classified
    }

    /// Prefilter (optionally), classify, and split off the fallback
    /// macro-category.
    pub fn run(
        &self,
        records: Vec<ContractRecord>,
        apply_prefilter: bool,
        progress: &ProgressBar,
    ) -> PipelineOutcome {
        let input = records.len();
        let (records, prefilter) = if apply_prefilter {
            self.prefilter(records)
        } else {
            (records, PrefilterStats::default())
        };
        debug!(
            input,
            kept = records.len(),
            dropped = prefilter.total(),
            "prefilter applied"
        );

        let (retained, discarded): (Vec<_>, Vec<_>) = self
            .classify_all(&records, progress)
            .into_iter()
            .partition(ClassifiedContract::is_retained);

        let outcome = PipelineOutcome {
            input,
            prefilter,
            retained,
            discarded,
        };
        info!(
            classified = outcome.classified(),
            retained = outcome.retained.len(),
            discarded = outcome.discarded.len(),
            retained_pct = %format!("{:.2}", outcome.retained_percentage()),
            "classification finished"
        );
        outcome
    }
}

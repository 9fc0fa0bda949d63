//! Selective translation of multilingual records.
//!
//! For every record the orchestrator plans which fields need a translation,
//! asks the provider for those, writes the results into the target locale
//! and saves the record once. Non-blank target content is never overwritten.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{AlreadyTranslatedPolicy, OrchestratorConfig};
use crate::error::{Result, TranslatorError};
use crate::locale::LocaleCatalog;
use crate::provider::{ProviderRequest, TranslationProvider};
use crate::record::{Translatable, is_blank};
use crate::store::RecordStore;
use crate::tone::VoiceTone;

/// What happens to one field during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// Target is blank and source has text
    Translate,
    /// Target already has content and is left alone
    KeepExisting,
    /// Source is blank, nothing to translate
    SourceBlank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    pub field: String,
    pub action: FieldAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    /// Saved and marked finished; lists the fields that got a translation
    Translated { fields: Vec<String> },
    /// Every target field already had content; not saved
    AlreadyTranslated,
    /// Record exposes no translatable fields
    NotTranslatable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub record_id: String,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeSummary {
    /// Translated field names across all records, in processing order
    pub translated_fields: Vec<String>,
    pub records: Vec<RecordOutcome>,
}

impl OutcomeSummary {
    pub fn message(&self) -> String {
        format!(
            "Translation completed successfully for fields: {}.",
            self.translated_fields.join(", ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Completed(OutcomeSummary),
    /// Source or target locale is not in the catalog
    UnsupportedLocale { locale: String },
    /// Source and target locale are the same
    IdenticalLocales { locale: String },
    /// A record had content in every target field; the batch was stopped
    AlreadyTranslated { record_id: String },
}

impl TranslationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Operator-facing message
    pub fn message(&self) -> String {
        match self {
            Self::Completed(summary) => summary.message(),
            Self::UnsupportedLocale { locale } => format!(
                "The selected languages are not supported ('{}'). \
                 Please ensure both source and target languages are defined in the locales configuration.",
                locale
            ),
            Self::IdenticalLocales { locale } => format!(
                "Source and target languages are both '{}'. Choose a different target language.",
                locale
            ),
            Self::AlreadyTranslated { record_id } => format!(
                "All the target language fields of record '{}' already contain content. \
                 Clear them and rerun if you wish to overwrite.",
                record_id
            ),
        }
    }
}

/// Decide what to do with each translatable field of `record`.
pub fn plan_record<R: Translatable>(record: &R, source_locale: &str, target_locale: &str) -> Vec<FieldPlan> {
    record
        .translatable_fields()
        .into_iter()
        .map(|field| {
            let target = record.translation(&field, target_locale).unwrap_or_default();
            let source = record.translation(&field, source_locale).unwrap_or_default();
            let action = if !is_blank(target) {
                FieldAction::KeepExisting
            } else if is_blank(source) {
                FieldAction::SourceBlank
            } else {
                FieldAction::Translate
            };
            FieldPlan { field, action }
        })
        .collect()
}

pub struct TranslationOrchestrator<P> {
    catalog: LocaleCatalog,
    provider: P,
    time_budget: Duration,
    max_concurrent_fields: usize,
    already_translated: AlreadyTranslatedPolicy,
}

impl<P: TranslationProvider> TranslationOrchestrator<P> {
    pub fn new(catalog: LocaleCatalog, provider: P, settings: &OrchestratorConfig) -> Result<Self> {
        if catalog.is_empty() {
            return Err(TranslatorError::ConfigurationMissing(
                "The locale catalog is empty".to_string(),
            ));
        }
        if settings.time_budget_secs == 0 {
            return Err(TranslatorError::Config(
                "The time budget must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            catalog,
            provider,
            time_budget: Duration::from_secs(settings.time_budget_secs),
            max_concurrent_fields: settings.max_concurrent_fields.max(1),
            already_translated: settings.already_translated,
        })
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    /// Locale checks done before any provider call
    pub fn check_locales(&self, source_locale: &str, target_locale: &str) -> Option<TranslationOutcome> {
        for locale in [source_locale, target_locale] {
            if !self.catalog.contains(locale) {
                return Some(TranslationOutcome::UnsupportedLocale { locale: locale.to_string() });
            }
        }
        if source_locale == target_locale {
            return Some(TranslationOutcome::IdenticalLocales { locale: source_locale.to_string() });
        }
        None
    }

    /// Fill blank `target_locale` fields of `records` from `source_locale`.
    ///
    /// Each processed record is saved through `store` and marked finished.
    /// A provider failure stops the run; records saved before it stay saved.
    pub async fn translate<R, S>(
        &self,
        records: &mut [R],
        store: &S,
        source_locale: &str,
        target_locale: &str,
        tone: VoiceTone,
    ) -> Result<TranslationOutcome>
    where
        R: Translatable + Send + Sync,
        S: RecordStore<R>,
    {
        if let Some(rejection) = self.check_locales(source_locale, target_locale) {
            warn!("{}", rejection.message());
            return Ok(rejection);
        }

        info!(
            "Starting translation of {} records from {} to {} ({} tone)",
            records.len(), source_locale, target_locale, tone
        );

        let run = self.translate_records(records, store, source_locale, target_locale, tone);
        match tokio::time::timeout(self.time_budget, run).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!("Translation exceeded the time budget of {:?}", self.time_budget);
                Err(TranslatorError::Timeout(self.time_budget))
            }
        }
    }

    async fn translate_records<R, S>(
        &self,
        records: &mut [R],
        store: &S,
        source_locale: &str,
        target_locale: &str,
        tone: VoiceTone,
    ) -> Result<TranslationOutcome>
    where
        R: Translatable + Send + Sync,
        S: RecordStore<R>,
    {
        let mut summary = OutcomeSummary::default();
        let total = records.len();

        for (idx, record) in records.iter_mut().enumerate() {
            let record_id = record.record_id();
            let plans = plan_record(&*record, source_locale, target_locale);

            if plans.is_empty() {
                debug!("Record {} has no translatable fields, skipping", record_id);
                summary.records.push(RecordOutcome { record_id, status: RecordStatus::NotTranslatable });
                continue;
            }

            if plans.iter().all(|plan| plan.action == FieldAction::KeepExisting) {
                match self.already_translated {
                    AlreadyTranslatedPolicy::Abort => {
                        warn!("Record {} is already translated, stopping the batch", record_id);
                        return Ok(TranslationOutcome::AlreadyTranslated { record_id });
                    }
                    AlreadyTranslatedPolicy::Skip => {
                        info!("Record {} is already translated, skipping", record_id);
                        summary.records.push(RecordOutcome { record_id, status: RecordStatus::AlreadyTranslated });
                        continue;
                    }
                }
            }

            info!("┌─ Translating record {} ({}/{}) ────────", record_id, idx + 1, total);
            let fields = self
                .translate_fields(record, &plans, source_locale, target_locale, tone)
                .await?;

            store.save(&*record).await?;
            store.mark_finished(&*record).await?;
            info!("└─ Saved record {} with {} translated fields", record_id, fields.len());

            summary.translated_fields.extend(fields.iter().cloned());
            summary.records.push(RecordOutcome { record_id, status: RecordStatus::Translated { fields } });
        }

        info!("{}", summary.message());
        Ok(TranslationOutcome::Completed(summary))
    }

    /// Request translations for the planned fields and apply them in field
    /// order. Nothing is written unless every request succeeds.
    async fn translate_fields<R: Translatable>(
        &self,
        record: &mut R,
        plans: &[FieldPlan],
        source_locale: &str,
        target_locale: &str,
        tone: VoiceTone,
    ) -> Result<Vec<String>> {
        let source_name = self.catalog.display_name_or_code(source_locale);
        let target_name = self.catalog.display_name_or_code(target_locale);

        let mut requests = Vec::new();
        for plan in plans {
            match plan.action {
                FieldAction::Translate => {
                    let text = record.translation(&plan.field, source_locale).unwrap_or_default();
                    let request = ProviderRequest::new(text, target_name.as_str(), tone, &source_name);
                    requests.push((plan.field.clone(), request));
                }
                FieldAction::KeepExisting => debug!("│ {}: target has content, keeping it", plan.field),
                FieldAction::SourceBlank => debug!("│ {}: source is blank, nothing to translate", plan.field),
            }
        }

        let provider = &self.provider;
        let results: Vec<(String, String)> = stream::iter(requests)
            .map(move |(field, request)| async move {
                debug!("│ {}: submitting {} characters", field, request.text.chars().count());
                let job = provider.submit(&request).await?;
                let translated = provider.fetch_result(&job).await?;
                debug!("│ {}: job {} done", field, job.job_id);
                Ok::<_, TranslatorError>((field, translated))
            })
            .buffered(self.max_concurrent_fields)
            .try_collect()
            .await?;

        let mut translated_fields = Vec::with_capacity(results.len());
        for (field, text) in results {
            record.set_translation(&field, target_locale, text);
            translated_fields.push(field);
        }
        Ok(translated_fields)
    }
}

//! Transient state behind the brief form.
//!
//! The controller buffers keyword drafts, assembles a [`BriefCandidate`] on
//! submit, validates it and hands the resulting request to a
//! [`BriefGenerator`]. One submission may be in flight at a time.

use tracing::{debug, info, warn};

use crate::api::models::{BriefCandidate, BriefRequest, BriefResponse, SeoBrief};
use crate::client::BriefGenerator;
use crate::error::{AppError, Result};
use crate::validation::{FieldErrors, PRIMARY_KEYWORDS_MAX, SECONDARY_KEYWORDS_MAX};

/// Shown when a failure carries no message of its own.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordList {
    Primary,
    Secondary,
}

impl KeywordList {
    /// Most keywords the list accepts.
    pub fn cap(self) -> usize {
        match self {
            KeywordList::Primary => PRIMARY_KEYWORDS_MAX,
            KeywordList::Secondary => SECONDARY_KEYWORDS_MAX,
        }
    }
}

/// Key pressed while a keyword draft input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Enter,
    Other,
}

/// Whether the input should still run its default key action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHandling {
    Suppressed,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default)]
struct KeywordInput {
    draft: String,
    keywords: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FormController<B = SeoBrief> {
    title: String,
    target_audience: String,
    primary: KeywordInput,
    secondary: KeywordInput,
    phase: FormPhase,
    error: Option<String>,
    field_errors: FieldErrors,
    result: Option<B>,
}

impl<B> Default for FormController<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> FormController<B> {
    pub fn new() -> Self {
        FormController {
            title: String::new(),
            target_audience: String::new(),
            primary: KeywordInput::default(),
            secondary: KeywordInput::default(),
            phase: FormPhase::Idle,
            error: None,
            field_errors: FieldErrors::default(),
            result: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn target_audience(&self) -> &str {
        &self.target_audience
    }

    pub fn set_target_audience(&mut self, audience: impl Into<String>) {
        self.target_audience = audience.into();
    }

    pub fn draft(&self, list: KeywordList) -> &str {
        &self.input(list).draft
    }

    pub fn set_draft(&mut self, list: KeywordList, text: impl Into<String>) {
        self.input_mut(list).draft = text.into();
    }

    pub fn keywords(&self, list: KeywordList) -> &[String] {
        &self.input(list).keywords
    }

    /// False once the list is full; the draft input is disabled then.
    pub fn can_add(&self, list: KeywordList) -> bool {
        self.input(list).keywords.len() < list.cap()
    }

    /// Commits the trimmed draft to its list.
    ///
    /// Does nothing when the draft is blank, the list is full, or the keyword
    /// is already present. Returns whether a keyword was added.
    pub fn add_keyword(&mut self, list: KeywordList) -> bool {
        let cap = list.cap();
        let input = self.input_mut(list);
        let keyword = input.draft.trim();

        if keyword.is_empty() || input.keywords.len() >= cap || input.keywords.iter().any(|k| k == keyword) {
            return false;
        }

        let keyword = keyword.to_string();
        debug!(?list, %keyword, "keyword added");
        input.keywords.push(keyword);
        input.draft.clear();
        true
    }

    pub fn add_primary_keyword(&mut self) -> bool {
        self.add_keyword(KeywordList::Primary)
    }

    pub fn add_secondary_keyword(&mut self) -> bool {
        self.add_keyword(KeywordList::Secondary)
    }

    pub fn remove_keyword(&mut self, list: KeywordList, index: usize) -> Option<String> {
        let keywords = &mut self.input_mut(list).keywords;
        if index < keywords.len() {
            Some(keywords.remove(index))
        } else {
            None
        }
    }

    /// Enter in a draft input adds the keyword instead of submitting the form.
    pub fn handle_key(&mut self, list: KeywordList, key: FormKey) -> KeyHandling {
        match key {
            FormKey::Enter => {
                self.add_keyword(list);
                KeyHandling::Suppressed
            }
            FormKey::Other => KeyHandling::Default,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Top-level error from the last submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Inline errors from the last validation run.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn result(&self) -> Option<&B> {
        self.result.as_ref()
    }

    /// Snapshot of the current inputs as an unvalidated request.
    pub fn candidate(&self) -> BriefCandidate {
        BriefCandidate {
            title: self.title.clone(),
            target_audience: self.target_audience.clone(),
            primary_keywords: self.primary.keywords.clone(),
            secondary_keywords: self.secondary.keywords.clone(),
        }
    }

    /// Starts a submission and returns the request to send.
    ///
    /// Rejected while another submission is in flight. On validation failure
    /// the field errors are stored and the form stays idle.
    pub fn begin_submit(&mut self) -> Result<BriefRequest> {
        if self.phase == FormPhase::Submitting {
            return Err(AppError::SubmissionInFlight);
        }

        self.error = None;
        self.result = None;
        self.field_errors = FieldErrors::default();
        self.phase = FormPhase::Submitting;

        match self.candidate().into_request() {
            Ok(request) => Ok(request),
            Err(errors) => {
                debug!(%errors, "brief request failed validation");
                self.field_errors = errors.clone();
                self.phase = FormPhase::Idle;
                Err(AppError::ValidationError(errors))
            }
        }
    }

    /// Records the outcome of the in-flight submission.
    pub fn finish(&mut self, outcome: Result<BriefResponse<B>>) {
        if self.phase != FormPhase::Submitting {
            warn!(phase = ?self.phase, "submission outcome arrived with nothing in flight");
            return;
        }

        match outcome.map(BriefResponse::into_brief) {
            Ok(Ok(brief)) => {
                info!("SEO brief ready");
                self.result = Some(brief);
                self.phase = FormPhase::Succeeded;
            }
            Ok(Err(message)) => {
                warn!(%message, "backend reported failure");
                self.fail(message);
            }
            Err(err) => {
                warn!(error = %err, "brief request failed");
                self.fail(err.to_string());
            }
        }
    }

    /// Abandons the in-flight submission and returns to idle.
    pub fn cancel(&mut self) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Idle;
        }
    }

    /// Validates, sends and records the outcome in one go.
    ///
    /// If the returned future is dropped mid-request the form is put back to
    /// idle, so it never stays loading.
    pub async fn submit<G>(&mut self, generator: &G) -> FormPhase
    where
        G: BriefGenerator<B> + ?Sized,
        B: Send,
    {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(err) => {
                debug!(error = %err, "submission not sent");
                return self.phase;
            }
        };

        let slot = InFlight { form: self };
        let outcome = generator.generate(&request).await;
        slot.form.finish(outcome);
        slot.form.phase
    }

    fn fail(&mut self, message: String) {
        self.error = Some(if message.is_empty() {
            UNEXPECTED_ERROR_MESSAGE.to_string()
        } else {
            message
        });
        self.phase = FormPhase::Failed;
    }

    fn input(&self, list: KeywordList) -> &KeywordInput {
        match list {
            KeywordList::Primary => &self.primary,
            KeywordList::Secondary => &self.secondary,
        }
    }

    fn input_mut(&mut self, list: KeywordList) -> &mut KeywordInput {
        match list {
            KeywordList::Primary => &mut self.primary,
            KeywordList::Secondary => &mut self.secondary,
        }
    }
}

struct InFlight<'a, B> {
    form: &'a mut FormController<B>,
}

impl<B> Drop for InFlight<'_, B> {
    fn drop(&mut self) {
        if self.form.phase == FormPhase::Submitting {
            warn!("submission dropped before completing");
            self.form.cancel();
        }
    }
}

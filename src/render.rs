//! Read-only presentation of a generated brief.
//!
//! A brief is broken into titled [`Section`]s. [`BriefView`] wraps those
//! sections with copy-to-clipboard actions and their transient "copied"
//! acknowledgment.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::api::models::SeoBrief;
use crate::error::Result;

pub const META_TITLE_BUDGET: usize = 60;
pub const META_DESCRIPTION_BUDGET: usize = 155;

/// How long a copy acknowledgment stays visible after the last click.
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

/// Character count against an SEO display limit. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharBudget {
    pub used: usize,
    pub limit: usize,
}

impl CharBudget {
    pub fn of(text: &str, limit: usize) -> Self {
        CharBudget {
            used: text.chars().count(),
            limit,
        }
    }

    pub fn is_over(&self) -> bool {
        self.used > self.limit
    }

    pub fn label(&self) -> String {
        format!("{} / {} characters", self.used, self.limit)
    }
}

/// List entry keyed by its position, which never changes once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub key: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Text {
        value: String,
        budget: Option<CharBudget>,
    },
    WordCount(u32),
    Ordered(Vec<ListItem>),
    Bullets(Vec<ListItem>),
}

impl SectionBody {
    fn text(value: &str, budget: Option<usize>) -> Self {
        SectionBody::Text {
            value: value.to_string(),
            budget: budget.map(|limit| CharBudget::of(value, limit)),
        }
    }

    fn items(values: &[String]) -> Vec<ListItem> {
        values
            .iter()
            .enumerate()
            .map(|(key, text)| ListItem { key, text: text.clone() })
            .collect()
    }

    /// Text placed on the clipboard for this section alone.
    pub fn copy_text(&self) -> String {
        match self {
            SectionBody::Text { value, .. } => value.clone(),
            SectionBody::WordCount(count) => count.to_string(),
            SectionBody::Ordered(items) => items
                .iter()
                .map(|item| format!("{}. {}", item.key + 1, item.text))
                .collect::<Vec<_>>()
                .join("\n"),
            SectionBody::Bullets(items) => items
                .iter()
                .map(|item| format!("- {}", item.text))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub body: SectionBody,
}

/// A brief shape the renderer can present.
pub trait BriefDocument {
    fn sections(&self) -> Vec<Section>;

    /// Whole brief as formatted text, used by "copy all".
    fn to_plain_text(&self) -> String {
        let mut result = String::new();
        for section in self.sections() {
            match &section.body {
                SectionBody::Text { value, .. } => {
                    result.push_str(&format!("{}: {}\n", section.title, value));
                }
                SectionBody::WordCount(count) => {
                    result.push_str(&format!("{}: {} words\n", section.title, format_count(*count)));
                }
                list => {
                    result.push_str(&format!("\n{}:\n", section.title));
                    result.push_str(&list.copy_text());
                    result.push('\n');
                }
            }
        }
        result.trim_end().to_string()
    }
}

impl BriefDocument for SeoBrief {
    fn sections(&self) -> Vec<Section> {
        vec![
            Section {
                title: "Meta Title",
                body: SectionBody::text(&self.meta_title, Some(META_TITLE_BUDGET)),
            },
            Section {
                title: "Meta Description",
                body: SectionBody::text(&self.meta_description, Some(META_DESCRIPTION_BUDGET)),
            },
            Section {
                title: "H1 Heading",
                body: SectionBody::text(&self.h1_suggestion, None),
            },
            Section {
                title: "Recommended Word Count",
                body: SectionBody::WordCount(self.word_count_recommendation),
            },
            Section {
                title: "Content Outline",
                body: SectionBody::Ordered(SectionBody::items(&self.content_outline)),
            },
            Section {
                title: "Keyword Placement Tips",
                body: SectionBody::Bullets(SectionBody::items(&self.keyword_placement_tips)),
            },
            Section {
                title: "Internal Linking Suggestions",
                body: SectionBody::Bullets(SectionBody::items(&self.internal_linking_suggestions)),
            },
        ]
    }
}

// Deployments whose backend returns one pre-formatted document.
impl BriefDocument for String {
    fn sections(&self) -> Vec<Section> {
        vec![Section {
            title: "SEO Brief",
            body: SectionBody::text(self, None),
        }]
    }

    fn to_plain_text(&self) -> String {
        self.clone()
    }
}

/// Formats a count with thousands separators, e.g. `12,500`.
pub fn format_count(count: u32) -> String {
    let digits = count.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Clipboard kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Transient "copied" flag. Every click restarts the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyAck {
    until: Option<Instant>,
}

impl CopyAck {
    pub fn mark(&mut self) {
        self.until = Some(Instant::now() + COPY_ACK_DURATION);
    }

    pub fn is_active(&self) -> bool {
        self.until.is_some_and(|until| Instant::now() < until)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyTarget {
    /// One section, by its index in [`BriefView::sections`].
    Section(usize),
    All,
}

pub struct BriefView<B> {
    brief: B,
    sections: Vec<Section>,
    acks: HashMap<CopyTarget, CopyAck>,
}

impl<B: BriefDocument> BriefView<B> {
    pub fn new(brief: B) -> Self {
        let sections = brief.sections();
        BriefView {
            brief,
            sections,
            acks: HashMap::new(),
        }
    }

    pub fn brief(&self) -> &B {
        &self.brief
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn copy_text(&self, target: CopyTarget) -> Option<String> {
        match target {
            CopyTarget::All => Some(self.brief.to_plain_text()),
            CopyTarget::Section(index) => self.sections.get(index).map(|s| s.body.copy_text()),
        }
    }

    /// Copies the target to the clipboard and shows the acknowledgment.
    ///
    /// Returns `Ok(false)` when the target names no section.
    pub fn copy<C>(&mut self, target: CopyTarget, clipboard: &mut C) -> Result<bool>
    where
        C: Clipboard + ?Sized,
    {
        let Some(text) = self.copy_text(target) else {
            return Ok(false);
        };
        clipboard.write_text(&text)?;
        self.acks.entry(target).or_default().mark();
        debug!(?target, chars = text.chars().count(), "copied to clipboard");
        Ok(true)
    }

    pub fn is_copied(&self, target: CopyTarget) -> bool {
        self.acks.get(&target).is_some_and(CopyAck::is_active)
    }

    /// Read-only display text: sections in order with their character hints.
    pub fn render(&self) -> String {
        let mut result = String::from("Your SEO Brief is Ready!\n");
        for section in &self.sections {
            result.push_str(&format!("\n## {}\n", section.title));
            match &section.body {
                SectionBody::Text { value, budget } => {
                    result.push_str(value);
                    result.push('\n');
                    if let Some(budget) = budget {
                        result.push_str(&budget.label());
                        result.push('\n');
                    }
                }
                SectionBody::WordCount(count) => {
                    result.push_str(&format!("{} words\n", format_count(*count)));
                }
                list => {
                    result.push_str(&list.copy_text());
                    result.push('\n');
                }
            }
        }
        result
    }
}

//! # PDF Text Extraction
//!
//! Extracts plain text from a PDF byte stream, one page at a time. A page that cannot
//! be decoded, or that carries no text (a scanned image, for example), is recorded as a
//! [`PageWarning`] and skipped. Only a container that cannot be parsed at all is fatal.

use crate::{
    constants::{PREVIEW_CHARS, PROGRESS_PAGE_THRESHOLD},
    errors::FlashcardError,
};
use pdf::content::{Op, TextDrawAdjusted};
use pdf::error::PdfError;
use pdf::file::FileOptions;
use std::error::Error as StdError;
use tracing::{debug, info, warn};

// --- Data Structures ---

/// Why a page contributed nothing to the extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageIssue {
    /// The page object or its content stream could not be decoded.
    Unreadable(String),
    /// The page decoded fine but holds no text.
    NoText,
}

/// A page-local extraction problem. Pages are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWarning {
    pub page: u32,
    pub issue: PageIssue,
}

/// Progress of an extraction run, reported after each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    /// The page just processed, starting at 1.
    pub page: u32,
    pub total: u32,
}

impl PageProgress {
    /// Whether a caller showing progress should report this page.
    ///
    /// Small documents are not reported at all; larger ones every fifth page,
    /// starting with the first.
    pub fn should_report(&self) -> bool {
        self.total as usize > PROGRESS_PAGE_THRESHOLD
            && self.page.saturating_sub(1) as usize % PROGRESS_PAGE_THRESHOLD == 0
    }
}

/// The text of a whole document, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    page_count: u32,
    warnings: Vec<PageWarning>,
}

impl ExtractedText {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn warnings(&self) -> &[PageWarning] {
        &self.warnings
    }

    /// The document parsed but no page yielded any text.
    pub fn no_text_found(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// The first [`PREVIEW_CHARS`] characters, with `...` appended when cut.
    pub fn preview(&self) -> String {
        preview(&self.text)
    }
}

/// Cuts `text` to [`PREVIEW_CHARS`] characters, appending `...` when it was longer.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

// --- Extraction ---

/// Extracts the text of every page of a PDF.
///
/// Returns [`FlashcardError::PdfUnreadable`] only if the container itself cannot be
/// parsed. An image-only document yields an empty [`ExtractedText`]; check
/// [`ExtractedText::no_text_found`].
pub fn extract_text(pdf_data: &[u8]) -> Result<ExtractedText, FlashcardError> {
    extract_text_with_progress(pdf_data, |_| {})
}

/// Same as [`extract_text`], calling `on_page` after each page is processed.
pub fn extract_text_with_progress<F>(
    pdf_data: &[u8],
    mut on_page: F,
) -> Result<ExtractedText, FlashcardError>
where
    F: FnMut(PageProgress),
{
    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| FlashcardError::PdfUnreadable(e.to_string()))?;
    let resolver = file.resolver();
    let total = file.num_pages();
    info!("Processing {} pages...", total);

    let mut accumulator = String::new();
    let mut warnings = Vec::new();

    for page_num in 0..total {
        let page_text = file
            .get_page(page_num)
            .map_err(|e| root_cause(&e))
            .and_then(|page| match &page.contents {
                Some(content) => content
                    .operations(&resolver)
                    .map(|ops| text_from_operations(&ops))
                    .map_err(|e| root_cause(&e)),
                None => Ok(String::new()),
            });

        let issue = match page_text {
            Ok(text) if !text.trim().is_empty() => {
                accumulator.push_str(&text);
                accumulator.push('\n');
                None
            }
            Ok(_) => Some(PageIssue::NoText),
            Err(reason) => Some(PageIssue::Unreadable(reason)),
        };

        if let Some(issue) = issue {
            warn!("Page {} contributed no text: {:?}", page_num + 1, issue);
            warnings.push(PageWarning {
                page: page_num + 1,
                issue,
            });
        }

        let progress = PageProgress {
            page: page_num + 1,
            total,
        };
        if progress.should_report() {
            info!("Processed page {} of {}", progress.page, progress.total);
        }
        on_page(progress);
    }

    let text = accumulator.trim().to_string();
    debug!(
        "Extracted {} characters from {} pages ({} page warnings).",
        text.len(),
        total,
        warnings.len()
    );
    if text.is_empty() {
        warn!("PDF processed but no text found. This might be an image-based PDF.");
    }

    Ok(ExtractedText {
        text,
        page_count: total,
        warnings,
    })
}

/// `TJ` adjustments below this (in thousandths of text space) are read as a word gap.
const WORD_GAP_THRESHOLD: f32 = -200.0;

/// The innermost cause of a pdf error. Outer layers carry source locations.
fn root_cause(err: &PdfError) -> String {
    let mut cause: &dyn StdError = err;
    while let Some(next) = cause.source() {
        cause = next;
    }
    cause.to_string()
}

/// Collects the text shown by a page's content stream operators.
///
/// Line breaks come from `T*`, from `Td`/`TD` moves with a vertical component and from
/// `Tm` changes of baseline. Horizontal moves and wide `TJ` gaps become spaces.
fn text_from_operations(operations: &[Op]) -> String {
    let mut text = String::new();
    let mut baseline: Option<f32> = None;

    for op in operations {
        match op {
            Op::TextDraw { text: s } => text.push_str(&s.to_string_lossy()),
            Op::TextDrawAdjusted { array } => {
                for item in array {
                    match item {
                        TextDrawAdjusted::Text(s) => text.push_str(&s.to_string_lossy()),
                        TextDrawAdjusted::Spacing(gap) if *gap < WORD_GAP_THRESHOLD => {
                            push_separator(&mut text, ' ')
                        }
                        TextDrawAdjusted::Spacing(_) => {}
                    }
                }
            }
            Op::TextNewline => push_separator(&mut text, '\n'),
            Op::MoveTextPosition { translation } => {
                if translation.y != 0.0 {
                    push_separator(&mut text, '\n');
                    baseline = baseline.map(|y| y + translation.y);
                } else if translation.x != 0.0 {
                    push_separator(&mut text, ' ');
                }
            }
            Op::SetTextMatrix { matrix } => {
                match baseline {
                    Some(y) if (y - matrix.f).abs() < 0.5 => push_separator(&mut text, ' '),
                    _ => push_separator(&mut text, '\n'),
                }
                baseline = Some(matrix.f);
            }
            _ => {}
        }
    }
    text
}

/// Appends a separator unless the text is empty or already ends with one.
fn push_separator(text: &mut String, separator: char) {
    if text.is_empty() || text.ends_with('\n') {
        return;
    }
    if separator == '\n' {
        let kept = text.trim_end_matches(' ').len();
        text.truncate(kept);
        text.push('\n');
    } else if !text.ends_with(' ') {
        text.push(' ');
    }
}

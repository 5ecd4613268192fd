//! Prompt templates and input preprocessing

use super::SummaryStyle;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,!?;:\-()\[\]{}]").expect("static regex"));
static PAGE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"Page \d+").expect("static regex"));
static LEADING_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*[•\-*]\s*").expect("static regex"));

/// Clean extracted text before prompting.
///
/// Normalizes whitespace and strips the noise that PDF extraction tends to
/// leave behind (stray symbols, page numbers, leading list markers).
pub fn preprocess(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let text = PAGE_NUMBER.replace_all(text, "");
    let text = LEADING_BULLET.replace_all(&text, "");
    let text = NOISE.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");

    text.trim().to_string()
}

/// Build the provider prompt for the requested style.
pub fn build_prompt(text: &str, style: SummaryStyle) -> String {
    match style {
        SummaryStyle::Bullets => format!(
            "Please provide a comprehensive bullet-point summary of the following document.\n\
             \n\
             Requirements:\n\
             - Extract the most important key points and main ideas\n\
             - Maintain logical flow and hierarchy\n\
             - Use clear, actionable bullet points\n\
             - Include relevant facts, figures, and conclusions\n\
             \n\
             Document to summarize:\n\
             {}\n\
             \n\
             Please provide a well-structured bullet-point summary:",
            text
        ),
        SummaryStyle::Abstract => format!(
            "Please write a professional abstract summary of the following document.\n\
             \n\
             Requirements:\n\
             - 3-4 concise sentences capturing the essence\n\
             - Include main topic, key findings, and conclusions\n\
             - Use academic/professional tone\n\
             - Maintain factual accuracy\n\
             \n\
             Document to summarize:\n\
             {}\n\
             \n\
             Please provide a professional abstract:",
            text
        ),
        SummaryStyle::Detailed => format!(
            "Please provide a comprehensive, detailed summary of the following document.\n\
             \n\
             Requirements:\n\
             - Cover main arguments, supporting evidence, and conclusions\n\
             - Maintain the document's logical structure\n\
             - Include key examples, data points, and references\n\
             - Provide context and background information\n\
             \n\
             Document to summarize:\n\
             {}\n\
             \n\
             Please provide a detailed summary:",
            text
        ),
    }
}

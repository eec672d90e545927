//! Reference Document Parser
//!
//! Parses captured provider system prompts from source documents named
//! `<provider>-<model>_<date>.<ext>`. The filename convention is load-bearing:
//! it drives provider/model/date extraction. The body is everything after the
//! first markdown heading line; documents without a heading keep their whole
//! text as the body.

use std::path::Path;

use crate::services::corpus::model::{ProviderCategory, PromptTag};
use crate::utils::error::{AppError, AppResult};

/// Result of parsing a source document (before corpus insertion)
#[derive(Debug, Clone)]
pub struct ParsedReference {
    pub name: String,
    pub provider: String,
    pub model: String,
    pub date: String,
    pub content: String,
    pub category: ProviderCategory,
    pub tags: Vec<PromptTag>,
}

/// Parse one source document.
///
/// Returns `Ok(None)` when the body is empty after heading removal (a
/// data-quality drop, not an error). Returns `Err` for filenames that do not
/// follow the `<provider>-<model>_<date>` convention.
pub fn parse_reference_file(path: &Path, content: &str) -> AppResult<Option<ParsedReference>> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| AppError::parse(format!("Unreadable file name: {}", path.display())))?;

    let (provider, model, date) = parse_file_stem(stem)?;
    let body = extract_body(content);
    if body.is_empty() {
        return Ok(None);
    }

    let category = derive_category(&provider, &model);
    let tags = derive_tags(&body);

    Ok(Some(ParsedReference {
        name: stem.to_string(),
        provider,
        model,
        date,
        content: body,
        category,
        tags,
    }))
}

/// Split a file stem into (provider, model, date).
///
/// The stem splits on the LAST underscore into a name part and a date
/// (date defaults to "unknown" when no underscore is present); the name part
/// splits on the FIRST dash into provider and model.
pub fn parse_file_stem(stem: &str) -> AppResult<(String, String, String)> {
    let (name_part, date) = match stem.rsplit_once('_') {
        Some((name, date)) if !date.is_empty() => (name, date.to_string()),
        _ => (stem, "unknown".to_string()),
    };

    let (provider, model) = name_part.split_once('-').ok_or_else(|| {
        AppError::parse(format!(
            "File stem '{}' does not follow <provider>-<model>_<date>",
            stem
        ))
    })?;

    if provider.is_empty() || model.is_empty() {
        return Err(AppError::parse(format!(
            "File stem '{}' has an empty provider or model token",
            stem
        )));
    }

    Ok((provider.to_string(), model.to_string(), date))
}

/// Extract the body: everything after the first markdown heading line.
/// Documents with no heading line keep their whole text.
pub fn extract_body(content: &str) -> String {
    let mut lines = content.lines();
    let heading_found = lines.by_ref().any(|line| line.trim_start().starts_with('#'));

    if heading_found {
        lines.collect::<Vec<_>>().join("\n").trim().to_string()
    } else {
        content.trim().to_string()
    }
}

/// Normalize a file stem into a corpus id: lowercase, spaces to dashes,
/// non `[a-z0-9._-]` characters stripped.
pub fn normalize_id(stem: &str) -> String {
    stem.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}

/// Keyword-to-category mapping over provider and model tokens.
pub fn derive_category(provider: &str, model: &str) -> ProviderCategory {
    let haystack = format!("{} {}", provider, model).to_lowercase();

    const CATEGORY_KEYWORDS: &[(&[&str], ProviderCategory)] = &[
        (&["openai", "gpt"], ProviderCategory::OpenAI),
        (&["anthropic", "claude"], ProviderCategory::Anthropic),
        (&["google", "gemini"], ProviderCategory::Google),
        (&["xai", "grok"], ProviderCategory::XAI),
        (&["meta", "llama"], ProviderCategory::Meta),
    ];

    for (keywords, category) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| haystack.contains(k)) {
            return *category;
        }
    }
    ProviderCategory::Other
}

/// Derive semantic tags from content via case-insensitive substring tests.
pub fn derive_tags(content: &str) -> Vec<PromptTag> {
    let haystack = content.to_lowercase();

    const TAG_KEYWORDS: &[(&[&str], PromptTag)] = &[
        (&["assistant", "helpful"], PromptTag::Assistant),
        (&["creative", "writing"], PromptTag::Creative),
        (&["code", "programming"], PromptTag::Coding),
        (&["analysis", "reasoning"], PromptTag::Analysis),
        (&["safety", "harmful"], PromptTag::Safety),
    ];

    TAG_KEYWORDS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(_, tag)| *tag)
        .collect()
}

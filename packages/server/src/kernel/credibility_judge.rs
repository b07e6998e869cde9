//! Credibility judgment via the Gemini generative model.
//!
//! The model is asked for a JSON object; its reply may wrap that object in
//! prose or code fences. The first well-formed object is located, parsed and
//! validated. Every failure surfaces as a [`JudgeError`]; there is no default
//! score.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use google_client::{GenerativeLanguageClient, GoogleApiError};

use crate::domains::analysis::models::{CredibilityVerdict, Flag};
use crate::kernel::BaseCredibilityJudge;

/// Content beyond this many characters is not sent to the model.
pub const MAX_CONTENT_CHARS: usize = 30_000;

/// Characters of an unparsable reply kept in error logs.
const OUTPUT_PREVIEW_CHARS: usize = 200;

pub const SYSTEM_PROMPT: &str = r#"You are the Veracity Engine. Your task is to analyze the provided text content and
determine its credibility. You must respond with a JSON object that strictly
adheres to the following structure:
{
  "credibility_score": integer (0-100, where 100 is highly credible),
  "summary": "string (a neutral, one-sentence summary of the content)",
  "detected_flags": ["string", ...],
  "reasoning": "string (a brief explanation for your score and flags)"
}

The possible flags are:
- "emotionally_charged": The text uses emotionally charged or inflammatory language.
- "logical_fallacy": The text contains logical fallacies.
- "no_trusted_sources": The text does not cite any trusted or verifiable sources.
- "sensationalist_title": The title is clickbait or sensationalist.
- "opinion_as_fact": The text presents opinions as established facts.
- "vague_claims": The claims made are vague or lack specific evidence.

Analyze the following text and provide your response in the specified JSON format."#;

#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("generative model request failed: {0}")]
    Upstream(#[from] GoogleApiError),

    #[error("no JSON object found in model response")]
    NoJsonObject,

    #[error("model response does not match the judgment schema: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid judgment: {0}")]
    Invalid(String),
}

/// Judgment as the model writes it, before validation.
#[derive(Debug, Deserialize)]
struct RawJudgment {
    credibility_score: i64,
    summary: String,
    #[serde(default)]
    detected_flags: Vec<String>,
    reasoning: String,
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Cut `text` to at most [`MAX_CONTENT_CHARS`] characters.
pub fn truncate_content(text: &str) -> &str {
    truncate_chars(text, MAX_CONTENT_CHARS)
}

/// Leading slice of a model reply, for logging.
pub fn output_preview(output: &str) -> &str {
    truncate_chars(output, OUTPUT_PREVIEW_CHARS)
}

/// Full prompt sent to the model for `content`.
pub fn build_prompt(content: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\n---\n\n{}", truncate_content(content))
}

/// Locate the first complete JSON object embedded in `text`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    text.match_indices('{').find_map(|(start, _)| {
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(_))) => Some(&text[start..start + stream.byte_offset()]),
            _ => None,
        }
    })
}

/// Parse and validate a judgment out of raw model output.
pub fn parse_verdict(model_output: &str) -> Result<CredibilityVerdict, JudgeError> {
    let json = extract_json_object(model_output).ok_or(JudgeError::NoJsonObject)?;
    let raw: RawJudgment = serde_json::from_str(json)?;

    let credibility_score = u8::try_from(raw.credibility_score)
        .ok()
        .filter(|score| *score <= 100)
        .ok_or_else(|| {
            JudgeError::Invalid(format!(
                "credibility_score {} is outside 0-100",
                raw.credibility_score
            ))
        })?;

    let mut detected_flags: Vec<Flag> = Vec::new();
    for tag in &raw.detected_flags {
        match Flag::from_model_tag(tag) {
            Some(flag) if !detected_flags.contains(&flag) => detected_flags.push(flag),
            Some(_) => {}
            None => warn!(flag = %tag, "Ignoring unknown flag from model"),
        }
    }

    Ok(CredibilityVerdict {
        credibility_score,
        summary: raw.summary,
        detected_flags,
        reasoning: raw.reasoning,
    })
}

/// Judges page text with a Gemini model.
pub struct GeminiJudge {
    client: GenerativeLanguageClient,
}

impl GeminiJudge {
    pub fn new(client: GenerativeLanguageClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseCredibilityJudge for GeminiJudge {
    async fn judge(&self, text: &str) -> Result<CredibilityVerdict, JudgeError> {
        let prompt = build_prompt(text);
        info!(
            model = %self.client.model(),
            chars = truncate_content(text).chars().count(),
            "Requesting credibility analysis"
        );

        let output = self.client.generate_text(prompt).await.map_err(|e| {
            error!(error = %e, "Gemini request failed");
            JudgeError::from(e)
        })?;

        let verdict = parse_verdict(&output).map_err(|e| {
            error!(
                error = %e,
                output_chars = output.chars().count(),
                preview = %output_preview(&output),
                "Could not parse Gemini judgment"
            );
            debug!(output = %output, "Unparsable Gemini reply");
            e
        })?;

        info!(score = verdict.credibility_score, "Credibility analysis received");
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"credibility_score": 85, "summary": "A report.", "detected_flags": ["no_trusted_sources"], "reasoning": "Cites nothing."}"#;

    #[test]
    fn test_parses_bare_object() {
        let verdict = parse_verdict(VALID).unwrap();
        assert_eq!(verdict.credibility_score, 85);
        assert_eq!(verdict.summary, "A report.");
        assert_eq!(verdict.detected_flags, vec![Flag::NoTrustedSources]);
        assert_eq!(verdict.reasoning, "Cites nothing.");
    }

    #[test]
    fn test_parses_object_wrapped_in_prose() {
        let output = format!("Here is my analysis:\n```json\n{VALID}\n```\nLet me know {{if}} you need more.");
        assert_eq!(parse_verdict(&output).unwrap().credibility_score, 85);
    }

    #[test]
    fn test_skips_braces_that_do_not_open_an_object() {
        let output = format!("Scores use {{0-100}} scale. {VALID}");
        assert_eq!(extract_json_object(&output), Some(VALID));
    }

    #[test]
    fn test_nested_objects_are_kept_whole() {
        let output = r#"{"outer": {"inner": 1}} trailing"#;
        assert_eq!(extract_json_object(output), Some(r#"{"outer": {"inner": 1}}"#));
    }

    #[test]
    fn test_no_object_is_an_error() {
        assert!(matches!(
            parse_verdict("I cannot analyze this content."),
            Err(JudgeError::NoJsonObject)
        ));
        assert!(matches!(parse_verdict("[1, 2, 3]"), Err(JudgeError::NoJsonObject)));
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        for score in ["150", "101", "-1"] {
            let output = format!(
                r#"{{"credibility_score": {score}, "summary": "s", "detected_flags": [], "reasoning": "r"}}"#
            );
            assert!(
                matches!(parse_verdict(&output), Err(JudgeError::Invalid(_))),
                "score {score}"
            );
        }
    }

    #[test]
    fn test_missing_or_mistyped_fields_are_rejected() {
        let missing_summary =
            r#"{"credibility_score": 70, "detected_flags": [], "reasoning": "r"}"#;
        assert!(matches!(
            parse_verdict(missing_summary),
            Err(JudgeError::Malformed(_))
        ));

        let string_score =
            r#"{"credibility_score": "70", "summary": "s", "detected_flags": [], "reasoning": "r"}"#;
        assert!(matches!(
            parse_verdict(string_score),
            Err(JudgeError::Malformed(_))
        ));
    }

    #[test]
    fn test_flags_default_filter_and_dedupe() {
        let no_flags = r#"{"credibility_score": 50, "summary": "s", "reasoning": "r"}"#;
        assert!(parse_verdict(no_flags).unwrap().detected_flags.is_empty());

        let noisy = r#"{"credibility_score": 50, "summary": "s", "reasoning": "r",
            "detected_flags": ["vague_claims", "clickbait", "vague_claims", "analysis_failed", "opinion_as_fact"]}"#;
        assert_eq!(
            parse_verdict(noisy).unwrap().detected_flags,
            vec![Flag::VagueClaims, Flag::OpinionAsFact]
        );
    }

    #[test]
    fn test_truncation_counts_characters() {
        let long = "é".repeat(MAX_CONTENT_CHARS + 10);
        let truncated = truncate_content(&long);
        assert_eq!(truncated.chars().count(), MAX_CONTENT_CHARS);

        assert_eq!(truncate_content("short"), "short");
    }

    #[test]
    fn test_output_preview_is_bounded() {
        let reply = "ü".repeat(OUTPUT_PREVIEW_CHARS * 10);
        let preview = output_preview(&reply);
        assert_eq!(preview.chars().count(), OUTPUT_PREVIEW_CHARS);
        assert!(reply.starts_with(preview));
        assert_eq!(output_preview("no json here"), "no json here");
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt("Page text.");
        assert!(prompt.starts_with("You are the Veracity Engine."));
        assert!(prompt.ends_with("JSON format.\n\n---\n\nPage text."));
    }
}

//! Turns whatever text the model returned into a `VideoAnalysis`, or fails.
//! Partial results are never produced.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use clipscope_common::{AnalysisError, Platform, VideoAnalysis};

/// Parse raw model output (optionally wrapped in a Markdown fence) into an analysis.
pub fn parse_analysis(raw: &str) -> Result<VideoAnalysis, AnalysisError> {
    let body = extract_json_object(raw)
        .ok_or_else(|| AnalysisError::Malformed("response contains no JSON object".to_string()))?;

    let value: Value = serde_json::from_str(body).map_err(|e| {
        debug!("Unparseable analysis body: {}", body);
        AnalysisError::Malformed(format!("response is not valid JSON: {}", e))
    })?;

    normalize(&value)
}

/// Validate a decoded JSON document against the analysis shape.
pub fn normalize(value: &Value) -> Result<VideoAnalysis, AnalysisError> {
    let obj = value
        .as_object()
        .ok_or_else(|| AnalysisError::Malformed("expected a JSON object".to_string()))?;

    let title = required_string(obj, "title", "title")?;
    let platform_raw = required_string(obj, "platform", "platform")?;
    let author = required_string(obj, "author", "author")?;
    let summary = required_string(obj, "summary", "summary")?;
    let tags = required_tags(obj)?;
    let sentiment_score = required_score(obj)?;

    let platform = Platform::from(platform_raw.as_str());
    if platform == Platform::Unknown && !platform_raw.eq_ignore_ascii_case("unknown") {
        warn!("Service reported unrecognised platform '{}'", platform_raw);
    }

    Ok(VideoAnalysis {
        title,
        platform,
        author,
        summary,
        tags,
        sentiment_score,
        views_estimate: optional_text(obj, "viewsEstimate", "views_estimate"),
        upload_date: optional_text(obj, "uploadDate", "upload_date"),
    })
}

/// Slice out the outermost `{ ... }`, dropping code fences or chatter around it.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

fn field<'a>(obj: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    obj.get(camel)
        .or_else(|| obj.get(snake))
        .filter(|v| !v.is_null())
}

fn required_string(obj: &Map<String, Value>, camel: &str, snake: &str) -> Result<String, AnalysisError> {
    match field(obj, camel, snake) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::String(_)) => Err(AnalysisError::Malformed(format!("field '{}' is blank", camel))),
        Some(other) => Err(AnalysisError::Malformed(format!(
            "field '{}' must be a string, got {}",
            camel, other
        ))),
        None => Err(AnalysisError::Malformed(format!("missing field '{}'", camel))),
    }
}

fn required_tags(obj: &Map<String, Value>) -> Result<Vec<String>, AnalysisError> {
    let items = match field(obj, "tags", "tags") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(AnalysisError::Malformed(format!(
                "field 'tags' must be an array, got {}",
                other
            )));
        }
        None => return Err(AnalysisError::Malformed("missing field 'tags'".to_string())),
    };

    let mut tags = Vec::with_capacity(items.len());
    for item in items {
        let tag = item.as_str().ok_or_else(|| {
            AnalysisError::Malformed(format!("tag entries must be strings, got {}", item))
        })?;
        let tag = tag.trim();
        if !tag.is_empty() {
            tags.push(tag.to_string());
        }
    }
    Ok(tags)
}

fn required_score(obj: &Map<String, Value>) -> Result<u8, AnalysisError> {
    let raw = match field(obj, "sentimentScore", "sentiment_score") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
        None => return Err(AnalysisError::Malformed("missing field 'sentimentScore'".to_string())),
    };

    let score = raw
        .filter(|s| s.is_finite())
        .ok_or_else(|| AnalysisError::Malformed("field 'sentimentScore' is not a number".to_string()))?;

    Ok(score.round().clamp(0.0, 100.0) as u8)
}

fn optional_text(obj: &Map<String, Value>, camel: &str, snake: &str) -> Option<String> {
    match field(obj, camel, snake)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

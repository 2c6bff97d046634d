use serde_json::json;

/// System instruction shared by every provider.
pub const SYSTEM_PROMPT: &str = "You are a social media analyst. \
You inspect links to short-form and long-form videos and describe them accurately. \
When you cannot identify a detail, make a conservative best guess instead of leaving it out. \
Always answer with a single JSON object and nothing else.";

/// Build the user prompt for one video URL.
pub fn analysis_prompt(url: &str) -> String {
    format!(
        "Analyze the video at this URL: {url}\n\n\
        Return a JSON object with these fields:\n\
        - \"title\": the video title (string)\n\
        - \"platform\": one of \"TikTok\", \"YouTube\", \"Instagram\" or \"Unknown\"\n\
        - \"author\": the creator's name or handle (string)\n\
        - \"summary\": two or three sentences describing the content (string)\n\
        - \"tags\": 3 to 5 short topic tags without the '#' prefix (array of strings)\n\
        - \"sentimentScore\": overall sentiment from 0 (very negative) to 100 (very positive) (integer)\n\
        - \"viewsEstimate\": optional rough view count such as \"1.2M\" (string)\n\
        - \"uploadDate\": optional upload date (string)"
    )
}

/// Structured-output schema for providers that support one (Gemini).
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "platform": {
                "type": "STRING",
                "enum": ["TikTok", "YouTube", "Instagram", "Unknown"]
            },
            "author": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "sentimentScore": { "type": "INTEGER" },
            "viewsEstimate": { "type": "STRING" },
            "uploadDate": { "type": "STRING" }
        },
        "required": ["title", "platform", "author", "summary", "tags", "sentimentScore"]
    })
}

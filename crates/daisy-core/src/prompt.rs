pub const PERSONA_PROMPT: &str = r#"You are Daisy, a friendly AI meeting assistant. You help people with:

- transcribing meeting recordings
- writing meeting summaries and action items
- pulling out key decisions and insights
- connecting notes to tools like Google Calendar, Slack and Notion
- scheduling and organising meetings
- questions about running productive meetings

Be helpful, concise and professional. Use emojis sparingly.
If asked for something outside these capabilities, say so politely and point back to what you can do."#;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a meeting analysis engine. Follow the instructions and output only JSON.";

const SUMMARY_SCHEMA_SAMPLE: &str = r#"
{
    "summary": "string",
    "keyPoints": ["string"],
    "decisions": ["string"],
    "actionItems": [
        {"title": "string", "description": "string (optional)", "assignee": "string (optional)", "dueDate": "string (optional, ISO 8601)"}
    ]
}
"#;

/// User-role prompt for the structured summary call.
pub fn build_summary_prompt(transcript: &str) -> String {
    format!(
        r#"
<task>
Analyze the meeting transcript below. Produce:
1. A concise summary of two or three short paragraphs
2. The key points discussed
3. The decisions that were made
4. Action items, with assignee and due date whenever they are mentioned
</task>

<schema>
Return a single JSON object matching this schema:
{schema}
</schema>

<rules>
- Every field is required; use an empty array when there is nothing to list
- Omit optional action item fields instead of inventing values
- No markdown, no code fences, no commentary outside the JSON object
</rules>

<input_transcript>
{transcript}
</input_transcript>
"#,
        schema = SUMMARY_SCHEMA_SAMPLE,
        transcript = transcript.trim()
    )
}

//! JSON input schemas for the tool surface.
//!
//! The embedding host registers these with its tool protocol verbatim. The
//! schemas describe the same argument maps `args` deserializes, so the two
//! must move together.

use serde_json::{Value, json};

/// The tool descriptors exposed by the memory service.
#[must_use]
pub fn tools_list() -> Vec<Value> {
    vec![
        json!({
            "name": "add-memory",
            "description": "Save important, contextualized information to long-term memory. \
                Only call this for HIGH-VALUE information: user preferences, project details, \
                technical decisions, personal facts, goals, or workflow patterns. \
                DO NOT save greetings, acknowledgments, casual chat, or repetitive info. \
                Quality over quantity — each memory should be self-contained and useful.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "Self-contained memory with full context. \
                            GOOD: 'User prefers Python over JavaScript for backend services.' \
                            BAD: 'likes python' or 'ok got it'",
                    },
                    "userId": { "type": "string", "description": "Owner (defaults to configured user)" },
                    "categories": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Category labels to attach at creation",
                    },
                    "metadata": { "type": "object", "description": "Structured metadata to attach" },
                    "agentId": { "type": "string", "description": "Creating agent" },
                    "runId": { "type": "string", "description": "Run / session identifier" },
                    "force": { "type": "boolean", "description": "Bypass quality checks (use sparingly)" },
                    "enableGraph": { "type": "boolean", "description": "Also build the store's entity graph" },
                },
                "required": ["content"],
            },
        }),
        json!({
            "name": "search-memories",
            "description": "Search memories with semantic understanding. Call this EARLY in \
                conversations when the user mentions past discussions, asks questions you might \
                have context for, or requests recommendations. Use broad, natural queries.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Natural-language query, e.g. 'coding preferences' or 'work projects'",
                    },
                    "userId": { "type": "string", "description": "Owner (defaults to configured user)" },
                    "limit": { "type": "number", "description": "Max results (default 10, capped at 50)" },
                    "categories": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Restrict to these categories",
                    },
                    "agentId": { "type": "string", "description": "Restrict to this agent" },
                    "runId": { "type": "string", "description": "Restrict to this run / session" },
                },
                "required": ["query"],
            },
        }),
        json!({
            "name": "get-context",
            "description": "Build a proactive context block for the current conversation: \
                over-fetches semantic candidates, reranks them by keyword overlap with the \
                live messages, and returns a grouped, ready-to-inject summary.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "message": { "type": "string", "description": "The current user message" },
                    "recentMessages": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Recent conversational turns, oldest first",
                    },
                    "userId": { "type": "string", "description": "Owner (defaults to configured user)" },
                    "maxResults": { "type": "number", "description": "Max memories in the block (default 10)" },
                    "enableGraph": { "type": "boolean", "description": "Consult the store's entity graph" },
                },
                "required": ["message"],
            },
        }),
        json!({
            "name": "get-all-memories",
            "description": "Retrieve ALL memories for a user. Use at conversation start to load \
                context, or when the user asks what you remember about them.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "userId": { "type": "string", "description": "Owner (defaults to configured user)" },
                },
            },
        }),
        json!({
            "name": "update-memory",
            "description": "Update an existing memory when information changes or needs correction.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "memoryId": { "type": "string", "description": "ID of the memory to update" },
                    "content": { "type": "string", "description": "New memory content" },
                    "userId": { "type": "string", "description": "Owner (defaults to configured user)" },
                },
                "required": ["memoryId", "content"],
            },
        }),
        json!({
            "name": "delete-memory",
            "description": "Permanently delete a specific memory. Use when the user explicitly \
                asks to forget something.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "memoryId": { "type": "string", "description": "ID of the memory to delete" },
                    "userId": { "type": "string", "description": "Owner (defaults to configured user)" },
                },
                "required": ["memoryId"],
            },
        }),
        json!({
            "name": "consolidate-memories",
            "description": "Scan for similar or redundant memories and report merge candidates. \
                Never merges automatically — review the report and consolidate with \
                update-memory / delete-memory.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "userId": { "type": "string", "description": "Owner (defaults to configured user)" },
                    "dryRun": { "type": "boolean", "description": "Preview without changes (default true)" },
                },
            },
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_all_seven_tools() {
        let tools = tools_list();
        let names: Vec<&str> = tools
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "add-memory",
                "search-memories",
                "get-context",
                "get-all-memories",
                "update-memory",
                "delete-memory",
                "consolidate-memories",
            ]
        );
    }

    #[test]
    fn every_tool_has_an_object_schema() {
        for tool in tools_list() {
            assert_eq!(tool["inputSchema"]["type"], "object", "tool: {}", tool["name"]);
            assert!(tool["description"].as_str().is_some_and(|d| !d.is_empty()));
        }
    }
}

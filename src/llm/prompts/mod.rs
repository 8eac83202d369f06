// ABOUTME: System role and per-mode instruction templates for the completion service
// ABOUTME: Builds the debug, explain, and generate instructions sent as the user message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! The system role is fixed. The user message is built from the assistant
//! mode: debug and explain embed the source code, generate embeds the
//! free-text prompt.

use codemind_core::models::AssistantMode;

/// Fixed system role sent with every completion
pub const SYSTEM_PROMPT: &str =
    "You are a helpful coding assistant. Output markdown code blocks.";

/// Build the instruction for `mode`
///
/// `code` is ignored for generate and `prompt` is ignored otherwise.
#[must_use]
pub fn build_instruction(mode: AssistantMode, language: &str, code: &str, prompt: &str) -> String {
    match mode {
        AssistantMode::Debug => format!(
            "Role: Expert Code Debugger. Language: {language}. \nTask: Find bugs and provide the fixed code. \nInput Code:\n{code}"
        ),
        AssistantMode::Explain => format!(
            "Role: Tutor. Language: {language}. \nTask: Explain this code simply. \nInput Code:\n{code}"
        ),
        AssistantMode::Generate => format!(
            "Role: Senior Developer. Language: {language}. \nTask: Write code for: \"{prompt}\". \nConstraints: efficient, clean code only."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_embeds_code_not_prompt() {
        let text = build_instruction(AssistantMode::Debug, "python", "print(x)", "ignored");
        assert!(text.starts_with("Role: Expert Code Debugger. Language: python."));
        assert!(text.ends_with("Input Code:\nprint(x)"));
        assert!(!text.contains("ignored"));
    }

    #[test]
    fn test_explain_template() {
        let text = build_instruction(AssistantMode::Explain, "c", "int x;", "");
        assert_eq!(
            text,
            "Role: Tutor. Language: c. \nTask: Explain this code simply. \nInput Code:\nint x;"
        );
    }

    #[test]
    fn test_generate_quotes_prompt() {
        let text = build_instruction(AssistantMode::Generate, "java", "class A {}", "reverse a string");
        assert!(text.contains("Write code for: \"reverse a string\""));
        assert!(!text.contains("class A"));
    }
}

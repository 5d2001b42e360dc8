//! Prompt assembly: turns the form fields into chat instructions.
//!
//! Pure string construction with no UI or I/O dependency, so the labeled-line
//! contract can be tested in isolation.

use crate::form::FieldSet;

/// Fixed system instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an advanced AI assistant specialized in generating tailored prompts. \
Your task is to create a prompt based on the provided parameters. Follow these guidelines:

1. Analyze the given role, topic, goal, and expertise level to understand the context.
2. Craft a prompt that is specific, clear, and aligned with the stated goal.
3. Adjust the language and complexity to match the specified expertise level.
4. Incorporate any additional details provided to make the prompt more focused and relevant.
5. Ensure the generated prompt follows the requested output format.
6. Be concise yet comprehensive, providing enough information to guide the response without being overly restrictive.
7. If appropriate, include suggestions for potential areas to explore or aspects to consider in the response.
8. Avoid biases and maintain a neutral tone unless otherwise specified.
9. If the topic is sensitive or controversial, approach it with care and objectivity.

Your output should be a well-structured, thoughtful prompt that effectively captures \
all the provided parameters and guides the user towards producing the desired content or solution.";

/// User-visible replacement text when a generation attempt fails.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate prompt. Please try again.";

/// Build the user instruction from the current field values.
///
/// The prompt line is always present; each optional field contributes exactly
/// one labeled line when non-empty, in a fixed order. Emptiness is
/// `is_empty()` on the raw string — values are not trimmed.
pub fn build_user_message(fields: &FieldSet) -> String {
    let mut lines = Vec::with_capacity(8);
    lines.push("Generate a prompt with the following parameters:".to_string());
    lines.push(format!("- Prompt: \"{}\"", fields.prompt));
    if !fields.role.is_empty() {
        lines.push(format!("- Role: \"{}\"", fields.role));
    }
    if !fields.topic.is_empty() {
        lines.push(format!("- Topic: \"{}\"", fields.topic));
    }
    if !fields.goal.is_empty() {
        lines.push(format!("- Goal: \"{}\"", fields.goal));
    }
    if let Some(output_format) = fields.output_format {
        lines.push(format!("- Output Format: \"{}\"", output_format.wire()));
    }
    if let Some(level) = fields.expertise_level {
        lines.push(format!("- Expertise Level: \"{}\"", level.wire()));
    }
    if !fields.details.is_empty() {
        lines.push(format!("- Additional Details: \"{}\"", fields.details));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ExpertiseLevel, OutputFormat};

    /// Labeled lines of the assembled message, in order.
    fn labeled_lines(message: &str) -> Vec<&str> {
        message.lines().filter(|l| l.starts_with("- ")).collect()
    }

    #[test]
    fn test_prompt_only_yields_single_labeled_line() {
        let fields = FieldSet {
            prompt: "Explain the concept of photosynthesis".to_string(),
            ..Default::default()
        };
        let message = build_user_message(&fields);
        let lines = labeled_lines(&message);
        assert_eq!(
            lines,
            vec![r#"- Prompt: "Explain the concept of photosynthesis""#]
        );
        assert!(!message.contains("Role:"));
        assert!(!message.contains("Topic:"));
        assert!(!message.contains("Goal:"));
        assert!(!message.contains("Output Format:"));
        assert!(!message.contains("Expertise Level:"));
        assert!(!message.contains("Additional Details:"));
    }

    #[test]
    fn test_header_line_always_first() {
        let message = build_user_message(&FieldSet::default());
        assert!(
            message.starts_with("Generate a prompt with the following parameters:\n")
        );
    }

    #[test]
    fn test_all_fields_in_fixed_order() {
        let fields = FieldSet {
            prompt: "p".to_string(),
            role: "r".to_string(),
            topic: "t".to_string(),
            goal: "g".to_string(),
            output_format: Some(OutputFormat::Paragraph),
            expertise_level: Some(ExpertiseLevel::Advanced),
            details: "d".to_string(),
        };
        let message = build_user_message(&fields);
        assert_eq!(
            labeled_lines(&message),
            vec![
                r#"- Prompt: "p""#,
                r#"- Role: "r""#,
                r#"- Topic: "t""#,
                r#"- Goal: "g""#,
                r#"- Output Format: "paragraph""#,
                r#"- Expertise Level: "advanced""#,
                r#"- Additional Details: "d""#,
            ]
        );
    }

    #[test]
    fn test_order_is_independent_of_edit_order() {
        // Populate fields "backwards"; the assembled order must not change.
        let mut fields = FieldSet::default();
        fields.details = "d".to_string();
        fields.expertise_level = Some(ExpertiseLevel::Beginner);
        fields.goal = "g".to_string();
        fields.prompt = "p".to_string();
        let message = build_user_message(&fields);
        assert_eq!(
            labeled_lines(&message),
            vec![
                r#"- Prompt: "p""#,
                r#"- Goal: "g""#,
                r#"- Expertise Level: "beginner""#,
                r#"- Additional Details: "d""#,
            ]
        );
    }

    #[test]
    fn test_example_prompt_role_format_subset() {
        let fields = FieldSet {
            prompt: "Explain recursion".to_string(),
            role: "Teacher".to_string(),
            output_format: Some(OutputFormat::BulletPoints),
            ..Default::default()
        };
        let message = build_user_message(&fields);
        assert_eq!(
            labeled_lines(&message),
            vec![
                r#"- Prompt: "Explain recursion""#,
                r#"- Role: "Teacher""#,
                r#"- Output Format: "bullet-points""#,
            ]
        );
        assert!(!message.contains("Topic:"));
        assert!(!message.contains("Goal:"));
        assert!(!message.contains("Expertise Level:"));
        assert!(!message.contains("Additional Details:"));
    }

    #[test]
    fn test_topic_and_details_subset() {
        let fields = FieldSet {
            prompt: "p".to_string(),
            topic: "Biology".to_string(),
            details: "focus on edge cases".to_string(),
            ..Default::default()
        };
        assert_eq!(
            labeled_lines(&build_user_message(&fields)),
            vec![
                r#"- Prompt: "p""#,
                r#"- Topic: "Biology""#,
                r#"- Additional Details: "focus on edge cases""#,
            ]
        );
    }

    #[test]
    fn test_values_embedded_verbatim() {
        let fields = FieldSet {
            prompt: r#"say "hi" twice"#.to_string(),
            ..Default::default()
        };
        let message = build_user_message(&fields);
        assert!(message.contains(r#"- Prompt: "say "hi" twice""#));
    }

    #[test]
    fn test_whitespace_only_field_is_included() {
        // Only is_empty() excludes a field; a whitespace value still counts.
        let fields = FieldSet {
            prompt: "p".to_string(),
            role: "  ".to_string(),
            ..Default::default()
        };
        let message = build_user_message(&fields);
        assert!(message.contains(r#"- Role: "  ""#));
    }

    #[test]
    fn test_no_blank_lines_between_labeled_lines() {
        let fields = FieldSet {
            prompt: "p".to_string(),
            goal: "g".to_string(),
            ..Default::default()
        };
        let message = build_user_message(&fields);
        assert!(message.lines().all(|l| !l.is_empty()));
    }
}

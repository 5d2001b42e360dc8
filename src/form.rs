//! Form field state and input handling.

/// Output format options for the generated prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    BulletPoints,
    Paragraph,
    StepByStep,
    CodeSnippet,
}

impl OutputFormat {
    /// Value sent on the wire in the assembled instruction.
    pub fn wire(&self) -> &'static str {
        match self {
            Self::BulletPoints => "bullet-points",
            Self::Paragraph => "paragraph",
            Self::StepByStep => "step-by-step",
            Self::CodeSnippet => "code-snippet",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BulletPoints => "Bullet Points",
            Self::Paragraph => "Paragraph",
            Self::StepByStep => "Step-by-Step Guide",
            Self::CodeSnippet => "Code Snippet",
        }
    }

    /// Cycle forward through the options, passing through the unset state.
    pub fn cycle_next(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::BulletPoints),
            Some(Self::BulletPoints) => Some(Self::Paragraph),
            Some(Self::Paragraph) => Some(Self::StepByStep),
            Some(Self::StepByStep) => Some(Self::CodeSnippet),
            Some(Self::CodeSnippet) => None,
        }
    }

    /// Cycle backward through the options, passing through the unset state.
    pub fn cycle_prev(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::CodeSnippet),
            Some(Self::BulletPoints) => None,
            Some(Self::Paragraph) => Some(Self::BulletPoints),
            Some(Self::StepByStep) => Some(Self::Paragraph),
            Some(Self::CodeSnippet) => Some(Self::StepByStep),
        }
    }
}

/// Expertise level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpertiseLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ExpertiseLevel {
    /// Value sent on the wire in the assembled instruction.
    pub fn wire(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }

    /// Cycle forward through the options, passing through the unset state.
    pub fn cycle_next(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::Beginner),
            Some(Self::Beginner) => Some(Self::Intermediate),
            Some(Self::Intermediate) => Some(Self::Advanced),
            Some(Self::Advanced) => Some(Self::Expert),
            Some(Self::Expert) => None,
        }
    }

    /// Cycle backward through the options, passing through the unset state.
    pub fn cycle_prev(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::Expert),
            Some(Self::Beginner) => None,
            Some(Self::Intermediate) => Some(Self::Beginner),
            Some(Self::Advanced) => Some(Self::Intermediate),
            Some(Self::Expert) => Some(Self::Advanced),
        }
    }
}

/// The seven user-editable fields.
///
/// Only `prompt` is required; the rest default to empty/unset and are
/// omitted from the assembled instruction when left that way.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    pub prompt: String,
    pub role: String,
    pub topic: String,
    pub goal: String,
    pub output_format: Option<OutputFormat>,
    pub expertise_level: Option<ExpertiseLevel>,
    pub details: String,
}

/// Which field is focused in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldId {
    #[default]
    Prompt,
    Role,
    Topic,
    Goal,
    OutputFormat,
    ExpertiseLevel,
    Details,
}

impl FieldId {
    pub fn next(self) -> Self {
        match self {
            Self::Prompt => Self::Role,
            Self::Role => Self::Topic,
            Self::Topic => Self::Goal,
            Self::Goal => Self::OutputFormat,
            Self::OutputFormat => Self::ExpertiseLevel,
            Self::ExpertiseLevel => Self::Details,
            Self::Details => Self::Prompt,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Prompt => Self::Details,
            Self::Role => Self::Prompt,
            Self::Topic => Self::Role,
            Self::Goal => Self::Topic,
            Self::OutputFormat => Self::Goal,
            Self::ExpertiseLevel => Self::OutputFormat,
            Self::Details => Self::ExpertiseLevel,
        }
    }

    /// Whether this field takes free text (as opposed to a selector).
    pub fn is_text(self) -> bool {
        !matches!(self, Self::OutputFormat | Self::ExpertiseLevel)
    }
}

impl FieldSet {
    /// The raw value behind a text field id; None for the selector fields.
    pub fn text_value(&self, field: FieldId) -> Option<&String> {
        match field {
            FieldId::Prompt => Some(&self.prompt),
            FieldId::Role => Some(&self.role),
            FieldId::Topic => Some(&self.topic),
            FieldId::Goal => Some(&self.goal),
            FieldId::Details => Some(&self.details),
            FieldId::OutputFormat | FieldId::ExpertiseLevel => None,
        }
    }
}

/// Form state: field values plus focus and cursor position.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub fields: FieldSet,
    pub focus: FieldId,
    /// Byte offset of the cursor within the focused text field.
    pub cursor_pos: usize,
}

/// Byte offset of the character boundary immediately before `pos`.
fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

impl FormState {
    /// The currently focused text field's value, if a text field is focused.
    pub fn current_field_value(&self) -> Option<&String> {
        self.fields.text_value(self.focus)
    }

    fn current_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FieldId::Prompt => Some(&mut self.fields.prompt),
            FieldId::Role => Some(&mut self.fields.role),
            FieldId::Topic => Some(&mut self.fields.topic),
            FieldId::Goal => Some(&mut self.fields.goal),
            FieldId::Details => Some(&mut self.fields.details),
            FieldId::OutputFormat | FieldId::ExpertiseLevel => None,
        }
    }

    /// Move focus to the next field, placing the cursor at the end.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.reset_cursor_for_focus();
    }

    /// Move focus to the previous field, placing the cursor at the end.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
        self.reset_cursor_for_focus();
    }

    fn reset_cursor_for_focus(&mut self) {
        self.cursor_pos = self.current_field_value().map(|v| v.len()).unwrap_or(0);
    }

    /// Insert a character at the cursor in the focused text field.
    pub fn insert_char(&mut self, c: char) {
        let pos = self.cursor_pos;
        let Some(value) = self.current_field_mut() else {
            return;
        };
        if pos >= value.len() {
            value.push(c);
        } else {
            value.insert(pos, c);
        }
        self.cursor_pos = pos + c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) {
        let pos = self.cursor_pos;
        if pos == 0 {
            return;
        }
        let Some(value) = self.current_field_mut() else {
            return;
        };
        let start = prev_char_boundary(value, pos);
        value.remove(start);
        self.cursor_pos = start;
    }

    /// Delete the character at the cursor (delete key).
    pub fn delete_char_at(&mut self) {
        let pos = self.cursor_pos;
        let Some(value) = self.current_field_mut() else {
            return;
        };
        if pos < value.len() {
            value.remove(pos);
        }
    }

    /// Move the cursor one character left.
    pub fn cursor_left(&mut self) {
        if let Some(value) = self.current_field_value()
            && self.cursor_pos > 0
        {
            self.cursor_pos = prev_char_boundary(value, self.cursor_pos);
        }
    }

    /// Move the cursor one character right.
    pub fn cursor_right(&mut self) {
        if let Some(value) = self.current_field_value()
            && let Some(c) = value[self.cursor_pos..].chars().next()
        {
            self.cursor_pos += c.len_utf8();
        }
    }

    /// Move to the beginning of the focused field.
    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    /// Move to the end of the focused field.
    pub fn cursor_end(&mut self) {
        if let Some(value) = self.current_field_value() {
            self.cursor_pos = value.len();
        }
    }

    /// Cycle the focused selector forward (no-op on text fields).
    pub fn selector_next(&mut self) {
        match self.focus {
            FieldId::OutputFormat => {
                self.fields.output_format = OutputFormat::cycle_next(self.fields.output_format);
            }
            FieldId::ExpertiseLevel => {
                self.fields.expertise_level =
                    ExpertiseLevel::cycle_next(self.fields.expertise_level);
            }
            _ => {}
        }
    }

    /// Cycle the focused selector backward (no-op on text fields).
    pub fn selector_prev(&mut self) {
        match self.focus {
            FieldId::OutputFormat => {
                self.fields.output_format = OutputFormat::cycle_prev(self.fields.output_format);
            }
            FieldId::ExpertiseLevel => {
                self.fields.expertise_level =
                    ExpertiseLevel::cycle_prev(self.fields.expertise_level);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_FIELDS: [FieldId; 7] = [
        FieldId::Prompt,
        FieldId::Role,
        FieldId::Topic,
        FieldId::Goal,
        FieldId::OutputFormat,
        FieldId::ExpertiseLevel,
        FieldId::Details,
    ];

    #[test]
    fn test_field_id_next_full_cycle() {
        let mut field = FieldId::Prompt;
        for expected in ALL_FIELDS.iter().skip(1) {
            field = field.next();
            assert_eq!(field, *expected);
        }
        // Wraparound
        assert_eq!(field.next(), FieldId::Prompt);
    }

    #[test]
    fn test_field_id_next_prev_inverse() {
        for field in ALL_FIELDS {
            assert_eq!(field.next().prev(), field);
            assert_eq!(field.prev().next(), field);
        }
    }

    #[test]
    fn test_insert_char_appends_at_end() {
        let mut form = FormState::default();
        form.insert_char('h');
        form.insert_char('i');
        assert_eq!(form.fields.prompt, "hi");
        assert_eq!(form.cursor_pos, 2);
    }

    #[test]
    fn test_insert_char_at_cursor_position() {
        let mut form = FormState::default();
        form.insert_char('a');
        form.insert_char('c');
        form.cursor_left();
        form.insert_char('b');
        assert_eq!(form.fields.prompt, "abc");
        assert_eq!(form.cursor_pos, 2);
    }

    #[test]
    fn test_insert_char_multibyte() {
        let mut form = FormState::default();
        form.insert_char('é');
        form.insert_char('x');
        assert_eq!(form.fields.prompt, "éx");
        form.cursor_left();
        form.cursor_left();
        assert_eq!(form.cursor_pos, 0);
        form.insert_char('a');
        assert_eq!(form.fields.prompt, "aéx");
    }

    #[test]
    fn test_delete_char_before() {
        let mut form = FormState::default();
        form.insert_char('a');
        form.insert_char('é');
        form.delete_char_before();
        assert_eq!(form.fields.prompt, "a");
        assert_eq!(form.cursor_pos, 1);
        form.delete_char_before();
        assert_eq!(form.fields.prompt, "");
        // Backspace on an empty field is a no-op
        form.delete_char_before();
        assert_eq!(form.cursor_pos, 0);
    }

    #[test]
    fn test_delete_char_at() {
        let mut form = FormState::default();
        form.insert_char('a');
        form.insert_char('b');
        form.cursor_home();
        form.delete_char_at();
        assert_eq!(form.fields.prompt, "b");
        assert_eq!(form.cursor_pos, 0);
    }

    #[test]
    fn test_focus_change_resets_cursor_to_end() {
        let mut form = FormState::default();
        form.insert_char('x');
        form.focus_next();
        assert_eq!(form.focus, FieldId::Role);
        assert_eq!(form.cursor_pos, 0);
        form.insert_char('y');
        form.focus_prev();
        assert_eq!(form.focus, FieldId::Prompt);
        assert_eq!(form.cursor_pos, 1);
    }

    #[test]
    fn test_typing_into_selector_is_ignored() {
        let mut form = FormState {
            focus: FieldId::OutputFormat,
            ..Default::default()
        };
        form.insert_char('z');
        assert!(form.fields.output_format.is_none());
        assert!(form.fields.prompt.is_empty());
    }

    #[test]
    fn test_output_format_cycle_wraps_through_unset() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..5 {
            current = OutputFormat::cycle_next(current);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(OutputFormat::BulletPoints),
                Some(OutputFormat::Paragraph),
                Some(OutputFormat::StepByStep),
                Some(OutputFormat::CodeSnippet),
                None,
            ]
        );
    }

    #[test]
    fn test_output_format_cycle_next_prev_inverse() {
        let states = [
            None,
            Some(OutputFormat::BulletPoints),
            Some(OutputFormat::Paragraph),
            Some(OutputFormat::StepByStep),
            Some(OutputFormat::CodeSnippet),
        ];
        for state in states {
            assert_eq!(OutputFormat::cycle_prev(OutputFormat::cycle_next(state)), state);
            assert_eq!(OutputFormat::cycle_next(OutputFormat::cycle_prev(state)), state);
        }
    }

    #[test]
    fn test_expertise_level_cycle_wraps_through_unset() {
        let mut current = None;
        for _ in 0..5 {
            current = ExpertiseLevel::cycle_next(current);
        }
        assert!(current.is_none());
        assert_eq!(
            ExpertiseLevel::cycle_prev(None),
            Some(ExpertiseLevel::Expert)
        );
    }

    #[test]
    fn test_selector_cycling_via_form() {
        let mut form = FormState {
            focus: FieldId::ExpertiseLevel,
            ..Default::default()
        };
        form.selector_next();
        assert_eq!(form.fields.expertise_level, Some(ExpertiseLevel::Beginner));
        form.selector_prev();
        assert!(form.fields.expertise_level.is_none());
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(OutputFormat::BulletPoints.wire(), "bullet-points");
        assert_eq!(OutputFormat::StepByStep.wire(), "step-by-step");
        assert_eq!(ExpertiseLevel::Beginner.wire(), "beginner");
        assert_eq!(ExpertiseLevel::Expert.wire(), "expert");
    }
}

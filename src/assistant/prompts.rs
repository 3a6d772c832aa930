//! Prompt templates, one per feature.

/// Number of ideas asked for and returned
pub const IDEA_COUNT: usize = 10;

pub fn task_steps(task: &str) -> String {
    format!(
        "Break this task into a clear sequence of simple, actionable steps for a student:\n\n{task}"
    )
}

pub fn ideas_for_category(category: &str) -> String {
    format!("Generate {IDEA_COUNT} concise and practical ideas for: {category}")
}

pub fn ideas_for_prompt(prompt: &str) -> String {
    format!(
        "Generate {IDEA_COUNT} concise, practical, and creative ideas based on this prompt:\n\n{prompt}"
    )
}

pub fn clean_notes(notes: &str) -> String {
    format!(
        "Clean, organize, and format these notes for studying. Make headings and bullet points where appropriate:\n\n{notes}"
    )
}

pub fn finance_advice(expense_table: &str) -> String {
    format!(
        "Here are my expenses (student):\n\n{expense_table}\nGive simple, actionable suggestions to save money and manage budget."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_interpolate_input() {
        assert!(task_steps("Prepare presentation").ends_with("\n\nPrepare presentation"));
        assert_eq!(
            ideas_for_category("Marketing"),
            "Generate 10 concise and practical ideas for: Marketing"
        );
        assert!(ideas_for_prompt("sensor projects").contains("10 concise, practical, and creative"));
        assert!(clean_notes("raw").ends_with("\n\nraw"));
        assert!(finance_advice("date amount\n").contains("date amount\n\nGive simple"));
    }
}

/// Preset idea categories offered in the form
pub const IDEA_CATEGORIES: &[&str] = &[
    "Study Ideas",
    "Project Ideas",
    "Personal Goals",
    "Time Management Tips",
    "Event/Club Ideas",
];

/// What the idea generator should brainstorm about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaSource {
    /// A category name, preset or free text
    Category(String),
    /// A custom prompt; overrides any category
    Custom(String),
}

impl IdeaSource {
    /// Resolve the form fields: a non-blank custom prompt wins over the category.
    pub fn from_form(category: &str, custom_prompt: &str) -> Self {
        let custom = custom_prompt.trim();
        if custom.is_empty() {
            Self::Category(category.trim().to_string())
        } else {
            Self::Custom(custom.to_string())
        }
    }
}

/// Where the notes to clean came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesSource {
    Pasted(String),
    Pdf(Vec<u8>),
}

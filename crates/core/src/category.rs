//! Categories shared by tasks, sub-tasks and goals.

use serde::{Deserialize, Serialize};

/// Label of the escape category that lets the user type a free-form label.
pub const ESCAPE_CATEGORY: &str = "Anything";

/// Category of a task, sub-task or goal.
///
/// Serialized as a plain string so the persisted form stays readable. A
/// custom label never equals a fixed category name, so every value reads
/// back as itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Work related
    Work,
    /// Personal
    Personal,
    /// Free-form label picked through the escape category
    Custom(CustomLabel),
}

/// Free-form category label. Built through [`Category::custom`], which maps
/// the fixed names to their own variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomLabel(String);

impl CustomLabel {
    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Category {
    /// The categories offered by a picker, escape category last.
    pub const CHOICES: [&'static str; 3] = ["Work", "Personal", ESCAPE_CATEGORY];

    /// Resolve a picker selection plus the optional custom label.
    ///
    /// Selecting the escape category uses the trimmed custom label, falling
    /// back to the escape label itself when nothing was typed.
    pub fn from_selection(selected: &str, custom: &str) -> Self {
        if selected == ESCAPE_CATEGORY {
            let custom = custom.trim();
            if custom.is_empty() {
                return Self::custom(ESCAPE_CATEGORY);
            }
            return Self::custom(custom);
        }
        Self::custom(selected)
    }

    /// Category named `label`: `Work` and `Personal` map to the fixed
    /// variants, anything else is a custom label.
    pub fn custom(label: impl Into<String>) -> Self {
        let label = label.into();
        match label.as_str() {
            "Work" => Self::Work,
            "Personal" => Self::Personal,
            _ => Self::Custom(CustomLabel(label)),
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Custom(label) => label.as_str(),
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Work
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::custom(s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        match c {
            Category::Custom(label) => label.0,
            other => other.label().to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

//! Habit checklist entries, habit templates and difficulty presets

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Habits used until the user picks their own
pub const DEFAULT_HABITS: &[&str] = &["45 Min Workout", "Read 10 Pages", "No Sugar"];

/// One entry of today's checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRule {
    pub id: u32,
    pub text: String,
    pub completed: bool,
}

impl HabitRule {
    /// An unchecked checklist entry for a habit
    pub fn from_template(template: &HabitTemplate) -> Self {
        Self {
            id: template.id,
            text: template.text.clone(),
            completed: false,
        }
    }
}

/// A configured habit (checklist entry without completion state)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitTemplate {
    pub id: u32,
    pub text: String,
}

impl HabitTemplate {
    /// Build templates from habit texts, numbering them from 1
    pub fn from_texts<I, S>(texts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .zip(1u32..)
            .map(|(text, id)| Self {
                id,
                text: text.into(),
            })
            .collect()
    }
}

/// The default habit list
pub fn default_habits() -> Vec<HabitTemplate> {
    HabitTemplate::from_texts(DEFAULT_HABITS.iter().copied())
}

/// Errors for user-supplied habit lists.
///
/// The `Display` text is meant to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HabitError {
    #[error("Add at least one habit")]
    Empty,

    #[error("Your plan allows at most {max} habits, got {count}")]
    TooMany { count: usize, max: usize },

    #[error("Habit #{0} has no text")]
    Blank(usize),
}

/// Validate a habit list against the tier limit and turn it into templates.
///
/// Texts are trimmed before they are stored.
pub fn validate_habits(texts: &[String], max: usize) -> Result<Vec<HabitTemplate>, HabitError> {
    if texts.is_empty() {
        return Err(HabitError::Empty);
    }
    if texts.len() > max {
        return Err(HabitError::TooMany {
            count: texts.len(),
            max,
        });
    }

    let mut trimmed = Vec::with_capacity(texts.len());
    for (index, text) in texts.iter().enumerate() {
        let text = text.trim();
        if text.is_empty() {
            return Err(HabitError::Blank(index + 1));
        }
        trimmed.push(text.to_string());
    }

    Ok(HabitTemplate::from_texts(trimmed))
}

/// Difficulty-based habit presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            "extreme" => Some(Self::Extreme),
            _ => None,
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[Self::Medium, Self::Hard, Self::Extreme]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Extreme => "Extreme",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Medium => "3 habits to build consistency",
            Self::Hard => "6 habits for serious commitment",
            Self::Extreme => "8 habits for maximum discipline",
        }
    }

    pub fn habits(&self) -> &'static [&'static str] {
        match self {
            Self::Medium => &["45 Min Workout", "Read 10 Pages", "No Sugar"],
            Self::Hard => &[
                "Make Your Bed",
                "45 Min Workout",
                "Read 10 Pages",
                "No Sugar",
                "Post Content",
                "10K Steps",
            ],
            Self::Extreme => &[
                "Wake Up at 6am",
                "Make Your Bed",
                "45 Min Workout",
                "Read 10 Pages",
                "No Sugar",
                "Post Content",
                "10K Steps",
                "Drink 2L Water",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_numbered_from_one() {
        let habits = default_habits();
        assert_eq!(habits.len(), 3);
        assert_eq!(habits[0].id, 1);
        assert_eq!(habits[2].id, 3);
        assert_eq!(habits[2].text, "No Sugar");
    }

    #[test]
    fn test_validate_habits_limits() {
        let texts: Vec<String> = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        assert_eq!(
            validate_habits(&texts, 3),
            Err(HabitError::TooMany { count: 4, max: 3 })
        );
        assert_eq!(validate_habits(&[], 3), Err(HabitError::Empty));

        let blank = vec!["Run".to_string(), "   ".to_string()];
        assert_eq!(validate_habits(&blank, 3), Err(HabitError::Blank(2)));
    }

    #[test]
    fn test_validate_habits_trims() {
        let texts = vec!["  Run 5k ".to_string(), "Journal".to_string()];
        let habits = validate_habits(&texts, 10).unwrap();
        assert_eq!(habits[0].text, "Run 5k");
        assert_eq!(habits[1].id, 2);
    }

    #[test]
    fn test_presets_match_their_description() {
        assert_eq!(Difficulty::Medium.habits().len(), 3);
        assert_eq!(Difficulty::Hard.habits().len(), 6);
        assert_eq!(Difficulty::Extreme.habits().len(), 8);
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("insane"), None);
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        let err = HabitError::TooMany { count: 5, max: 3 };
        assert_eq!(err.to_string(), "Your plan allows at most 3 habits, got 5");
    }
}

//! Family history checkbox group.
//!
//! "None" is exclusive: checking it clears every condition, checking a
//! condition clears "none". The selection is submitted as a comma-joined
//! string, which the scorer scans for keywords.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyTag {
    Diabetes,
    Cancer,
    Alzheimers,
    None,
}

impl FamilyTag {
    pub const ALL: [FamilyTag; 4] = [
        FamilyTag::Diabetes,
        FamilyTag::Cancer,
        FamilyTag::Alzheimers,
        FamilyTag::None,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::Cancer => "cancer",
            Self::Alzheimers => "alzheimers",
            Self::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::Cancer => "Cancer",
            Self::Alzheimers => "Alzheimer's",
            Self::None => "None",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.value().eq_ignore_ascii_case(value.trim()))
    }
}

/// Checked family-history tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilySelection {
    checked: Vec<FamilyTag>,
}

impl FamilySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check or uncheck a tag, applying the exclusivity rule.
    pub fn set(&mut self, tag: FamilyTag, checked: bool) {
        if !checked {
            self.checked.retain(|t| *t != tag);
            return;
        }

        if tag == FamilyTag::None {
            self.checked.clear();
        } else {
            self.checked.retain(|t| *t != FamilyTag::None);
        }

        if !self.checked.contains(&tag) {
            self.checked.push(tag);
            self.checked.sort();
        }
    }

    pub fn toggle(&mut self, tag: FamilyTag) {
        let checked = self.is_checked(tag);
        self.set(tag, !checked);
    }

    pub fn is_checked(&self, tag: FamilyTag) -> bool {
        self.checked.contains(&tag)
    }

    pub fn selected(&self) -> &[FamilyTag] {
        &self.checked
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Comma-joined value submitted with the form. Empty when nothing is checked.
    pub fn to_field(&self) -> String {
        self.checked
            .iter()
            .map(FamilyTag::value)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Build a selection from a comma list such as `"diabetes,cancer"`.
    /// Unknown entries are returned so callers can report them.
    pub fn parse(list: &str) -> (Self, Vec<String>) {
        let mut selection = Self::new();
        let mut unknown = Vec::new();
        for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match FamilyTag::from_value(part) {
                Some(tag) => selection.set(tag, true),
                None => unknown.push(part.to_string()),
            }
        }
        (selection, unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_clears_conditions() {
        let mut sel = FamilySelection::new();
        sel.set(FamilyTag::Diabetes, true);
        sel.set(FamilyTag::Cancer, true);
        sel.set(FamilyTag::None, true);
        assert_eq!(sel.selected(), &[FamilyTag::None]);
        assert_eq!(sel.to_field(), "none");
    }

    #[test]
    fn condition_clears_none() {
        let mut sel = FamilySelection::new();
        sel.set(FamilyTag::None, true);
        sel.set(FamilyTag::Alzheimers, true);
        assert!(!sel.is_checked(FamilyTag::None));
        assert_eq!(sel.to_field(), "alzheimers");
    }

    #[test]
    fn joined_in_display_order() {
        let mut sel = FamilySelection::new();
        sel.set(FamilyTag::Cancer, true);
        sel.set(FamilyTag::Diabetes, true);
        sel.set(FamilyTag::Cancer, true);
        assert_eq!(sel.to_field(), "diabetes,cancer");
    }

    #[test]
    fn toggle_unchecks() {
        let mut sel = FamilySelection::new();
        sel.toggle(FamilyTag::Diabetes);
        sel.toggle(FamilyTag::Diabetes);
        assert!(sel.is_empty());
        assert_eq!(sel.to_field(), "");
    }

    #[test]
    fn parse_collects_unknown_entries() {
        let (sel, unknown) = FamilySelection::parse("Diabetes, asthma ,cancer");
        assert_eq!(sel.to_field(), "diabetes,cancer");
        assert_eq!(unknown, vec!["asthma".to_string()]);
    }
}

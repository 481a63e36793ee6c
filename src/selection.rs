//! Selected filter keywords and the reconciliation rules that keep a category
//! and its sub-categories consistent.
//!
//! The set is flat: category titles, sub-category titles and standalone
//! keywords share one namespace. Whenever every child of a category is
//! selected the children are replaced by the category title (collapse), and
//! unchecking one child of a collapsed category brings back its siblings
//! (expand).

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::error::{FinderError, Result};
use crate::metrics::SelectionMetrics;
use crate::taxonomy::{Category, Taxonomy};

/// An immutable snapshot of the user's filter choices, in selection order.
///
/// Every operation returns a new snapshot and leaves `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedKeywords {
    keywords: IndexSet<String>,
}

impl SelectedKeywords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a sub-category, collapsing into the category once every child is selected
    #[must_use]
    pub fn check_subcategory(&self, category: &Category, sub_title: &str) -> Self {
        let mut next = self.keywords.clone();
        next.insert(sub_title.to_string());

        let complete = !category.children.is_empty()
            && category.children.iter().all(|child| next.contains(child));
        if complete {
            for child in &category.children {
                next.shift_remove(child);
            }
            next.insert(category.title.clone());
            debug!(category = %category.title, "Collapsed fully selected category");
        }

        Self { keywords: next }
    }

    /// Deselect a sub-category, expanding a collapsed category into its remaining children
    #[must_use]
    pub fn uncheck_subcategory(&self, category: &Category, sub_title: &str) -> Self {
        let mut next = self.keywords.clone();

        if next.shift_remove(&category.title) {
            for child in category.children.iter().filter(|c| *c != sub_title) {
                next.insert(child.clone());
            }
            debug!(category = %category.title, excluded = sub_title, "Expanded collapsed category");
        }
        next.shift_remove(sub_title);

        Self { keywords: next }
    }

    /// Select a whole category, replacing any individually selected children
    #[must_use]
    pub fn check_main(&self, category: &Category) -> Self {
        let mut next = self.keywords.clone();
        next.insert(category.title.clone());
        for child in &category.children {
            next.shift_remove(child);
        }
        Self { keywords: next }
    }

    /// Remove a category title or standalone keyword
    #[must_use]
    pub fn uncheck_main(&self, keyword: &str) -> Self {
        self.uncheck_keyword(keyword)
    }

    /// Select a standalone keyword from a flat section
    #[must_use]
    pub fn check_keyword(&self, keyword: &str) -> Self {
        let mut next = self.keywords.clone();
        next.insert(keyword.to_string());
        Self { keywords: next }
    }

    #[must_use]
    pub fn uncheck_keyword(&self, keyword: &str) -> Self {
        let mut next = self.keywords.clone();
        next.shift_remove(keyword);
        Self { keywords: next }
    }

    /// Whether the category checkbox renders as checked
    pub fn is_main_checked(&self, category: &Category) -> bool {
        self.contains(&category.title)
            || (!category.children.is_empty()
                && category.children.iter().all(|child| self.contains(child)))
    }

    /// Whether a sub-category checkbox renders as checked
    pub fn is_sub_checked(&self, category: &Category, sub_title: &str) -> bool {
        self.contains(&category.title) || self.contains(sub_title)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Apply a single user action; unknown categories leave the selection unchanged
    #[must_use]
    pub fn apply(&self, taxonomy: &Taxonomy, action: &Action) -> Self {
        SelectionMetrics::record_action(action.kind());

        let next = match action {
            Action::Check(keyword) => self.check_keyword(keyword),
            Action::Uncheck(keyword) => self.uncheck_keyword(keyword),
            Action::UncheckMain(title) => self.uncheck_main(title),
            Action::CheckMain(title) => match taxonomy.category(title) {
                Some(category) => self.check_main(category),
                None => return self.ignore(action),
            },
            Action::CheckSub { category, sub } => match taxonomy.category(category) {
                Some(category) => self.check_subcategory(category, sub),
                None => return self.ignore(action),
            },
            Action::UncheckSub { category, sub } => match taxonomy.category(category) {
                Some(category) => self.uncheck_subcategory(category, sub),
                None => return self.ignore(action),
            },
        };

        debug!(%action, selected = next.len(), "Applied selection action");
        next
    }

    fn ignore(&self, action: &Action) -> Self {
        warn!(%action, "Ignoring action for unknown category");
        SelectionMetrics::record_ignored_action();
        self.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectedKeywords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keywords: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for SelectedKeywords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "[{}]", joined.join(", "))
    }
}

/// One tap on a checkbox in the accordion filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Check(String),
    Uncheck(String),
    CheckMain(String),
    UncheckMain(String),
    CheckSub { category: String, sub: String },
    UncheckSub { category: String, sub: String },
}

impl Action {
    /// Parse the compact form used on the command line.
    ///
    /// `+Title` / `-Title` selects or deselects a category or keyword;
    /// `+Category/Sub` / `-Category/Sub` targets a sub-category. A whole
    /// string that is itself a known keyword (e.g. `HIV/AIDS`) is never split.
    pub fn parse(input: &str, taxonomy: &Taxonomy) -> Result<Self> {
        let trimmed = input.trim();
        let (check, body) = if let Some(rest) = trimmed.strip_prefix('+') {
            (true, rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix('-') {
            (false, rest.trim())
        } else {
            return Err(invalid(input, "expected a leading '+' or '-'"));
        };

        if body.is_empty() {
            return Err(invalid(input, "missing keyword"));
        }

        if taxonomy.category(body).is_some() {
            return Ok(if check {
                Action::CheckMain(body.to_string())
            } else {
                Action::UncheckMain(body.to_string())
            });
        }

        if taxonomy.section_of_keyword(body).is_none() {
            if let Some((category_title, sub)) = body.split_once('/') {
                let category = taxonomy
                    .category(category_title.trim())
                    .ok_or_else(|| invalid(input, "unknown category"))?;
                let sub = sub.trim();
                if !category.has_child(sub) {
                    return Err(invalid(input, "not a sub-category of that category"));
                }
                let (category, sub) = (category.title.clone(), sub.to_string());
                return Ok(if check {
                    Action::CheckSub { category, sub }
                } else {
                    Action::UncheckSub { category, sub }
                });
            }
        }

        Ok(if check {
            Action::Check(body.to_string())
        } else {
            Action::Uncheck(body.to_string())
        })
    }

    /// Every value `kind()` can return
    pub const KINDS: [&'static str; 6] = [
        "check",
        "uncheck",
        "check_main",
        "uncheck_main",
        "check_sub",
        "uncheck_sub",
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            Action::Check(_) => "check",
            Action::Uncheck(_) => "uncheck",
            Action::CheckMain(_) => "check_main",
            Action::UncheckMain(_) => "uncheck_main",
            Action::CheckSub { .. } => "check_sub",
            Action::UncheckSub { .. } => "uncheck_sub",
        }
    }
}

fn invalid(input: &str, reason: &str) -> FinderError {
    FinderError::InvalidAction {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Check(k) | Action::CheckMain(k) => write!(f, "+{}", k),
            Action::Uncheck(k) | Action::UncheckMain(k) => write!(f, "-{}", k),
            Action::CheckSub { category, sub } => write!(f, "+{}/{}", category, sub),
            Action::UncheckSub { category, sub } => write!(f, "-{}/{}", category, sub),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gender() -> Category {
        Category::new("Gender", &["Women", "Men", "Non-binary"])
    }

    fn selected(keywords: &[&str]) -> SelectedKeywords {
        keywords.iter().copied().collect()
    }

    #[test]
    fn test_checking_every_child_collapses_to_title() {
        let category = gender();
        let start = selected(&["Dakar"]);

        let mut state = start.clone();
        for child in ["Non-binary", "Women", "Men"] {
            state = state.check_subcategory(&category, child);
        }

        assert_eq!(state, selected(&["Dakar", "Gender"]));
        // the starting snapshot is untouched
        assert_eq!(start, selected(&["Dakar"]));
    }

    #[test]
    fn test_partial_check_does_not_collapse() {
        let state = SelectedKeywords::new()
            .check_subcategory(&gender(), "Women")
            .check_subcategory(&gender(), "Men");

        assert_eq!(state, selected(&["Women", "Men"]));
        assert!(!state.is_main_checked(&gender()));
        assert!(state.is_sub_checked(&gender(), "Men"));
    }

    #[test]
    fn test_check_subcategory_is_idempotent_when_collapsed() {
        let state = SelectedKeywords::new().check_main(&gender());
        assert_eq!(state.check_subcategory(&gender(), "Women"), selected(&["Gender"]));
    }

    #[test]
    fn test_uncheck_subcategory_expands_collapsed_category() {
        let state = SelectedKeywords::new().check_main(&gender());
        let state = state.uncheck_subcategory(&gender(), "Men");

        assert_eq!(state, selected(&["Women", "Non-binary"]));
        assert!(!state.contains("Gender"));
        assert!(!state.contains("Men"));
    }

    #[test]
    fn test_uncheck_subcategory_without_collapse_removes_only_target() {
        let state = selected(&["Women", "Men", "Youth"]).uncheck_subcategory(&gender(), "Women");
        assert_eq!(state, selected(&["Men", "Youth"]));
    }

    #[test]
    fn test_check_main_replaces_partial_children() {
        let state = selected(&["Women", "Adults"]).check_main(&gender());
        assert_eq!(state, selected(&["Adults", "Gender"]));
    }

    #[test]
    fn test_check_main_then_uncheck_main_round_trips() {
        let start = selected(&["Dakar"]);
        let state = start.check_main(&gender()).uncheck_main("Gender");
        assert_eq!(state, start);
    }

    #[test]
    fn test_main_checked_when_all_children_present() {
        assert!(selected(&["Women", "Men", "Non-binary"]).is_main_checked(&gender()));
        assert!(selected(&["Gender"]).is_sub_checked(&gender(), "Women"));
    }

    #[test]
    fn test_childless_category_is_unchecked_until_selected() {
        let housing = Category::new("Housing", &[]);
        let state = SelectedKeywords::new();
        assert!(!state.is_main_checked(&housing));

        let state = state.check_subcategory(&housing, "Rent");
        assert_eq!(state, selected(&["Rent"]));
        assert!(!state.is_main_checked(&housing));

        assert!(state.check_main(&housing).is_main_checked(&housing));
    }

    #[test]
    fn test_apply_ignores_unknown_category() {
        let taxonomy = Taxonomy::builtin();
        let state = selected(&["Dakar"]);
        let action = Action::CheckMain("Astrology".to_string());

        assert_eq!(state.apply(taxonomy, &action), state);
    }

    #[test]
    fn test_apply_runs_through_taxonomy() {
        let taxonomy = Taxonomy::builtin();
        let actions = [
            "+Migration/Refugee",
            "+Migration/Asylum",
            "+Migration/Reintegration",
            "+Migration/Citizenship",
            "+Dakar",
        ];

        let state = actions.iter().fold(SelectedKeywords::new(), |state, input| {
            state.apply(taxonomy, &Action::parse(input, taxonomy).unwrap())
        });

        assert_eq!(state, selected(&["Migration", "Dakar"]));
    }

    #[test]
    fn test_every_kind_is_listed() {
        let actions = [
            Action::Check(String::new()),
            Action::Uncheck(String::new()),
            Action::CheckMain(String::new()),
            Action::UncheckMain(String::new()),
            Action::CheckSub { category: String::new(), sub: String::new() },
            Action::UncheckSub { category: String::new(), sub: String::new() },
        ];
        let kinds: Vec<&str> = actions.iter().map(Action::kind).collect();
        assert_eq!(kinds, Action::KINDS);
    }

    #[test]
    fn test_parse_actions() {
        let taxonomy = Taxonomy::builtin();

        assert_eq!(
            Action::parse("+Health", taxonomy).unwrap(),
            Action::CheckMain("Health".to_string())
        );
        assert_eq!(
            Action::parse("-Women", taxonomy).unwrap(),
            Action::Uncheck("Women".to_string())
        );
        assert_eq!(
            Action::parse("+Health/HIV/AIDS", taxonomy).unwrap(),
            Action::CheckSub { category: "Health".to_string(), sub: "HIV/AIDS".to_string() }
        );
        assert_eq!(
            Action::parse("+HIV/AIDS", taxonomy).unwrap(),
            Action::Check("HIV/AIDS".to_string())
        );
        assert!(Action::parse("Health", taxonomy).is_err());
        assert!(Action::parse("+Health/Shelter", taxonomy).is_err());
        assert!(Action::parse("+", taxonomy).is_err());
    }
}

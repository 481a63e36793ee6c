//! Static filter taxonomy: the sections shown by the accordion filter.
//!
//! One section ("Area of Support") holds a two-level category tree; the others
//! are flat lists of keywords (people to support, gender, age group, location).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::constants::AREA_OF_SUPPORT_SECTION;
use crate::error::{FinderError, Result};

/// A top-level category and its sub-category titles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    #[serde(default)]
    pub children: Vec<String>,
}

impl Category {
    pub fn new(title: impl Into<String>, children: &[&str]) -> Self {
        Self {
            title: title.into(),
            children: children.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn has_child(&self, title: &str) -> bool {
        self.children.iter().any(|c| c == title)
    }
}

/// What a section of the accordion contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    Categories { categories: Vec<Category> },
    Keywords { keywords: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSection {
    pub title: String,
    #[serde(flatten)]
    pub content: SectionContent,
}

impl FilterSection {
    pub fn categories(title: &str, categories: Vec<Category>) -> Self {
        Self {
            title: title.to_string(),
            content: SectionContent::Categories { categories },
        }
    }

    pub fn keywords(title: &str, keywords: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            content: SectionContent::Keywords {
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            },
        }
    }

    /// Every keyword this section can contribute to a selection
    pub fn all_keywords(&self) -> Vec<&str> {
        match &self.content {
            SectionContent::Categories { categories } => categories
                .iter()
                .flat_map(|c| std::iter::once(c.title.as_str()).chain(c.children.iter().map(String::as_str)))
                .collect(),
            SectionContent::Keywords { keywords } => keywords.iter().map(String::as_str).collect(),
        }
    }
}

/// The full set of filter sections, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub sections: Vec<FilterSection>,
}

static BUILTIN: Lazy<Taxonomy> = Lazy::new(|| Taxonomy {
    sections: vec![
        FilterSection::categories(
            AREA_OF_SUPPORT_SECTION,
            vec![
                Category::new(
                    "Crisis",
                    &["Humanitarian", "Emergencies", "Disaster", "Human Trafficking", "War"],
                ),
                Category::new(
                    "Health",
                    &[
                        "Maternal care",
                        "Disease",
                        "HIV/AIDS",
                        "Disability",
                        "Sexual Health",
                        "Nutrition",
                        "Healthcare",
                        "Mental Health",
                    ],
                ),
                Category::new(
                    "Social Services",
                    &[
                        "Shelter",
                        "Water",
                        "Food",
                        "Protection",
                        "Victim of violence",
                        "Safety",
                        "Poverty",
                        "Sanitation",
                        "LBGT",
                    ],
                ),
                Category::new(
                    "Education",
                    &["Training", "Financial Support", "Facilities", "Entrepreneurship"],
                ),
                Category::new(
                    "Employment",
                    &[
                        "Vocational Training",
                        "Entrepreneurship",
                        "Technical Support",
                        "Partnerships",
                        "Financial Support",
                        "Apprenticeship",
                    ],
                ),
                Category::new("Migration", &["Refugee", "Asylum", "Reintegration", "Citizenship"]),
                Category::new(
                    "Legal",
                    &[
                        "Women's Rights",
                        "Children's Rights",
                        "Human Rights",
                        "Human Trafficking",
                        "Child Protection",
                        "Victim Advocacy",
                        "Victim of Violence",
                    ],
                ),
                Category::new(
                    "Agriculture",
                    &["Technology", "Education", "Seed Donation", "Agriculture Development"],
                ),
            ],
        ),
        FilterSection::keywords(
            "People to Support",
            &[
                "Refugees",
                "Homeless People",
                "LGBT",
                "Victims of domestic violence",
                "Disabled People",
                "Victims of violence",
                "Victims of human trafficking",
                "Orphans",
                "Mothers",
                "Migrants",
                "Farmers",
                "Students",
            ],
        ),
        FilterSection::keywords("Gender", &["Women", "Men", "Non-binary", "Other"]),
        FilterSection::keywords("Age Group", &["Children", "Youth", "Adults"]),
        FilterSection::keywords("Location", &["Dakar", "Saint-Louis", "Mbour", "Pikine"]),
    ],
});

impl Taxonomy {
    /// The taxonomy bundled with the application
    pub fn builtin() -> &'static Taxonomy {
        &BUILTIN
    }

    /// Load a replacement taxonomy from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FinderError::Config(format!("Failed to read taxonomy '{}': {}", path.display(), e))
        })?;
        let taxonomy: Taxonomy = serde_json::from_str(&content)?;
        info!(path = %path.display(), sections = taxonomy.sections.len(), "Loaded taxonomy");
        Ok(taxonomy)
    }

    pub fn section(&self, title: &str) -> Option<&FilterSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// All hierarchical categories across every section
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.sections.iter().flat_map(|s| match &s.content {
            SectionContent::Categories { categories } => categories.as_slice(),
            SectionContent::Keywords { .. } => &[][..],
        })
    }

    pub fn category(&self, title: &str) -> Option<&Category> {
        self.categories().find(|c| c.title == title)
    }

    /// First section offering `keyword`, either as a flat keyword or anywhere in its tree
    pub fn section_of_keyword(&self, keyword: &str) -> Option<&FilterSection> {
        self.sections
            .iter()
            .find(|s| s.all_keywords().contains(&keyword))
    }
}

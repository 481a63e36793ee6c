use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::constants::*;
use crate::error::FinderError;

/// A single organisation from the bundled directory.
///
/// Every field is optional: records are hand-maintained and frequently
/// incomplete, and a missing field simply never matches a filter keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Organisation {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "MainCategory", default, skip_serializing_if = "Option::is_none")]
    pub main_category: Option<String>,
    #[serde(rename = "SubCategory", default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(rename = "TargetGroup", default, skip_serializing_if = "Option::is_none")]
    pub target_group: Option<String>,
    #[serde(rename = "SubTargetGroup", default, skip_serializing_if = "Option::is_none")]
    pub sub_target_group: Option<String>,
    #[serde(rename = "Region", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Website", default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(rename = "Images", default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Keys not used by the finder, kept for display
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Organisation {
    /// Build a record from an arbitrary JSON object.
    ///
    /// Unlike `serde_json::from_value`, this never fails: a known key holding a
    /// non-string value is treated as absent and moved into `extra`.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let mut org = Organisation::default();

        for (key, value) in object {
            let text = value.as_str().map(str::to_string);
            let slot = match key.as_str() {
                NAME_FIELD => &mut org.name,
                MAIN_CATEGORY_FIELD => &mut org.main_category,
                SUB_CATEGORY_FIELD => &mut org.sub_category,
                TARGET_GROUP_FIELD => &mut org.target_group,
                SUB_TARGET_GROUP_FIELD => &mut org.sub_target_group,
                REGION_FIELD => &mut org.region,
                DESCRIPTION_FIELD => &mut org.description,
                WEBSITE_FIELD => &mut org.website,
                IMAGES_FIELD => {
                    org.images = images_from_value(value);
                    continue;
                }
                _ => {
                    org.extra.insert(key.clone(), value.clone());
                    continue;
                }
            };

            if text.is_some() {
                *slot = text;
            } else if !value.is_null() {
                org.extra.insert(key.clone(), value.clone());
            }
        }

        org
    }

    /// Value of a filterable field, if present
    pub fn field(&self, field: OrgField) -> Option<&str> {
        match field {
            OrgField::MainCategory => self.main_category.as_deref(),
            OrgField::SubCategory => self.sub_category.as_deref(),
            OrgField::TargetGroup => self.target_group.as_deref(),
            OrgField::SubTargetGroup => self.sub_target_group.as_deref(),
            OrgField::Region => self.region.as_deref(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed organisation)")
    }
}

impl From<Map<String, Value>> for Organisation {
    fn from(object: Map<String, Value>) -> Self {
        Organisation::from_json_object(&object)
    }
}

fn images_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// The record fields a filter keyword can match against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrgField {
    MainCategory,
    SubCategory,
    TargetGroup,
    SubTargetGroup,
    Region,
}

impl OrgField {
    pub const ALL: [OrgField; 5] = [
        OrgField::MainCategory,
        OrgField::SubCategory,
        OrgField::TargetGroup,
        OrgField::SubTargetGroup,
        OrgField::Region,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            OrgField::MainCategory => MAIN_CATEGORY_FIELD,
            OrgField::SubCategory => SUB_CATEGORY_FIELD,
            OrgField::TargetGroup => TARGET_GROUP_FIELD,
            OrgField::SubTargetGroup => SUB_TARGET_GROUP_FIELD,
            OrgField::Region => REGION_FIELD,
        }
    }
}

impl fmt::Display for OrgField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OrgField {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrgField::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FinderError::Config(format!("Unknown filter field: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_object_reads_known_fields() {
        let value = json!({
            "Name": "Maison Rose",
            "MainCategory": "Social Services",
            "Region": "Dakar",
            "Images": ["a.png", "b.png"],
            "Phone": "+221 33 000 00 00"
        });
        let org = Organisation::from_json_object(value.as_object().unwrap());

        assert_eq!(org.display_name(), "Maison Rose");
        assert_eq!(org.field(OrgField::MainCategory), Some("Social Services"));
        assert_eq!(org.field(OrgField::Region), Some("Dakar"));
        assert_eq!(org.field(OrgField::SubCategory), None);
        assert_eq!(org.images, vec!["a.png", "b.png"]);
        assert_eq!(org.extra.get("Phone"), Some(&json!("+221 33 000 00 00")));
    }

    #[test]
    fn test_non_string_field_is_treated_as_absent() {
        let value = json!({ "Region": 42, "TargetGroup": null });
        let org = Organisation::from_json_object(value.as_object().unwrap());

        assert_eq!(org.field(OrgField::Region), None);
        assert_eq!(org.field(OrgField::TargetGroup), None);
        assert_eq!(org.extra.get("Region"), Some(&json!(42)));
        assert!(!org.extra.contains_key("TargetGroup"));
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let org: Organisation = serde_json::from_value(json!({
            "Name": "Jamra",
            "Region": 42,
            "MainCategory": "Health"
        }))
        .unwrap();

        assert_eq!(org.field(OrgField::Region), None);
        assert_eq!(org.field(OrgField::MainCategory), Some("Health"));
        assert_eq!(org.extra.get("Region"), Some(&json!(42)));
    }

    #[test]
    fn test_org_field_parses_case_insensitively() {
        assert_eq!("region".parse::<OrgField>().unwrap(), OrgField::Region);
        assert_eq!(" SubTargetGroup ".parse::<OrgField>().unwrap(), OrgField::SubTargetGroup);
        assert!("Colour".parse::<OrgField>().is_err());
    }
}

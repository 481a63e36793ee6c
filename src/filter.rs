//! Keyword filtering over the organisation directory.
//!
//! A single keyword keeps a record when any of the configured fields equals it
//! case-insensitively (whole value, not substring). Several keywords are
//! applied as successive passes, each narrowing the previous result, so the
//! result matches all of them.

use tracing::debug;

use crate::metrics::FilterMetrics;
use crate::types::{OrgField, Organisation};

/// Keep the records where at least one of `fields` equals `keyword_uppercase` once upper-cased
pub fn filter_by_keyword<'a, I>(
    records: I,
    fields: &[OrgField],
    keyword_uppercase: &str,
) -> Vec<&'a Organisation>
where
    I: IntoIterator<Item = &'a Organisation>,
{
    records
        .into_iter()
        .filter(|org| {
            fields.iter().any(|field| {
                org.field(*field)
                    .map(|value| value.to_uppercase() == keyword_uppercase)
                    .unwrap_or(false)
            })
        })
        .collect()
}

/// Filter by every keyword in order using the default five fields
pub fn filter_by_keywords<'a, K>(records: &'a [Organisation], keywords: K) -> Vec<&'a Organisation>
where
    K: IntoIterator,
    K::Item: AsRef<str>,
{
    KeywordFilter::default().apply(records, keywords)
}

/// Keyword filter over a configurable list of record fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFilter {
    fields: Vec<OrgField>,
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self {
            fields: OrgField::ALL.to_vec(),
        }
    }
}

impl KeywordFilter {
    pub fn new(fields: Vec<OrgField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[OrgField] {
        &self.fields
    }

    /// Fold the keywords left to right, starting from the full record list
    pub fn apply<'a, K>(&self, records: &'a [Organisation], keywords: K) -> Vec<&'a Organisation>
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        let mut filtered: Vec<&'a Organisation> = records.iter().collect();
        let mut passes = 0usize;

        for keyword in keywords {
            let keyword = keyword.as_ref();
            let keyword_uppercase = keyword.to_uppercase();
            filtered = filter_by_keyword(filtered, &self.fields, &keyword_uppercase);
            passes += 1;
            debug!(keyword, remaining = filtered.len(), "Applied keyword filter pass");
        }

        FilterMetrics::record_filter_run(passes, records.len(), filtered.len());
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(main_category: &str, region: &str) -> Organisation {
        Organisation {
            main_category: Some(main_category.to_string()),
            region: Some(region.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Organisation> {
        vec![org("Health", "Dakar"), org("Legal", "Dakar"), org("Legal", "Mbour")]
    }

    #[test]
    fn test_empty_keywords_is_identity() {
        let records = sample();
        let result = filter_by_keywords(&records, Vec::<String>::new());

        assert_eq!(result.len(), records.len());
        assert!(result.iter().zip(records.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_keywords_narrow_sequentially() {
        let records = sample();

        let dakar = filter_by_keywords(&records, ["DAKAR"]);
        assert_eq!(dakar, vec![&records[0], &records[1]]);

        let dakar_legal = filter_by_keywords(&records, ["DAKAR", "LEGAL"]);
        assert_eq!(dakar_legal, vec![&records[1]]);
    }

    #[test]
    fn test_match_is_case_insensitive_and_exact() {
        let records = sample();

        assert_eq!(filter_by_keywords(&records, ["legal"]).len(), 2);
        assert!(filter_by_keywords(&records, ["Leg"]).is_empty());
    }

    #[test]
    fn test_unknown_keyword_empties_all_later_passes() {
        let records = sample();
        assert!(filter_by_keywords(&records, ["Atlantis", "Dakar"]).is_empty());
    }

    #[test]
    fn test_order_does_not_change_result() {
        let records = sample();
        assert_eq!(
            filter_by_keywords(&records, ["Legal", "Mbour"]),
            filter_by_keywords(&records, ["Mbour", "Legal"])
        );
    }

    #[test]
    fn test_missing_fields_never_match() {
        let records = vec![Organisation::default(), org("Health", "Pikine")];
        assert_eq!(filter_by_keywords(&records, ["HEALTH"]), vec![&records[1]]);
    }

    #[test]
    fn test_restricted_fields() {
        let records = sample();
        let by_region = KeywordFilter::new(vec![OrgField::Region]);

        assert!(by_region.apply(&records, ["Legal"]).is_empty());
        assert_eq!(by_region.apply(&records, ["Mbour"]), vec![&records[2]]);
    }

    #[test]
    fn test_filter_by_keyword_direct() {
        let records = sample();
        let result = filter_by_keyword(&records, &[OrgField::MainCategory], "HEALTH");
        assert_eq!(result, vec![&records[0]]);
    }
}

//! Filter model for partial-field queries
//!
//! Domain criteria types turn their populated fields into a list of
//! [`Filter`]s. Each logical field is paired with a [`MatchStrategy`] in a
//! static table owned by the domain, so the same semantics apply whether the
//! filters are evaluated in memory or rendered into SQL.

use chrono::NaiveDate;
use uuid::Uuid;

/// How a criterion value is compared with the stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Stored value must equal the criterion
    Exact,
    /// Stored text must contain the criterion, ignoring case
    ContainsIgnoreCase,
}

/// A typed criterion or stored field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Uuid(Uuid),
    Text(String),
    Date(NaiveDate),
}

/// Pairing of a logical field name with its comparison strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub strategy: MatchStrategy,
}

impl FieldRule {
    pub const fn exact(field: &'static str) -> Self {
        Self {
            field,
            strategy: MatchStrategy::Exact,
        }
    }

    pub const fn contains(field: &'static str) -> Self {
        Self {
            field,
            strategy: MatchStrategy::ContainsIgnoreCase,
        }
    }
}

/// A single populated criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: &'static str,
    pub strategy: MatchStrategy,
    pub value: FilterValue,
}

impl Filter {
    /// Builds a filter for `field`, looking its strategy up in `rules`
    ///
    /// Fields missing from the table fall back to exact matching.
    pub fn from_rules(rules: &[FieldRule], field: &'static str, value: FilterValue) -> Self {
        let strategy = rules
            .iter()
            .find(|rule| rule.field == field)
            .map(|rule| rule.strategy)
            .unwrap_or(MatchStrategy::Exact);

        Self {
            field,
            strategy,
            value,
        }
    }

    /// Evaluates this filter against a stored value
    pub fn matches(&self, stored: &FilterValue) -> bool {
        match (self.strategy, &self.value, stored) {
            (MatchStrategy::ContainsIgnoreCase, FilterValue::Text(wanted), FilterValue::Text(actual)) => {
                actual.to_lowercase().contains(&wanted.to_lowercase())
            }
            (MatchStrategy::ContainsIgnoreCase, wanted, actual) => wanted == actual,
            (MatchStrategy::Exact, wanted, actual) => wanted == actual,
        }
    }
}

/// Returns true when every filter accepts the value `lookup` reports for its field
///
/// A field `lookup` does not know about never matches.
pub fn matches_all<F>(filters: &[Filter], lookup: F) -> bool
where
    F: Fn(&str) -> Option<FilterValue>,
{
    filters.iter().all(|filter| {
        lookup(filter.field)
            .map(|stored| filter.matches(&stored))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[FieldRule] = &[FieldRule::contains("name"), FieldRule::exact("phone")];

    #[test]
    fn test_strategy_lookup() {
        let name = Filter::from_rules(RULES, "name", FilterValue::Text("john".into()));
        assert_eq!(name.strategy, MatchStrategy::ContainsIgnoreCase);

        let phone = Filter::from_rules(RULES, "phone", FilterValue::Text("123".into()));
        assert_eq!(phone.strategy, MatchStrategy::Exact);
    }

    #[test]
    fn test_contains_ignore_case() {
        let filter = Filter::from_rules(RULES, "name", FilterValue::Text("john".into()));
        assert!(filter.matches(&FilterValue::Text("John Doe".into())));
        assert!(filter.matches(&FilterValue::Text("Little JOHNNY".into())));
        assert!(!filter.matches(&FilterValue::Text("Jane Doe".into())));
    }

    #[test]
    fn test_exact_is_case_sensitive() {
        let filter = Filter::from_rules(RULES, "phone", FilterValue::Text("(11) 9999".into()));
        assert!(filter.matches(&FilterValue::Text("(11) 9999".into())));
        assert!(!filter.matches(&FilterValue::Text("(11) 99999".into())));
    }

    #[test]
    fn test_matches_all() {
        let filters = vec![
            Filter::from_rules(RULES, "name", FilterValue::Text("doe".into())),
            Filter::from_rules(RULES, "phone", FilterValue::Text("123".into())),
        ];
        let lookup = |field: &str| match field {
            "name" => Some(FilterValue::Text("John Doe".into())),
            "phone" => Some(FilterValue::Text("123".into())),
            _ => None,
        };
        assert!(matches_all(&filters, lookup));
        assert!(matches_all(&[], lookup));

        let unknown = vec![Filter::from_rules(RULES, "email", FilterValue::Text("x".into()))];
        assert!(!matches_all(&unknown, lookup));
    }
}

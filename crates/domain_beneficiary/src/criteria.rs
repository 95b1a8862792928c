//! Partial criteria for finding beneficiaries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::criteria::{matches_all, FieldRule, Filter, FilterValue};
use core_kernel::BeneficiaryId;

use crate::beneficiary::{fields, Beneficiary};

/// Comparison strategy per logical field
///
/// `name` is a case-insensitive substring match; everything else is exact.
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule::exact(fields::ID),
    FieldRule::contains(fields::NAME),
    FieldRule::exact(fields::PHONE),
    FieldRule::exact(fields::BIRTH_DATE),
];

/// Query parameters for finding beneficiaries
///
/// Unset fields are ignored; a default value matches every beneficiary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeneficiaryCriteria {
    pub id: Option<BeneficiaryId>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl BeneficiaryCriteria {
    /// Creates criteria matching names containing `name`
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Creates criteria matching an exact phone number
    pub fn by_phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Default::default()
        }
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.filters().is_empty()
    }

    /// Populated criteria as filters, in field declaration order
    pub fn filters(&self) -> Vec<Filter> {
        let candidates = [
            (fields::ID, self.id.map(|id| FilterValue::Uuid(*id.as_uuid()))),
            (fields::NAME, self.name.clone().map(FilterValue::Text)),
            (fields::PHONE, self.phone.clone().map(FilterValue::Text)),
            (fields::BIRTH_DATE, self.birth_date.map(FilterValue::Date)),
        ];

        candidates
            .into_iter()
            .filter_map(|(field, value)| value.map(|value| Filter::from_rules(FIELD_RULES, field, value)))
            .collect()
    }

    /// Evaluates the criteria against an in-memory beneficiary
    pub fn matches(&self, beneficiary: &Beneficiary) -> bool {
        matches_all(&self.filters(), |field| beneficiary.field_value(field))
    }
}

//! Beneficiary entity
//!
//! A [`Beneficiary`] can only be obtained through [`Beneficiary::create`]
//! (fresh identity and timestamps) or [`Beneficiary::restore`] (metadata
//! supplied by storage). Both run every field rule first, so no instance
//! ever exists in an invalid state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::criteria::FilterValue;
use core_kernel::record::{self, RecordProps};
use core_kernel::{BeneficiaryId, Clock};

use crate::error::BeneficiaryError;
use crate::validation::{validate_birth_date, validate_name, validate_phone, BIRTH_DATE};

/// Logical field names used by criteria and storage column tables
pub mod fields {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const PHONE: &str = "phone";
    pub const BIRTH_DATE: &str = "birthDate";
}

/// Domain fields supplied when creating a beneficiary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryData {
    pub name: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

impl BeneficiaryData {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, birth_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            birth_date,
        }
    }

    /// Builds the data bundle from raw input, parsing the birth date
    ///
    /// The birth date accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub fn parse(
        name: impl Into<String>,
        phone: impl Into<String>,
        birth_date: &str,
    ) -> Result<Self, BeneficiaryError> {
        let birth_date = record::parse_date(BIRTH_DATE, birth_date)?;
        Ok(Self::new(name, phone, birth_date))
    }
}

/// Fields that may change after creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeneficiaryChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl BeneficiaryChanges {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Default::default()
        }
    }
}

/// A person registered as a beneficiary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    id: BeneficiaryId,
    name: String,
    phone: String,
    birth_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Beneficiary {
    /// Creates a new beneficiary with a fresh v4 id
    ///
    /// `created_at` and `updated_at` are both set to the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, checked in the order name, phone,
    /// birth date.
    pub fn create(data: BeneficiaryData, clock: &dyn Clock) -> Result<Self, BeneficiaryError> {
        let now = clock.utc();
        Self::validate_data(&data, now)?;

        Ok(Self {
            id: BeneficiaryId::new(),
            name: data.name,
            phone: data.phone,
            birth_date: data.birth_date,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a beneficiary from stored data
    ///
    /// Domain fields are validated first, then the id and timestamps.
    pub fn restore(
        data: BeneficiaryData,
        props: &RecordProps,
        clock: &dyn Clock,
    ) -> Result<Self, BeneficiaryError> {
        let now = clock.utc();
        Self::validate_data(&data, now)?;
        let meta = record::validate_props(props, now)?;

        Ok(Self {
            id: BeneficiaryId::from_uuid(meta.id),
            name: data.name,
            phone: data.phone,
            birth_date: data.birth_date,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        })
    }

    /// Applies changes to name and/or phone
    ///
    /// Only the touched fields are validated. Nothing is modified unless all
    /// of them pass; on success `updated_at` moves to the current time.
    pub fn update(&mut self, changes: BeneficiaryChanges, clock: &dyn Clock) -> Result<(), BeneficiaryError> {
        if let Some(name) = &changes.name {
            validate_name(name)?;
        }
        if let Some(phone) = &changes.phone {
            validate_phone(phone)?;
        }

        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        self.touch(clock.utc());
        Ok(())
    }

    fn validate_data(data: &BeneficiaryData, now: DateTime<Utc>) -> Result<(), BeneficiaryError> {
        validate_name(&data.name)?;
        validate_phone(&data.phone)?;
        validate_birth_date(data.birth_date, now)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    pub fn id(&self) -> BeneficiaryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the domain fields as a data bundle
    pub fn data(&self) -> BeneficiaryData {
        BeneficiaryData::new(self.name.clone(), self.phone.clone(), self.birth_date)
    }

    /// Returns the record metadata in its external form
    pub fn props(&self) -> RecordProps {
        RecordProps::new(self.id.to_string(), self.created_at, self.updated_at)
    }

    /// Value of a logical field, for in-memory criteria evaluation
    pub fn field_value(&self, field: &str) -> Option<FilterValue> {
        match field {
            fields::ID => Some(FilterValue::Uuid(*self.id.as_uuid())),
            fields::NAME => Some(FilterValue::Text(self.name.clone())),
            fields::PHONE => Some(FilterValue::Text(self.phone.clone())),
            fields::BIRTH_DATE => Some(FilterValue::Date(self.birth_date)),
            _ => None,
        }
    }

    /// True when both beneficiaries share the natural key name + phone + birth date
    pub fn same_person_as(&self, other: &Beneficiary) -> bool {
        self.name == other.name && self.phone == other.phone && self.birth_date == other.birth_date
    }
}

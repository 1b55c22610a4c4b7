//! Refund request types

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Review status of a refund request
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RefundStatus {
    /// Waiting for staff review
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RefundStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Human readable label, used in messages to staff and customers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Position in the review queue: pending first, rejected last.
    #[must_use]
    pub fn queue_rank(self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::Approved => 2,
            Self::Rejected => 3,
        }
    }
}

impl fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predefined refund reasons offered on the form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RefundReason {
    #[serde(rename = "Wrong product")]
    WrongProduct,
    #[serde(rename = "Product damaged")]
    ProductDamaged,
    #[serde(rename = "Product defective")]
    ProductDefective,
    /// Free text reason in `other_reason`
    Other,
}

impl RefundReason {
    pub const ALL: [Self; 4] = [
        Self::WrongProduct,
        Self::ProductDamaged,
        Self::ProductDefective,
        Self::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WrongProduct => "Wrong product",
            Self::ProductDamaged => "Product damaged",
            Self::ProductDefective => "Product defective",
            Self::Other => "Other",
        }
    }

    /// Parses the stored/submitted text of a reason choice.
    #[must_use]
    pub fn from_choice(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

/// Bank account type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Business,
    Private,
}

impl AccountType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Private => "private",
        }
    }

    #[must_use]
    pub fn from_choice(value: &str) -> Option<Self> {
        match value {
            "business" => Some(Self::Business),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// Persisted refund request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefundRequest {
    /// Sequential id assigned by the repository
    pub id: u64,
    /// Owner
    pub user_id: u64,
    pub order_number: String,
    pub order_date: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub country: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub products: String,
    /// Reason choice text, or the free text entered for `Other`
    pub reason: String,
    pub bank_name: String,
    pub account_type: AccountType,
    pub iban: String,
    /// `true` only when the lookup service confirmed the IBAN for `country`
    pub iban_verified: bool,
    pub status: RefundStatus,
    /// Staff notes
    #[serde(default)]
    pub notes: String,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Refund request ready to be stored; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRefundRequest {
    pub user_id: u64,
    pub order_number: String,
    pub order_date: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub country: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub products: String,
    pub reason: String,
    pub bank_name: String,
    pub account_type: AccountType,
    pub iban: String,
    pub iban_verified: bool,
}

impl NewRefundRequest {
    /// Builds the stored record: status `pending`, empty notes, both timestamps `now`.
    #[must_use]
    pub fn into_request(self, id: u64, now: DateTime<Utc>) -> RefundRequest {
        RefundRequest {
            id,
            user_id: self.user_id,
            order_number: self.order_number,
            order_date: self.order_date,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            email: self.email,
            country: self.country,
            address: self.address,
            postal_code: self.postal_code,
            city: self.city,
            products: self.products,
            reason: self.reason,
            bank_name: self.bank_name,
            account_type: self.account_type,
            iban: self.iban,
            iban_verified: self.iban_verified,
            status: RefundStatus::Pending,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Ids selected for a staff status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub ids: Vec<u64>,
}

/// Result of a staff status change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusChangeResult {
    pub status: RefundStatus,
    /// Requests whose status actually changed
    pub updated_ids: Vec<u64>,
}

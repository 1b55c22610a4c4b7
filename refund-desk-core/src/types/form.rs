//! Refund request form: raw submission, field cleaning and submission outcome

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{AccountType, NewRefundRequest, RefundReason, RefundRequest};

/// Key collecting errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

const REQUIRED_MESSAGE: &str = "This field is required.";
const INVALID_DATE_MESSAGE: &str = "Enter a valid date.";
const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email address.";
const IBAN_FORMAT_MESSAGE: &str =
    "Only digits and upper case letters. E.g. 'PL10105000997603123456789123'";

/// Date format accepted for `order_date`.
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d";

static IBAN_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[0-9A-Z]{1,30}$").ok());

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Errors collected while cleaning a form, keyed by field name.
///
/// Serializes as `{"field": ["message", ...], "__all__": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Adds an error that is not tied to a single field.
    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for `field` (empty when none).
    #[must_use]
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn non_field(&self) -> &[String] {
        self.field(NON_FIELD_ERRORS)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Raw refund form as submitted by a customer.
///
/// Every field is optional so that missing values can be reported per field
/// instead of failing deserialization as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefundForm {
    pub order_number: Option<String>,
    /// `YYYY-MM-DD`
    pub order_date: Option<String>,
    pub products: Option<String>,
    pub reason_choice: Option<String>,
    pub other_reason: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub iban: Option<String>,
    pub bank_name: Option<String>,
    pub account_type: Option<String>,
}

/// Form values after field-level cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRefundForm {
    pub order_number: String,
    pub order_date: NaiveDate,
    pub products: String,
    pub reason_choice: RefundReason,
    pub other_reason: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    pub iban: String,
    pub bank_name: String,
    pub account_type: AccountType,
}

impl CleanedRefundForm {
    /// Reason as stored on the request: the free text for `Other`, the choice otherwise.
    #[must_use]
    pub fn reason(&self) -> String {
        match (self.reason_choice, &self.other_reason) {
            (RefundReason::Other, Some(text)) => text.clone(),
            (choice, _) => choice.as_str().to_string(),
        }
    }

    #[must_use]
    pub fn into_new_request(self, user_id: u64, iban_verified: bool) -> NewRefundRequest {
        let reason = self.reason();
        NewRefundRequest {
            user_id,
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
            reason,
            bank_name: self.bank_name,
            account_type: self.account_type,
            iban: self.iban,
            iban_verified,
        }
    }
}

/// Result of cleaning: the cleaned values when every field passed, plus the
/// errors found so far.
///
/// `iban` and `country` are exposed separately so the IBAN lookup can run
/// even when unrelated fields failed.
#[derive(Debug, Clone)]
pub struct FormCleaning {
    pub cleaned: Option<CleanedRefundForm>,
    pub errors: FormErrors,
    /// IBAN and country, when both passed field validation
    pub iban_and_country: Option<(String, String)>,
}

impl RefundForm {
    /// Form pre-filled from a stored request, for editing.
    ///
    /// A stored reason outside the predefined choices is shown as `Other`
    /// with the text in `other_reason`.
    #[must_use]
    pub fn from_request(request: &RefundRequest) -> Self {
        let (reason_choice, other_reason) = match RefundReason::from_choice(&request.reason) {
            Some(choice) => (choice, None),
            None => (RefundReason::Other, Some(request.reason.clone())),
        };
        Self {
            order_number: Some(request.order_number.clone()),
            order_date: Some(request.order_date.format(ORDER_DATE_FORMAT).to_string()),
            products: Some(request.products.clone()),
            reason_choice: Some(reason_choice.as_str().to_string()),
            other_reason,
            first_name: Some(request.first_name.clone()),
            last_name: Some(request.last_name.clone()),
            phone_number: Some(request.phone_number.clone()),
            email: Some(request.email.clone()),
            address: Some(request.address.clone()),
            postal_code: Some(request.postal_code.clone()),
            city: Some(request.city.clone()),
            country: Some(request.country.clone()),
            iban: Some(request.iban.clone()),
            bank_name: Some(request.bank_name.clone()),
            account_type: Some(request.account_type.as_str().to_string()),
        }
    }

    /// Runs every field check and the reason rule.
    ///
    /// Does not contact the IBAN lookup service; that happens in
    /// [`RefundService::submit`](crate::services::RefundService::submit).
    #[must_use]
    pub fn clean(&self) -> FormCleaning {
        let mut errors = FormErrors::new();
        let mut fields = FieldCleaner {
            errors: &mut errors,
        };

        let order_number = fields.text("order_number", self.order_number.as_deref(), 100);
        let order_date = fields.date("order_date", self.order_date.as_deref());
        let products = fields.text("products", self.products.as_deref(), usize::MAX);
        let reason_choice = fields.reason(self.reason_choice.as_deref());
        let other_reason = non_blank(self.other_reason.as_deref());
        let first_name = fields.text("first_name", self.first_name.as_deref(), 100);
        let last_name = fields.text("last_name", self.last_name.as_deref(), 100);
        let phone_number = fields.text("phone_number", self.phone_number.as_deref(), 15);
        let email = fields.email(self.email.as_deref());
        let address = fields.text("address", self.address.as_deref(), usize::MAX);
        let postal_code = fields.text("postal_code", self.postal_code.as_deref(), 20);
        let city = fields.text("city", self.city.as_deref(), 100);
        let country = fields.text("country", self.country.as_deref(), 100);
        let iban = fields.iban(self.iban.as_deref());
        let bank_name = fields.text("bank_name", self.bank_name.as_deref(), 200);
        let account_type = fields.account_type(self.account_type.as_deref());

        if reason_choice == Some(RefundReason::Other) && other_reason.is_none() {
            errors.add("other_reason", REQUIRED_MESSAGE);
        }

        let iban_and_country = iban.clone().zip(country.clone());

        let cleaned = match (
            order_number,
            order_date,
            products,
            reason_choice,
            first_name,
            last_name,
            phone_number,
            email,
            address,
            postal_code,
            city,
            country,
            iban,
            bank_name,
            account_type,
        ) {
            (
                Some(order_number),
                Some(order_date),
                Some(products),
                Some(reason_choice),
                Some(first_name),
                Some(last_name),
                Some(phone_number),
                Some(email),
                Some(address),
                Some(postal_code),
                Some(city),
                Some(country),
                Some(iban),
                Some(bank_name),
                Some(account_type),
            ) if errors.is_empty() => Some(CleanedRefundForm {
                order_number,
                order_date,
                products,
                reason_choice,
                other_reason,
                first_name,
                last_name,
                phone_number,
                email,
                address,
                postal_code,
                city,
                country,
                iban,
                bank_name,
                account_type,
            }),
            _ => None,
        };

        FormCleaning {
            cleaned,
            errors,
            iban_and_country,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

struct FieldCleaner<'a> {
    errors: &'a mut FormErrors,
}

impl FieldCleaner<'_> {
    fn required(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let value = non_blank(value);
        if value.is_none() {
            self.errors.add(field, REQUIRED_MESSAGE);
        }
        value
    }

    fn text(&mut self, field: &str, value: Option<&str>, max_len: usize) -> Option<String> {
        let value = self.required(field, value)?;
        let len = value.chars().count();
        if len > max_len {
            self.errors.add(
                field,
                format!("Ensure this value has at most {max_len} characters (it has {len})."),
            );
            return None;
        }
        Some(value)
    }

    fn date(&mut self, field: &str, value: Option<&str>) -> Option<NaiveDate> {
        let value = self.required(field, value)?;
        NaiveDate::parse_from_str(&value, ORDER_DATE_FORMAT)
            .inspect_err(|_| self.errors.add(field, INVALID_DATE_MESSAGE))
            .ok()
    }

    fn email(&mut self, value: Option<&str>) -> Option<String> {
        let value = self.text("email", value, 254)?;
        if EMAIL_PATTERN
            .as_ref()
            .is_some_and(|re| re.is_match(&value))
        {
            Some(value)
        } else {
            self.errors.add("email", INVALID_EMAIL_MESSAGE);
            None
        }
    }

    fn iban(&mut self, value: Option<&str>) -> Option<String> {
        let value = self.text("iban", value, 34)?;
        if IBAN_PATTERN.as_ref().is_some_and(|re| re.is_match(&value)) {
            Some(value)
        } else {
            self.errors.add("iban", IBAN_FORMAT_MESSAGE);
            None
        }
    }

    fn reason(&mut self, value: Option<&str>) -> Option<RefundReason> {
        let value = self.required("reason_choice", value)?;
        let choice = RefundReason::from_choice(&value);
        if choice.is_none() {
            self.errors.add("reason_choice", invalid_choice(&value));
        }
        choice
    }

    fn account_type(&mut self, value: Option<&str>) -> Option<AccountType> {
        let value = self.required("account_type", value)?;
        let choice = AccountType::from_choice(&value);
        if choice.is_none() {
            self.errors.add("account_type", invalid_choice(&value));
        }
        choice
    }
}

fn invalid_choice(value: &str) -> String {
    format!("Select a valid choice. {value} is not one of the available choices.")
}

/// Outcome of a refund submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Nothing was stored
    Rejected(FormErrors),
    /// Stored without confirmation from the lookup service
    AcceptedUnverified(RefundRequest),
    /// Stored with a confirmed IBAN
    AcceptedVerified(RefundRequest),
}

impl SubmissionOutcome {
    /// The stored request, if the submission was accepted.
    #[must_use]
    pub fn request(&self) -> Option<&RefundRequest> {
        match self {
            Self::Rejected(_) => None,
            Self::AcceptedUnverified(request) | Self::AcceptedVerified(request) => Some(request),
        }
    }

    #[must_use]
    pub fn errors(&self) -> Option<&FormErrors> {
        match self {
            Self::Rejected(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Defaults offered on a fresh refund form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundFormInitial {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::RefundStatus;

    fn filled_form() -> RefundForm {
        RefundForm {
            order_number: Some("ORD-1".into()),
            order_date: Some("2024-03-01".into()),
            products: Some("Kettle".into()),
            reason_choice: Some("Product damaged".into()),
            other_reason: None,
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            phone_number: Some("+48123456789".into()),
            email: Some("ada@example.com".into()),
            address: Some("Main St 1".into()),
            postal_code: Some("00-001".into()),
            city: Some("Warsaw".into()),
            country: Some("PL".into()),
            iban: Some("PL10105000997603123456789123".into()),
            bank_name: Some("Bank".into()),
            account_type: Some("private".into()),
        }
    }

    #[test]
    fn clean_accepts_filled_form() {
        let cleaning = filled_form().clean();
        assert!(cleaning.errors.is_empty(), "{:?}", cleaning.errors);
        let cleaned = cleaning.cleaned.unwrap();
        assert_eq!(cleaned.reason(), "Product damaged");
        assert_eq!(
            cleaning.iban_and_country,
            Some(("PL10105000997603123456789123".into(), "PL".into()))
        );
    }

    #[test]
    fn clean_reports_every_missing_field() {
        let cleaning = RefundForm::default().clean();
        assert!(cleaning.cleaned.is_none());
        for field in [
            "order_number",
            "order_date",
            "products",
            "reason_choice",
            "first_name",
            "last_name",
            "phone_number",
            "email",
            "address",
            "postal_code",
            "city",
            "country",
            "iban",
            "bank_name",
            "account_type",
        ] {
            assert_eq!(
                cleaning.errors.field(field),
                ["This field is required.".to_string()],
                "{field}"
            );
        }
        assert!(cleaning.iban_and_country.is_none());
    }

    #[test]
    fn other_reason_requires_text() {
        let form = RefundForm {
            reason_choice: Some("Other".into()),
            other_reason: Some("   ".into()),
            ..filled_form()
        };
        let cleaning = form.clean();
        assert!(cleaning.cleaned.is_none());
        assert_eq!(
            cleaning.errors.field("other_reason"),
            ["This field is required.".to_string()]
        );
    }

    #[test]
    fn other_reason_text_becomes_reason() {
        let form = RefundForm {
            reason_choice: Some("Other".into()),
            other_reason: Some("Arrived late".into()),
            ..filled_form()
        };
        let cleaned = form.clean().cleaned.unwrap();
        assert_eq!(cleaned.reason(), "Arrived late");
    }

    #[test]
    fn other_reason_ignored_for_predefined_choice() {
        let form = RefundForm {
            other_reason: Some("ignored".into()),
            ..filled_form()
        };
        assert_eq!(form.clean().cleaned.unwrap().reason(), "Product damaged");
    }

    #[test]
    fn lowercase_iban_rejected_by_pattern() {
        let form = RefundForm {
            iban: Some("pl10105000997603123456789123".into()),
            ..filled_form()
        };
        let cleaning = form.clean();
        assert!(cleaning.errors.has_field("iban"));
        assert!(cleaning.iban_and_country.is_none());
    }

    #[test]
    fn max_length_enforced() {
        let form = RefundForm {
            phone_number: Some("1".repeat(16)),
            ..filled_form()
        };
        let cleaning = form.clean();
        assert_eq!(
            cleaning.errors.field("phone_number"),
            ["Ensure this value has at most 15 characters (it has 16).".to_string()]
        );
    }

    #[test]
    fn invalid_date_and_choice() {
        let form = RefundForm {
            order_date: Some("01/03/2024".into()),
            account_type: Some("shared".into()),
            ..filled_form()
        };
        let cleaning = form.clean();
        assert_eq!(
            cleaning.errors.field("order_date"),
            ["Enter a valid date.".to_string()]
        );
        assert!(cleaning.errors.has_field("account_type"));
        // IBAN check still possible with unrelated failures
        assert!(cleaning.iban_and_country.is_some());
    }

    #[test]
    fn form_errors_serialize_flat() {
        let mut errors = FormErrors::new();
        errors.add("iban", "bad");
        errors.add_non_field("Provided number is not a valid IBAN.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["iban"][0], "bad");
        assert_eq!(json["__all__"][0], "Provided number is not a valid IBAN.");
    }

    fn stored(reason: &str) -> RefundRequest {
        let mut request = filled_form()
            .clean()
            .cleaned
            .unwrap()
            .into_new_request(1, true)
            .into_request(9, Utc::now());
        request.reason = reason.to_string();
        request
    }

    #[test]
    fn from_request_recovers_choice() {
        let form = RefundForm::from_request(&stored("Wrong product"));
        assert_eq!(form.reason_choice.as_deref(), Some("Wrong product"));
        assert_eq!(form.other_reason, None);
        assert_eq!(form.order_date.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn from_request_maps_free_text_to_other() {
        let request = stored("Arrived late");
        assert_eq!(request.status, RefundStatus::Pending);
        let form = RefundForm::from_request(&request);
        assert_eq!(form.reason_choice.as_deref(), Some("Other"));
        assert_eq!(form.other_reason.as_deref(), Some("Arrived late"));
        // Editing and resubmitting keeps the stored reason
        assert_eq!(form.clean().cleaned.unwrap().reason(), "Arrived late");
    }
}

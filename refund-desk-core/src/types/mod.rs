//! Type definition module

mod form;
mod iban;
mod notification;
mod refund;
mod user;

pub use form::{
    CleanedRefundForm, FormCleaning, FormErrors, RefundForm, RefundFormInitial,
    SubmissionOutcome, NON_FIELD_ERRORS, ORDER_DATE_FORMAT,
};
pub use iban::{
    country_mismatch_message, CachedValidation, ValidationKey, ValidationOutcome,
    INVALID_IBAN_MESSAGE, SERVICE_UNAVAILABLE_MESSAGE,
};
pub use notification::{NotificationRecipient, StatusChangeNotification};
pub use refund::{
    AccountType, NewRefundRequest, RefundReason, RefundRequest, RefundStatus,
    StatusChangeRequest, StatusChangeResult,
};
pub use user::User;

// Re-export lookup client types used in core signatures
pub use refund_desk_client::{IbanClientConfig, IbanLookup};

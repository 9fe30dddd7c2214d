//! Pawnshop intake form submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::IntakeRecordId;

/// Intake data as submitted, before it has been stored.
///
/// Free-text fields are kept verbatim; any composition of several raw form
/// inputs into one value happens before this type is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIntakeRecord {
    /// Customer's full name.
    pub full_name: String,
    /// Where the collateral came from (business proceeds, personal assets, ...).
    pub collateral_origin: Option<String>,
    /// Whether the customer transacts for themselves or on behalf of someone.
    pub transaction_status: Option<String>,
    /// What the loan is for.
    pub transaction_purpose: Option<String>,
    /// Cash or non-cash.
    pub payment_method: String,
    /// Product variant (regular, business, flexi with duration).
    pub desired_feature: Option<String>,
    /// Bank destination for the disbursed money.
    pub disbursement: Option<String>,
    /// What to do with any auction surplus.
    pub auction_surplus: Option<String>,
    /// Requested loan size.
    pub loan_amount: Option<String>,
    /// The pawned item.
    pub collateral_item: String,
    pub address: String,
    pub phone: String,
}

/// A stored intake record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct IntakeRecord {
    pub id: IntakeRecordId,
    pub full_name: String,
    pub collateral_origin: Option<String>,
    pub transaction_status: Option<String>,
    pub transaction_purpose: Option<String>,
    pub payment_method: String,
    pub desired_feature: Option<String>,
    pub disbursement: Option<String>,
    pub auction_surplus: Option<String>,
    pub loan_amount: Option<String>,
    pub collateral_item: String,
    pub address: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

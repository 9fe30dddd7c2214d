//! Pawnshop intake record repository.

use sqlx::PgPool;
use tracing::instrument;

use ngantri_core::{IntakeRecord, IntakeRecordId, NewIntakeRecord};

use super::RepositoryError;

const RECORD_COLUMNS: &str = "id, full_name, collateral_origin, transaction_status, \
     transaction_purpose, payment_method, desired_feature, disbursement, auction_surplus, \
     loan_amount, collateral_item, address, phone, created_at";

/// Repository for intake records.
pub struct PawnshopRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PawnshopRepository<'a> {
    /// Create a new pawnshop repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a submitted intake form.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, record), fields(full_name = %record.full_name))]
    pub async fn add(&self, record: &NewIntakeRecord) -> Result<IntakeRecord, RepositoryError> {
        let stored = sqlx::query_as::<_, IntakeRecord>(&format!(
            r"
            INSERT INTO pawnshop_intake (
                full_name, collateral_origin, transaction_status, transaction_purpose,
                payment_method, desired_feature, disbursement, auction_surplus,
                loan_amount, collateral_item, address, phone
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {RECORD_COLUMNS}
            "
        ))
        .bind(&record.full_name)
        .bind(&record.collateral_origin)
        .bind(&record.transaction_status)
        .bind(&record.transaction_purpose)
        .bind(&record.payment_method)
        .bind(&record.desired_feature)
        .bind(&record.disbursement)
        .bind(&record.auction_surplus)
        .bind(&record.loan_amount)
        .bind(&record.collateral_item)
        .bind(&record.address)
        .bind(&record.phone)
        .fetch_one(self.pool)
        .await?;

        tracing::info!(record_id = %stored.id, "Intake record stored");
        Ok(stored)
    }

    /// All intake records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<IntakeRecord>, RepositoryError> {
        let records = sqlx::query_as::<_, IntakeRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM pawnshop_intake ORDER BY id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    /// Get one intake record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has this id.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: IntakeRecordId) -> Result<IntakeRecord, RepositoryError> {
        sqlx::query_as::<_, IntakeRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM pawnshop_intake WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }
}

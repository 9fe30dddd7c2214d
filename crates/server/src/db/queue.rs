//! Queue ticket repository.
//!
//! The only operation with a concurrency hazard is [`QueueRepository::allocate_next`]:
//! numbers must be dense and unique per business day no matter how many
//! requests race for them. Each allocation runs in one transaction that
//! first upserts the day's counter row, which takes the row lock, and then
//! inserts the ticket. Competing allocations for the same day block on that
//! lock until the holder commits or rolls back.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::instrument;

use ngantri_core::{BusinessCalendar, QueueStatus, QueueTicket, TicketId, TicketNumber};

use super::RepositoryError;

const TICKET_COLUMNS: &str = "id, status, issued_on, number, created_at";

/// Repository for queue tickets.
pub struct QueueRepository<'a> {
    pool: &'a PgPool,
    calendar: BusinessCalendar,
}

impl<'a> QueueRepository<'a> {
    /// Create a new queue repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool, calendar: BusinessCalendar) -> Self {
        Self { pool, calendar }
    }

    /// Issue the next queue number for the business day containing `now`.
    ///
    /// The first ticket of a day is number 1, whatever the previous day
    /// ended on.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails; nothing
    /// is persisted in that case.
    #[instrument(skip(self))]
    pub async fn allocate_next(&self, now: DateTime<Utc>) -> Result<QueueTicket, RepositoryError> {
        let today = self.calendar.date_of(now);
        let mut tx = self.pool.begin().await?;

        let last_number: i32 = sqlx::query_scalar(
            r"
            INSERT INTO queue_day_counter (issued_on, last_number)
            VALUES ($1, 1)
            ON CONFLICT (issued_on)
            DO UPDATE SET last_number = queue_day_counter.last_number + 1
            RETURNING last_number
            ",
        )
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        let number = TicketNumber::new(last_number).map_err(|e| {
            RepositoryError::DataCorruption(format!("counter for {today} is invalid: {e}"))
        })?;

        let ticket = sqlx::query_as::<_, QueueTicket>(&format!(
            r"
            INSERT INTO queue_ticket (id, status, issued_on, number, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TICKET_COLUMNS}
            "
        ))
        .bind(TicketId::generate())
        .bind(QueueStatus::Waiting)
        .bind(today)
        .bind(number)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            ticket_id = %ticket.id,
            number = ticket.number.get(),
            issued_on = %ticket.issued_on,
            "Queue ticket issued"
        );
        Ok(ticket)
    }

    /// Overwrite the status of a ticket.
    ///
    /// No transition rules are enforced; a served ticket can be set back to
    /// waiting.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no ticket has this id, leaving
    /// every row untouched. Returns `RepositoryError::Database` if the
    /// update fails.
    #[instrument(skip(self))]
    pub async fn change_status(
        &self,
        id: TicketId,
        status: QueueStatus,
    ) -> Result<QueueTicket, RepositoryError> {
        let ticket = sqlx::query_as::<_, QueueTicket>(&format!(
            r"
            UPDATE queue_ticket
            SET status = $2
            WHERE id = $1
            RETURNING {TICKET_COLUMNS}
            "
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        tracing::info!(ticket_id = %id, %status, "Queue ticket status changed");
        Ok(ticket)
    }

    /// Get a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: TicketId) -> Result<Option<QueueTicket>, RepositoryError> {
        let ticket = sqlx::query_as::<_, QueueTicket>(&format!(
            "SELECT {TICKET_COLUMNS} FROM queue_ticket WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(ticket)
    }

    /// All tickets of one business day, ascending by number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<QueueTicket>, RepositoryError> {
        let tickets = sqlx::query_as::<_, QueueTicket>(&format!(
            r"
            SELECT {TICKET_COLUMNS}
            FROM queue_ticket
            WHERE issued_on = $1
            ORDER BY number ASC
            "
        ))
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(tickets)
    }

    /// Remove one day's tickets and restart its numbering.
    ///
    /// Returns the number of tickets deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails.
    #[instrument(skip(self))]
    pub async fn delete_for_date(&self, date: NaiveDate) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Lock the counter first so a concurrent allocation cannot slip a
        // ticket in between the two deletes.
        sqlx::query("DELETE FROM queue_day_counter WHERE issued_on = $1")
            .bind(date)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM queue_ticket WHERE issued_on = $1")
            .bind(date)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::warn!(%date, deleted, "Queue reset for date");
        Ok(deleted)
    }

    /// Remove every ticket and counter.
    ///
    /// Returns the number of tickets deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM queue_day_counter")
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM queue_ticket")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::warn!(deleted, "Queue reset");
        Ok(deleted)
    }
}

//! Queue management commands.

use chrono::{NaiveDate, Utc};
use ngantri_core::{BusinessCalendar, QueueStatus, QueueTicket, TicketId};
use ngantri_server::db::QueueRepository;

use super::{CommandError, connect};

/// Issue the next number for today.
pub async fn issue() -> Result<(), CommandError> {
    let (config, pool) = connect().await?;
    let ticket = QueueRepository::new(&pool, config.calendar)
        .allocate_next(Utc::now())
        .await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Issued number {} ({})", ticket.number, ticket.id);
    }
    Ok(())
}

/// Print a day's tickets.
pub async fn list(date: Option<NaiveDate>) -> Result<(), CommandError> {
    let (config, pool) = connect().await?;
    let date = date.unwrap_or_else(|| config.calendar.today());
    let tickets = QueueRepository::new(&pool, config.calendar)
        .list_for_date(date)
        .await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Queue for {date}: {} tickets", tickets.len());
        for ticket in &tickets {
            println!("{}", format_row(ticket, &config.calendar));
        }
    }
    Ok(())
}

/// Overwrite a ticket's status.
pub async fn mark(raw_id: &str, status: QueueStatus) -> Result<(), CommandError> {
    let id: TicketId = raw_id
        .parse()
        .map_err(|_| CommandError::InvalidTicketId(raw_id.to_owned()))?;

    let (config, pool) = connect().await?;
    let ticket = QueueRepository::new(&pool, config.calendar)
        .change_status(id, status)
        .await?;

    #[allow(clippy::print_stdout)]
    {
        println!(
            "Number {} on {} is now {}",
            ticket.number, ticket.issued_on, ticket.status
        );
    }
    Ok(())
}

/// Delete one day's tickets, or all of them.
pub async fn reset(date: Option<NaiveDate>, all: bool) -> Result<(), CommandError> {
    let (config, pool) = connect().await?;
    let queue = QueueRepository::new(&pool, config.calendar);

    let deleted = if all {
        queue.delete_all().await?
    } else {
        queue
            .delete_for_date(date.unwrap_or_else(|| config.calendar.today()))
            .await?
    };

    #[allow(clippy::print_stdout)]
    {
        println!("Deleted {deleted} tickets");
    }
    Ok(())
}

fn format_row(ticket: &QueueTicket, calendar: &BusinessCalendar) -> String {
    format!(
        "{:>4}  {:<7}  {}  {}",
        ticket.number.get(),
        ticket.status,
        calendar.local(ticket.created_at).format("%H:%M:%S"),
        ticket.id
    )
}

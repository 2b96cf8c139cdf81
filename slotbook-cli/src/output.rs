//! Rendering of command outcomes.
//!
//! The table format prints the short human messages the interactive shell
//! also uses; JSON and CSV carry the same data in machine-readable form.

use crate::error::CliError;
use crate::utils::format_timestamp;
use slotbook::config::OutputFormat;
use slotbook::{Outcome, Reservation, Role, Schedule};
use std::io::Write;

/// Column headers for reservation rows.
const RESERVATION_HEADERS: &[&str] = &["id", "requester", "provider", "item", "date", "created_at"];

/// Column headers for schedule rows.
const SCHEDULE_HEADERS: &[&str] = &["date", "kind", "name", "doses"];

/// Write `outcome` to `out` in the requested format.
pub fn write_outcome<W: Write>(
    out: &mut W,
    outcome: &Outcome,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => write_table(out, outcome),
        OutputFormat::Json => write_json(out, outcome),
        OutputFormat::Csv => write_csv(out, outcome),
    }
}

fn write_table<W: Write>(out: &mut W, outcome: &Outcome) -> Result<(), CliError> {
    match outcome {
        Outcome::Booked(booking) => writeln!(
            out,
            "Appointment ID: {}, Caregiver username: {}",
            booking.reservation_id, booking.provider
        )?,
        Outcome::Cancelled(_) => writeln!(out, "Appointment successfully cancelled.")?,
        Outcome::AvailabilityUploaded { .. } => writeln!(out, "Availability uploaded!")?,
        Outcome::DosesUpdated { .. } => writeln!(out, "Doses updated!")?,
        Outcome::Schedule(schedule) => write_schedule_table(out, schedule)?,
        Outcome::Appointments { role, reservations } => {
            for reservation in reservations {
                write_appointment_line(out, *role, reservation)?;
            }
        }
    }
    Ok(())
}

fn write_schedule_table<W: Write>(out: &mut W, schedule: &Schedule) -> std::io::Result<()> {
    writeln!(out, "Caregivers:")?;
    for provider in &schedule.providers {
        writeln!(out, "{provider}")?;
    }
    writeln!(out)?;
    writeln!(out, "Vaccines:")?;
    for stock in &schedule.inventory {
        writeln!(out, "{}: {} doses", stock.item, stock.doses)?;
    }
    Ok(())
}

/// Requesters see who they are booked with; providers see who booked them.
fn write_appointment_line<W: Write>(
    out: &mut W,
    role: Role,
    reservation: &Reservation,
) -> std::io::Result<()> {
    let (label, counterpart) = match role {
        Role::Requester => ("Caregiver Name", reservation.provider()),
        Role::Provider => ("Patient Name", reservation.requester()),
    };
    writeln!(
        out,
        "Appointment ID: {}, Vaccine Name: {}, Date: {}, {label}: {counterpart}",
        reservation.id(),
        reservation.item(),
        reservation.date(),
    )
}

fn reservation_json(reservation: &Reservation) -> serde_json::Value {
    serde_json::json!({
        "id": reservation.id().value(),
        "requester": reservation.requester().as_str(),
        "provider": reservation.provider().as_str(),
        "item": reservation.item().as_str(),
        "date": reservation.date().to_string(),
        "created_at": format_timestamp(reservation.created_at()),
    })
}

fn write_json<W: Write>(out: &mut W, outcome: &Outcome) -> Result<(), CliError> {
    // Reservations carry a raw SystemTime, so they are rendered by hand.
    let value = match outcome {
        Outcome::Cancelled(reservation) => serde_json::json!({
            "outcome": "cancelled",
            "reservation": reservation_json(reservation),
        }),
        Outcome::Appointments { role, reservations } => serde_json::json!({
            "outcome": "appointments",
            "role": role.to_string(),
            "reservations": reservations.iter().map(reservation_json).collect::<Vec<_>>(),
        }),
        other => serde_json::to_value(other).map_err(json_error)?,
    };

    serde_json::to_writer_pretty(&mut *out, &value).map_err(json_error)?;
    writeln!(out)?;

    Ok(())
}

/// Convert serde_json::Error to CliError.
fn json_error(e: serde_json::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

fn reservation_record(reservation: &Reservation) -> Vec<String> {
    vec![
        reservation.id().to_string(),
        reservation.requester().to_string(),
        reservation.provider().to_string(),
        reservation.item().to_string(),
        reservation.date().to_string(),
        format_timestamp(reservation.created_at()),
    ]
}

fn write_csv<W: Write>(out: &mut W, outcome: &Outcome) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new().from_writer(out);

    match outcome {
        Outcome::Booked(booking) => {
            writer
                .write_record(["reservation_id", "provider"])
                .map_err(csv_error)?;
            writer
                .write_record([booking.reservation_id.to_string(), booking.provider.to_string()])
                .map_err(csv_error)?;
        }
        Outcome::Cancelled(reservation) => {
            writer.write_record(RESERVATION_HEADERS).map_err(csv_error)?;
            writer
                .write_record(reservation_record(reservation))
                .map_err(csv_error)?;
        }
        Outcome::Appointments { reservations, .. } => {
            writer.write_record(RESERVATION_HEADERS).map_err(csv_error)?;
            for reservation in reservations {
                writer
                    .write_record(reservation_record(reservation))
                    .map_err(csv_error)?;
            }
        }
        Outcome::AvailabilityUploaded { provider, date } => {
            writer.write_record(["provider", "date"]).map_err(csv_error)?;
            writer
                .write_record([provider.to_string(), date.to_string()])
                .map_err(csv_error)?;
        }
        Outcome::DosesUpdated { item, doses } => {
            writer.write_record(["item", "doses"]).map_err(csv_error)?;
            writer
                .write_record([item.to_string(), doses.to_string()])
                .map_err(csv_error)?;
        }
        Outcome::Schedule(schedule) => {
            writer.write_record(SCHEDULE_HEADERS).map_err(csv_error)?;
            let date = schedule.date.to_string();
            for provider in &schedule.providers {
                writer
                    .write_record([date.as_str(), "provider", provider.as_str(), ""])
                    .map_err(csv_error)?;
            }
            for stock in &schedule.inventory {
                let doses = stock.doses.to_string();
                writer
                    .write_record([date.as_str(), "item", stock.item.as_str(), doses.as_str()])
                    .map_err(csv_error)?;
            }
        }
    }

    writer.flush()?;

    Ok(())
}

//! `booking` CLI — check, book, and reschedule rooms against a JSON booking file.
//!
//! ## Usage
//!
//! ```sh
//! # Can room 101 be booked for two nights?
//! booking -b bookings.json check --room 101 --check-in 2026-02-02 --check-out 2026-02-04
//!
//! # Who is staying on a given day?
//! booking -b bookings.json day --date 2026-02-02 --room 101
//!
//! # Month calendar for one room
//! booking -b bookings.json month --year 2026 --month 2 --room 101
//!
//! # Free runs of at least 3 nights
//! booking -b bookings.json free --room 101 --from 2026-02-01 --to 2026-03-01 --min-nights 3
//!
//! # Book, reschedule, cancel (persist with --write)
//! booking -b bookings.json book --room 101 --check-in 2026-02-10 --check-out 2026-02-12 \
//!   --guest "Kim" --contact 010-1234-5678 --write
//! booking -b bookings.json reschedule --id <ID> --check-in 2026-02-20 --write
//! booking -b bookings.json cancel --id <ID> --write
//!
//! # Price a stay
//! booking quote --room-price 120000 --check-in 2026-02-01 --check-out 2026-02-04
//! ```
//!
//! `--today` pins the reference day; otherwise the local date is used.

use anyhow::{Context, Result};
use booking_engine::calendar::MonthView;
use booking_engine::model::{parse_bookings_json, parse_day};
use booking_engine::quote::{booking_number, quote_stay};
use booking_engine::{
    find_first_free_range, Booking, BookingRequest, DateRange, Decision, RejectionKind, Room,
};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "booking",
    version,
    about = "Room booking availability checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file holding the booking list
    #[arg(short, long, global = true, env = "BOOKINGS_FILE")]
    bookings: Option<String>,

    /// Reference day for past-date checks (defaults to the local date)
    #[arg(long, global = true, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log decisions to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a room can be booked for a stay (exit code 1 when rejected)
    Check {
        #[arg(long)]
        room: String,
        #[arg(long, value_parser = parse_date_arg)]
        check_in: NaiveDate,
        #[arg(long, value_parser = parse_date_arg)]
        check_out: NaiveDate,
    },
    /// List bookings occupying a day
    Day {
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,
        /// Only show this room
        #[arg(long)]
        room: Option<String>,
    },
    /// Render a month calendar
    Month {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Only show this room
        #[arg(long)]
        room: Option<String>,
    },
    /// List free runs of nights for a room
    Free {
        #[arg(long)]
        room: String,
        #[arg(long, value_parser = parse_date_arg)]
        from: NaiveDate,
        #[arg(long, value_parser = parse_date_arg)]
        to: NaiveDate,
        /// Only show the first run of at least this many nights
        #[arg(long)]
        min_nights: Option<i64>,
    },
    /// Create a booking if the gate accepts it
    Book {
        #[arg(long)]
        room: String,
        #[arg(long, default_value = "")]
        room_name: String,
        #[arg(long, value_parser = parse_date_arg)]
        check_in: NaiveDate,
        #[arg(long, value_parser = parse_date_arg)]
        check_out: NaiveDate,
        #[arg(long, default_value = "")]
        guest: String,
        #[arg(long, default_value = "")]
        contact: String,
        /// Save the updated booking list back to the file
        #[arg(long)]
        write: bool,
    },
    /// Move a booking to a new check-in day, keeping its length
    Reschedule {
        #[arg(long)]
        id: String,
        #[arg(long, value_parser = parse_date_arg)]
        check_in: NaiveDate,
        /// Save the updated booking list back to the file
        #[arg(long)]
        write: bool,
    },
    /// Cancel a booking
    Cancel {
        #[arg(long)]
        id: String,
        /// Save the updated booking list back to the file
        #[arg(long)]
        write: bool,
    },
    /// Price a stay at a nightly rate
    Quote {
        #[arg(long)]
        room_price: u64,
        #[arg(long, value_parser = parse_date_arg)]
        check_in: NaiveDate,
        #[arg(long, value_parser = parse_date_arg)]
        check_out: NaiveDate,
    },
}

fn parse_date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_day(s).map_err(|e| e.to_string())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let path = cli.bookings.as_deref();

    match cli.command {
        Commands::Check {
            room,
            check_in,
            check_out,
        } => {
            let bookings = load_bookings(path)?;
            let decision =
                booking_engine::validate_booking_request(&bookings, &room, check_in, check_out, today);
            report_decision(&decision, cli.json)?;
            exit_on_rejection(&decision);
        }
        Commands::Day { date, room } => {
            let bookings = load_bookings(path)?;
            let on_day = booking_engine::bookings_for_date(&bookings, date, room.as_deref());
            if cli.json {
                print_json(&on_day)?;
            } else if on_day.is_empty() {
                println!("No bookings on {}", date);
            } else {
                for b in on_day {
                    println!("{}", describe(b));
                }
            }
        }
        Commands::Month { year, month, room } => {
            let bookings = load_bookings(path)?;
            let view = booking_engine::month_view(&bookings, year, month, room.as_deref())?;
            if cli.json {
                print_json(&view)?;
            } else {
                print!("{}", render_month(&view));
            }
        }
        Commands::Free {
            room,
            from,
            to,
            min_nights,
        } => {
            let bookings = load_bookings(path)?;
            let window = DateRange::new(from, to).context("Invalid --from/--to window")?;
            let ranges = match min_nights {
                Some(n) => find_first_free_range(&bookings, &room, window, n)
                    .into_iter()
                    .collect(),
                None => booking_engine::find_free_ranges(&bookings, &room, window),
            };
            if cli.json {
                print_json(&ranges)?;
            } else if ranges.is_empty() {
                println!("No free nights for room {} in {} .. {}", room, from, to);
            } else {
                for r in ranges {
                    println!("{} .. {}  ({} nights)", r.start, r.end, r.nights);
                }
            }
        }
        Commands::Book {
            room,
            room_name,
            check_in,
            check_out,
            guest,
            contact,
            write,
        } => {
            let mut bookings = load_bookings(path)?;
            let request = BookingRequest {
                room_id: room,
                room_name,
                check_in,
                check_out,
                guest_name: guest,
                contact,
            };
            let id = Booking::generate_id();
            let decision = booking_engine::create_booking(&mut bookings, request, id.clone(), today);
            if decision.is_accepted() {
                let number = booking_number(today, uuid::Uuid::new_v4().as_fields().0);
                if cli.json {
                    print_json(&serde_json::json!({
                        "decision": decision,
                        "bookingId": id,
                        "bookingNumber": number,
                    }))?;
                } else {
                    println!("Booked {} (confirmation {})", id, number);
                }
                if write {
                    save_bookings(path, &bookings)?;
                }
            } else {
                report_decision(&decision, cli.json)?;
            }
            exit_on_rejection(&decision);
        }
        Commands::Reschedule {
            id,
            check_in,
            write,
        } => {
            let mut bookings = load_bookings(path)?;
            let decision = booking_engine::reschedule_booking(&mut bookings, &id, check_in)?;
            report_decision(&decision, cli.json)?;
            if decision.is_accepted() && write {
                save_bookings(path, &bookings)?;
            }
            exit_on_rejection(&decision);
        }
        Commands::Cancel { id, write } => {
            let mut bookings = load_bookings(path)?;
            let removed = booking_engine::cancel_booking(&mut bookings, &id)?;
            if cli.json {
                print_json(&removed)?;
            } else {
                println!("Cancelled {}", describe(&removed));
            }
            if write {
                save_bookings(path, &bookings)?;
            }
        }
        Commands::Quote {
            room_price,
            check_in,
            check_out,
        } => {
            let room = Room {
                id: String::new(),
                name: String::new(),
                capacity: 0,
                price: room_price,
                amenities: Vec::new(),
            };
            let quote = quote_stay(&room, check_in, check_out)?;
            if cli.json {
                print_json(&quote)?;
            } else {
                println!("Nights:     {}", quote.nights);
                println!("Per night:  {}", quote.nightly_price);
                println!("Total:      {}", quote.total_price);
            }
        }
    }

    Ok(())
}

fn load_bookings(path: Option<&str>) -> Result<Vec<Booking>> {
    let path = path.context("No booking file given (use --bookings or BOOKINGS_FILE)")?;
    let json =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;
    let bookings = parse_bookings_json(&json)
        .with_context(|| format!("Failed to parse bookings in {}", path))?;
    debug!(path, count = bookings.len(), "loaded bookings");
    Ok(bookings)
}

fn save_bookings(path: Option<&str>, bookings: &[Booking]) -> Result<()> {
    let path = path.context("No booking file given (use --bookings or BOOKINGS_FILE)")?;
    let json = serde_json::to_string_pretty(bookings)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write file: {}", path))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_on_rejection(decision: &Decision) {
    if !decision.is_accepted() {
        process::exit(1);
    }
}

fn describe(b: &Booking) -> String {
    let guest = if b.guest_name.is_empty() {
        "-"
    } else {
        b.guest_name.as_str()
    };
    format!(
        "{}  room {}  {} .. {}  ({} nights)  {}",
        b.id,
        b.room_id,
        b.check_in,
        b.check_out,
        b.nights(),
        guest
    )
}

fn report_decision(decision: &Decision, json: bool) -> Result<()> {
    if json {
        return print_json(decision);
    }
    match decision {
        Decision::Accepted => println!("Accepted"),
        Decision::Rejected(rejection) => {
            let reason = match rejection.kind {
                RejectionKind::InvalidRange => "check-out must be after check-in",
                RejectionKind::PastDate => "check-in is in the past",
                RejectionKind::Conflict => "already booked on these dates",
            };
            println!("Rejected ({:?}): {}", rejection.kind, reason);
            for c in &rejection.conflicts {
                println!(
                    "  conflicts with {}  {} .. {}  ({} nights overlap)",
                    c.booking_id, c.check_in, c.check_out, c.overlap_nights
                );
            }
        }
    }
    Ok(())
}

/// Text grid, Sunday first. Occupied days are marked with `*`.
fn render_month(view: &MonthView) -> String {
    let mut out = format!("{:04}-{:02}\n Su  Mo  Tu  We  Th  Fr  Sa\n", view.year, view.month);
    let mut column = view.leading_blanks;
    out.push_str(&"    ".repeat(column as usize));
    for day in &view.days {
        let mark = if day.is_occupied() { '*' } else { ' ' };
        out.push_str(&format!("{:>3}{}", day.date.day(), mark));
        column += 1;
        if column == 7 {
            out.push('\n');
            column = 0;
        }
    }
    if column != 0 {
        out.push('\n');
    }
    out
}

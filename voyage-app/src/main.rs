use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use voyage_app::{DateTarget, SearchSession};
use voyage_calendar::grid::WEEKDAY_LABELS;
use voyage_calendar::{CalendarState, DayCell};
use voyage_client::app_config::Config;
use voyage_client::HttpFlightsApi;
use voyage_core::dates::{
    format_duration_compact, format_flight_date, format_minutes_as_clock,
    format_minutes_as_duration, parse_clock_to_minutes, parse_iso_date,
};
use voyage_core::{airport_code, SortKey, StopCategory};
use voyage_results::FilterSpec;

#[derive(Parser)]
#[command(name = "voyage", version, about = "Search and book flights")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search flights and list those matching the filters
    Search(SearchArgs),
    /// Book seats on a flight
    Reserve(ReserveArgs),
    /// Print a month view
    Calendar {
        /// `YYYY-MM`, defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Price,
    Duration,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Price => SortKey::Price,
            SortArg::Duration => SortKey::Duration,
        }
    }
}

#[derive(Args)]
struct SearchArgs {
    #[arg(long)]
    from: String,
    #[arg(long)]
    to: String,
    /// Departure date, YYYY-MM-DD
    #[arg(long)]
    depart: NaiveDate,
    /// Return date, YYYY-MM-DD
    #[arg(long = "return")]
    return_date: NaiveDate,
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
    /// Allowed stop categories: direct, 1, 2+
    #[arg(long, value_delimiter = ',')]
    stops: Vec<StopCategory>,
    /// Earliest departure time, HH:MM
    #[arg(long)]
    depart_after: Option<String>,
    /// Latest departure time, HH:MM
    #[arg(long)]
    depart_before: Option<String>,
    /// Minimum journey duration in minutes
    #[arg(long)]
    min_duration: Option<u32>,
    /// Maximum journey duration in minutes
    #[arg(long)]
    max_duration: Option<u32>,
}

#[derive(Args)]
struct ReserveArgs {
    #[arg(long)]
    flight: Uuid,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value_t = 1)]
    seats: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voyage=info,voyage_app=info,voyage_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load config")?;
    tracing::debug!("Using flights API at {}", config.api.base_url);

    match cli.command {
        Command::Search(args) => run_search(args, &config).await,
        Command::Reserve(args) => run_reserve(args, &config).await,
        Command::Calendar { month } => print_calendar(month),
    }
}

async fn run_search(args: SearchArgs, config: &Config) -> anyhow::Result<()> {
    let api = HttpFlightsApi::new(&config.api)?;
    let mut session = SearchSession::new(FilterSpec::with_duration_bounds(
        config.filters.duration_min,
        config.filters.duration_max,
    ));

    session.set_origin(args.from);
    session.set_destination(args.to);
    session.set_sort(args.sort.map(Into::into));

    // Same path as clicking through the calendar dialog
    let today = Local::now().date_naive();
    for (target, date) in [(DateTarget::Departure, args.depart), (DateTarget::Return, args.return_date)] {
        session.open_calendar(target, today);
        session.select_day(DayCell::Day(date))?;
    }

    let filters = session.filters_mut();
    if !args.stops.is_empty() {
        for category in StopCategory::ALL {
            filters.set_stop_category(category, args.stops.contains(&category));
        }
    }
    if let Some(after) = args.depart_after.as_deref() {
        filters.set_departure_min(parse_clock_to_minutes(after));
    }
    if let Some(before) = args.depart_before.as_deref() {
        filters.set_departure_max(parse_clock_to_minutes(before));
    }
    if let Some(min) = args.min_duration {
        filters.set_duration_min(min);
    }
    if let Some(max) = args.max_duration {
        filters.set_duration_max(max);
    }

    if let Err(err) = session.submit_search(&api).await {
        let message = session.error_message().map(str::to_string).unwrap_or_else(|| err.to_string());
        anyhow::bail!("{}", message);
    }

    let shown = session.displayed_flights();
    let window = &session.filters().departure_window;
    println!(
        "{}: {} of {} flights, departing {}-{}",
        session.search_summary(),
        shown.len(),
        session.results().len(),
        format_minutes_as_clock(window.min),
        format_minutes_as_clock(window.max),
    );
    for flight in &shown {
        println!(
            "{}  {:<10} {} {} -> {} {}  {:>7}  {:>9.2}  {:<6} {}",
            flight.id,
            format_flight_date(&flight.departs_at).unwrap_or_default(),
            airport_code(&flight.origin),
            flight.departure_clock.as_deref().unwrap_or("--:--"),
            airport_code(&flight.destination),
            flight.arrival_clock.as_deref().unwrap_or("--:--"),
            format_duration_compact(flight.duration_minutes),
            flight.price,
            flight.stop_category(),
            flight.carrier.as_deref().unwrap_or(""),
        );
    }

    let summary = session.result_summary();
    if summary.count > 0 {
        println!(
            "cheapest {:.2} | most expensive {:.2} | fastest {} for {:.2}",
            summary.lowest_price,
            summary.highest_price,
            format_minutes_as_duration(summary.shortest_duration),
            summary.fastest_price,
        );
    }
    Ok(())
}

async fn run_reserve(args: ReserveArgs, config: &Config) -> anyhow::Result<()> {
    let api = HttpFlightsApi::new(&config.api)?;
    let mut session = SearchSession::default();

    let draft = session.open_reservation(args.flight).draft_mut();
    draft.passenger.last_name = args.last_name;
    draft.passenger.first_name = args.first_name;
    draft.passenger.email = args.email;
    draft.seats = args.seats;

    if let Err(err) = session.submit_reservation(&api).await {
        let message = session
            .reservation()
            .and_then(|dialog| dialog.error())
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        anyhow::bail!("{}", message);
    }

    if let Some(confirmation) = session.reservation().and_then(|dialog| dialog.confirmation()) {
        println!(
            "Reservation {}: {} seat(s) for {} on flight {}",
            confirmation.reservation_number,
            confirmation.seats,
            confirmation.passenger.display_name(),
            confirmation.flight_id,
        );
    }
    Ok(())
}

fn print_calendar(month: Option<String>) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let anchor = match month {
        Some(month) => parse_iso_date(&format!("{}-01", month))
            .with_context(|| format!("Invalid month {:?}, expected YYYY-MM", month))?,
        None => today,
    };
    let calendar = CalendarState::open(Some(anchor), today);

    println!("{:^27}", calendar.month_label());
    println!("{}", WEEKDAY_LABELS.map(|label| format!("{:>3}", label)).join(" "));
    for week in calendar.cells().chunks(7) {
        let line: Vec<String> = week
            .iter()
            .map(|cell| match cell.date() {
                Some(day) if calendar.is_today(*cell) => format!("{:>2}*", day.day()),
                Some(day) => format!("{:>3}", day.day()),
                None => "   ".to_string(),
            })
            .collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

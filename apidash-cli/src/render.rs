//! Human-friendly panel formatting for the dashboard.
//!
//! Mirrors the three cards of the web front-end: API status, weather
//! forecast, and deployment info. Pure string builders so the layout
//! is testable without a terminal.

use chrono::{Datelike, Utc};

use apidash_core::{Endpoint, Snapshot, WeatherDay};

const RULE: &str = "----------------------------------------";

/// One weather entry: `2024-01-01 / 20°C / 68°F / Mild`.
pub fn weather_line(day: &WeatherDay) -> String {
    format!(
        "{} / {}°C / {}°F / {}",
        day.date, day.temperature_c, day.temperature_f, day.summary
    )
}

/// The full dashboard for a successful cycle.
pub fn dashboard(snapshot: &Snapshot, base_url: &str) -> String {
    let mut out = String::new();

    push_header(&mut out, "API Status");
    out.push_str("  ● Online\n");
    out.push_str(&format!("  Name:        {}\n", snapshot.info.name));
    out.push_str(&format!("  Version:     {}\n", snapshot.info.version));
    out.push_str(&format!("  Environment: {}\n", snapshot.info.environment));
    out.push_str(&format!(
        "  Checked at:  {}\n",
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    push_header(&mut out, "Weather Forecast");
    for day in &snapshot.days {
        out.push_str(&format!("  {}\n", weather_line(day)));
    }

    push_header(&mut out, "Deployment Info");
    out.push_str(&format!("  Base address: {base_url}\n"));
    out.push_str("  Available endpoints:\n");
    for endpoint in Endpoint::all() {
        out.push_str(&format!("    GET {:<24} - {}\n", endpoint.path(), endpoint.describe()));
    }

    out.push_str(&format!("\n{}\n", footer(Utc::now().year())));
    out
}

/// The error panel; shown instead of the dashboard when a cycle fails.
pub fn error_panel(message: &str) -> String {
    let mut out = String::new();
    push_header(&mut out, "API Status");
    out.push_str(&format!("  ✗ {message}\n"));
    out
}

fn push_header(out: &mut String, title: &str) {
    out.push_str(&format!("{RULE}\n{title}\n{RULE}\n"));
}

fn footer(year: i32) -> String {
    format!("apidash • {year}")
}

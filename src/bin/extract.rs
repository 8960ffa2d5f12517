use merutto::config::{Config, DEFAULT_TIMEZONE};
use merutto::error::AppResult;
use merutto::extract::{extract_destination, extract_event_fields, EventFields};
use merutto::links::build_calendar_url;
use merutto::utils::text::combine_texts;
use serde_json::json;
use std::io::Read;

fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();

    // Read the email from stdin
    let mut email = String::new();
    std::io::stdin().read_to_string(&mut email)?;

    // Optional summary file as the first argument
    let summary = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => String::new(),
    };

    let config = Config {
        timezone: std::env::var("TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string()),
        ..Default::default()
    };
    let tz = config.tz()?;

    let destination = extract_destination(&combine_texts(&[email.as_str(), summary.as_str()]));
    let fields = extract_event_fields(&email, &summary, EventFields::default());

    // An unusable date is reported in the output instead of aborting
    let calendar_url = match build_calendar_url(&fields, tz) {
        Ok(url) => json!(url),
        Err(e) => json!({ "error": e.to_string() }),
    };

    let output = json!({
        "destination": destination,
        "fields": fields,
        "calendar_url": calendar_url,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

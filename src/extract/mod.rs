//! Heuristic extraction of destinations and calendar fields from Japanese
//! email text. Everything here is pure and synchronous.

pub mod destination;
pub mod event;

pub use destination::{extract_destination, refine_address};
pub use event::{extract_event_fields, EventFields};

use tracing::debug;

/// One heuristic pass over normalized text
pub type Stage = fn(&str) -> Option<String>;

/// Run named stages in order and return the first result
pub fn first_match(text: &str, stages: &[(&str, Stage)]) -> Option<String> {
    stages.iter().find_map(|(name, stage)| {
        let found = stage(text);
        if let Some(value) = &found {
            debug!(stage = %name, value = %value, "Extraction stage matched");
        }
        found
    })
}

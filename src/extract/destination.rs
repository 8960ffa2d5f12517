use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use url::Url;

use super::{first_match, Stage};
use crate::utils::text::{normalize_newlines, strip_trailing_punctuation};

/// Labels that introduce an address line in Japanese business mail
pub const ADDRESS_LABELS: &[&str] = &[
    "住所",
    "所在地",
    "会場",
    "場所",
    "集合場所",
    "開催地",
    "本社",
    "支社",
    "オフィス",
    "勤務地",
];

/// Characters after which an address stops being an address
const ADDRESS_TERMINATORS: &[char] = &['※', '(', '（', '。', '.', '，', ','];

lazy_static! {
    // URL-ish tokens, cut at whitespace or closing brackets
    static ref URL_REGEX: Regex =
        Regex::new(r#"https?://[^\s<>"'）)\]」』】]+"#).unwrap();

    static ref PLACE_SEGMENT_REGEX: Regex = Regex::new(r"/maps/place/([^/]+)").unwrap();

    static ref LABELED_REGEX: Regex = Regex::new(&format!(
        r"(?m)^[ \x{{3000}}]*(?:{})[ \x{{3000}}]*[:：]?[ \x{{3000}}]*(.+)$",
        ADDRESS_LABELS.join("|")
    ))
    .unwrap();

    static ref LABEL_PREFIX_REGEX: Regex = Regex::new(&format!(
        r"^(?:{})\s*[:：]?\s*",
        ADDRESS_LABELS.join("|")
    ))
    .unwrap();

    // 〒100-0005 東京都千代田区...; digit runs inside phone numbers do not count
    static ref POSTAL_REGEX: Regex = Regex::new(
        r"(?:^|[^0-9\-ー―])(〒?[ \x{3000}]*[0-9]{3}[-ー―][0-9]{4})[ \x{3000}]*([^0-9\n][^\n]*)"
    )
    .unwrap();

    static ref COORDINATE_REGEX: Regex = Regex::new(
        r"(?:^|[^0-9.])([-+]?[0-9]{1,3}\.[0-9]{2,7})[ \x{3000}]*,[ \x{3000}]*([-+]?[0-9]{1,3}\.[0-9]{2,7})(?:[^0-9.]|$)"
    )
    .unwrap();

    // An ideograph run ending in a prefecture suffix (東京都, 北海道, 大阪府, 神奈川県)
    static ref PREFECTURE_REGEX: Regex =
        Regex::new(r"[\x{4E00}-\x{9FFF}]+[都道府県]").unwrap();
}

/// Ordered destination stages; the first one to produce a value wins
const STAGES: [(&str, Stage); 5] = [
    ("map_link", from_map_link),
    ("labeled_address", from_labeled_address),
    ("postal_code", from_postal_code),
    ("coordinates", from_coordinates),
    ("prefecture_line", from_prefecture_lines),
];

/// Recover a single map-routable destination from free text.
///
/// Returns `None` when no stage finds a candidate. Never panics, whatever the
/// input.
pub fn extract_destination(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }
    let normalized = normalize_newlines(text);
    first_match(&normalized, &STAGES)
}

/// Trim an address candidate down to the span starting at the prefecture and
/// ending before the first annotation.
pub fn refine_address(raw: &str) -> String {
    let raw = raw.trim();
    let Some(found) = PREFECTURE_REGEX.find(raw) else {
        return strip_trailing_punctuation(raw).to_string();
    };

    let tail = &raw[found.start()..];
    let core = match tail.find(ADDRESS_TERMINATORS) {
        Some(idx) => &tail[..idx],
        None => tail,
    };
    strip_trailing_punctuation(core).to_string()
}

fn from_map_link(text: &str) -> Option<String> {
    URL_REGEX
        .find_iter(text)
        .find_map(|m| destination_from_maps_url(m.as_str()))
}

/// Pull the place name or query out of a Google Maps URL
fn destination_from_maps_url(candidate: &str) -> Option<String> {
    let url = match Url::parse(candidate) {
        Ok(url) => url,
        Err(e) => {
            debug!("Skipping malformed URL {}: {}", candidate, e);
            return None;
        }
    };

    let host = url.host_str()?;
    if !host.contains("google") || !url.path().contains("maps") {
        return None;
    }

    if let Some(caps) = PLACE_SEGMENT_REGEX.captures(url.path()) {
        match urlencoding::decode(&caps[1]) {
            Ok(decoded) => {
                let place = decoded.replace('+', " ");
                let place = place.trim();
                if !place.is_empty() {
                    return Some(place.to_string());
                }
            }
            Err(e) => debug!("Undecodable place segment in {}: {}", candidate, e),
        }
    }

    ["q", "destination"].iter().find_map(|key| {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

fn from_labeled_address(text: &str) -> Option<String> {
    let caps = LABELED_REGEX.captures(text)?;
    non_empty(refine_address(&caps[1]))
}

fn from_postal_code(text: &str) -> Option<String> {
    let caps = POSTAL_REGEX.captures(text)?;
    let joined = format!("{} {}", caps[1].trim(), caps[2].trim());
    non_empty(strip_trailing_punctuation(&joined).to_string())
}

fn from_coordinates(text: &str) -> Option<String> {
    let caps = COORDINATE_REGEX.captures(text)?;
    Some(format!("{},{}", &caps[1], &caps[2]))
}

fn from_prefecture_lines(text: &str) -> Option<String> {
    let candidates = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && PREFECTURE_REGEX.is_match(line))
        .map(|line| refine_address(&LABEL_PREFIX_REGEX.replace(line, "")))
        .filter(|candidate| !candidate.is_empty());

    // Strictly longer replaces, so the earliest wins a tie
    candidates.fold(None, |best: Option<String>, candidate| match best {
        Some(b) if b.chars().count() >= candidate.chars().count() => Some(b),
        _ => Some(candidate),
    })
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

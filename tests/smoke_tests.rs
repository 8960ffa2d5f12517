use merutto::config::Config;
use merutto::extract::{extract_destination, extract_event_fields, EventFields};
use merutto::links::{build_calendar_url, build_route_url};
use merutto::utils::time::to_gcal_datetime;

/// Smoke test to verify that the default config is usable
#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.gemini_api_key.is_empty());
    assert!(config.tz().is_ok());
}

/// Text without any destination pattern yields nothing
#[test]
fn test_plain_text_has_no_destination() {
    let samples = [
        "",
        "ご確認のほどよろしくお願いいたします。",
        "Thanks for your email, see you next week.",
        "電話番号は追ってお知らせします",
        "https://example.com/page?q=%E6%9D%B1%E4%BA%AC",
    ];
    for sample in samples {
        assert_eq!(extract_destination(sample), None, "input: {:?}", sample);
    }
}

/// A maps place link anywhere in the text is decoded
#[test]
fn test_place_link_in_body() {
    let text = "田中様\n\n地図: https://www.google.com/maps/place/%E6%9D%B1%E4%BA%AC%E9%A7%85/\nよろしくお願いします";
    assert_eq!(extract_destination(text).as_deref(), Some("東京駅"));
}

/// Labeled addresses and their truncation
#[test]
fn test_labeled_addresses() {
    assert_eq!(
        extract_destination("住所：東京都千代田区丸の内1-1").as_deref(),
        Some("東京都千代田区丸の内1-1")
    );
    assert_eq!(
        extract_destination("会場: 東京都新宿区西新宿2-8-1（3階）").as_deref(),
        Some("東京都新宿区西新宿2-8-1")
    );
}

/// Coordinates come back verbatim
#[test]
fn test_coordinates_verbatim() {
    let text = "位置情報 35.681236,139.767125 をご利用ください";
    assert_eq!(
        extract_destination(text).as_deref(),
        Some("35.681236,139.767125")
    );
}

/// Start and default end from a dated line
#[test]
fn test_event_times_from_text() {
    let fields = extract_event_fields("打ち合わせ 2024/03/15 14:30 から", "", EventFields::default());
    assert_eq!(fields.start.as_deref(), Some("2024-03-15T14:30"));
    assert_eq!(fields.end.as_deref(), Some("2024-03-15T15:30"));
}

/// Calendar timestamps have the compact UTC shape, or are empty
#[test]
fn test_gcal_timestamp_shape() {
    for tz in [chrono_tz::UTC, chrono_tz::Asia::Tokyo, chrono_tz::Europe::Helsinki] {
        let value = to_gcal_datetime("2024-03-15T14:30", tz);
        assert_eq!(value.len(), 16);
        assert!(value.ends_with('Z'));
        assert_eq!(&value[8..9], "T");
        assert!(value[..8].chars().all(|c| c.is_ascii_digit()));
        assert!(value[9..15].chars().all(|c| c.is_ascii_digit()));
    }
    assert_eq!(to_gcal_datetime("not-a-date", chrono_tz::UTC), "");
}

/// Extracted values flow into both links
#[test]
fn test_extracted_values_build_links() {
    let email = "件名: 現地調査\n日時: 2024-06-01 10:00\n住所: 大阪府大阪市北区梅田3-1-1";
    let fields = extract_event_fields(email, "", EventFields::default());

    let location = fields.location.clone().unwrap();
    let route = build_route_url(&location, None).unwrap();
    assert!(route.starts_with("https://www.google.com/maps/dir/?api=1&destination="));

    let calendar = build_calendar_url(&fields, chrono_tz::Asia::Tokyo).unwrap();
    assert!(calendar.contains("&dates=20240601T010000Z%2F20240601T020000Z"));
    assert!(calendar.contains("&location="));
}

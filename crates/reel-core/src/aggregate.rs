use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use reel_models::{AggregatedReviewSet, RawPrimaryReview, RawSecondaryRating, Review, ReviewSource};
use tracing::debug;

const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Merge primary reviews and secondary ratings into one list.
///
/// Output order is all primary reviews in source order followed by all secondary
/// ratings in source order. Nothing is de-duplicated, sorted or capped. Records
/// that cannot be converted are dropped; the rest of the batch is unaffected.
///
/// Secondary ratings carry no timestamp of their own and are stamped with `now`.
pub fn aggregate_reviews(
    primary: &[RawPrimaryReview],
    secondary: &[RawSecondaryRating],
    now: DateTime<Utc>,
) -> AggregatedReviewSet {
    let mut set = AggregatedReviewSet::new();

    for raw in primary {
        match primary_review(raw) {
            Some(review) => set.push(review),
            None => debug!(id = %raw.id, created_at = %raw.created_at, "Dropping primary review with unparseable timestamp"),
        }
    }

    for (index, raw) in secondary.iter().enumerate() {
        match secondary_review(index, raw, now) {
            Some(review) => set.push(review),
            None => debug!(index, source = %raw.source, value = %raw.value, "Dropping secondary rating without numeric value"),
        }
    }

    set
}

/// [`aggregate_reviews`] stamped with the current time
pub fn aggregate_reviews_now(primary: &[RawPrimaryReview], secondary: &[RawSecondaryRating]) -> AggregatedReviewSet {
    aggregate_reviews(primary, secondary, Utc::now())
}

fn primary_review(raw: &RawPrimaryReview) -> Option<Review> {
    let created_at = parse_timestamp(&raw.created_at)?;

    Some(Review {
        id: format!("{}-{}", ReviewSource::Primary.tag(), raw.id),
        author: raw
            .author
            .as_deref()
            .map(str::trim)
            .filter(|author| !author.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR)
            .to_string(),
        content: raw.content.clone(),
        rating: raw.rating,
        source: ReviewSource::Primary,
        created_at,
    })
}

/// ISO-8601 timestamp with an offset, without one, or date only.
/// Values without an offset are taken as UTC; a bare date is midnight UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn secondary_review(index: usize, raw: &RawSecondaryRating, now: DateTime<Utc>) -> Option<Review> {
    let rating = normalize_secondary_rating(&raw.value)?;

    Some(Review {
        id: format!("{}-{}", ReviewSource::Secondary.tag(), index),
        author: if raw.source.trim().is_empty() {
            ANONYMOUS_AUTHOR.to_string()
        } else {
            raw.source.clone()
        },
        content: format!("Rating: {}", raw.value),
        rating: Some(rating),
        source: ReviewSource::Secondary,
        created_at: now,
    })
}

/// Numeric prefix of the part before `/`, multiplied by 10.
///
/// The denominator is ignored: "7/10" and "7/5" both give 70.
pub fn normalize_secondary_rating(value: &str) -> Option<f64> {
    let numerator = value.split('/').next().unwrap_or_default();
    parse_float_prefix(numerator).map(|n| n * 10.0)
}

/// Longest leading decimal number in `text`, ignoring leading whitespace
/// ("85%" -> 85, " 7.5 stars" -> 7.5, "N/A" -> None).
fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

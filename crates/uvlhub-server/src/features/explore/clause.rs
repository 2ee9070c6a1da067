//! Explore query language
//!
//! A query is a `;` separated list of clauses. Each clause is classified by
//! its prefix, tested in this order:
//!
//! | prefix        | clause                    |
//! |---------------|---------------------------|
//! | `tags:`       | [`FilterClause::Tag`]       |
//! | `models_max:` | [`FilterClause::ModelsMax`] |
//! | `models_min:` | [`FilterClause::ModelsMin`] |
//! | `min_size:`   | [`FilterClause::MinSize`]   |
//! | `max_size:`   | [`FilterClause::MaxSize`]   |
//! | `author:`     | [`FilterClause::Author`]    |
//! | `title:`      | [`FilterClause::Title`]     |
//!
//! Anything else is free text. Parsing never fails: a numeric clause whose
//! payload is not a valid integer is dropped.

/// One classified clause of an explore query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    Tag(String),
    Author(String),
    Title(String),
    /// Inclusive lower bound on aggregate file size, in bytes.
    MinSize(i64),
    /// Inclusive upper bound on aggregate file size, in bytes.
    MaxSize(i64),
    /// Inclusive lower bound on aggregate file count.
    ModelsMin(i64),
    /// Inclusive upper bound on aggregate file count.
    ModelsMax(i64),
    /// Matches title or tags.
    FreeText(String),
}

/// Split a raw query into classified clauses, preserving their order.
pub fn parse_clauses(raw: &str) -> Vec<FilterClause> {
    raw.trim()
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(classify)
        .collect()
}

fn classify(segment: &str) -> Option<FilterClause> {
    if let Some(rest) = segment.strip_prefix("tags:") {
        return Some(FilterClause::Tag(rest.trim().to_string()));
    }
    if let Some(rest) = segment.strip_prefix("models_max:") {
        return numeric(segment, parse_count(rest), FilterClause::ModelsMax);
    }
    if let Some(rest) = segment.strip_prefix("models_min:") {
        return numeric(segment, parse_count(rest), FilterClause::ModelsMin);
    }
    if let Some(rest) = segment.strip_prefix("min_size:") {
        return numeric(segment, parse_size(rest), FilterClause::MinSize);
    }
    if let Some(rest) = segment.strip_prefix("max_size:") {
        return numeric(segment, parse_size(rest), FilterClause::MaxSize);
    }
    if let Some(rest) = segment.strip_prefix("author:") {
        return Some(FilterClause::Author(rest.trim().to_string()));
    }
    if let Some(rest) = segment.strip_prefix("title:") {
        return Some(FilterClause::Title(rest.trim().to_string()));
    }
    Some(FilterClause::FreeText(segment.to_string()))
}

fn numeric(
    segment: &str,
    value: Option<i64>,
    clause: fn(i64) -> FilterClause,
) -> Option<FilterClause> {
    if value.is_none() {
        tracing::debug!(clause = segment, "Dropping numeric clause with malformed payload");
    }
    value.map(clause)
}

/// Sizes accept any signed integer, with `_` allowed between digits
/// (`1_000`).
fn parse_size(payload: &str) -> Option<i64> {
    let payload = payload.trim();
    let (negative, digits) = match payload.as_bytes().first() {
        Some(b'-') => (true, &payload[1..]),
        Some(b'+') => (false, &payload[1..]),
        _ => (false, payload),
    };

    let mut groups = digits.split('_');
    if !groups.all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    Some(saturating_decimal(&digits.replace('_', ""), negative))
}

/// Counts accept plain decimal digits only, so `-1`, `+1` and `1_0` are
/// rejected.
fn parse_count(payload: &str) -> Option<i64> {
    let payload = payload.trim();
    if payload.is_empty() || !payload.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(saturating_decimal(payload, false))
}

/// Parse validated ASCII digits, clamping out-of-range values to the `i64`
/// bounds.
fn saturating_decimal(digits: &str, negative: bool) -> i64 {
    let magnitude = digits.trim_start_matches('0');
    if magnitude.is_empty() {
        return 0;
    }

    let signed = if negative {
        format!("-{magnitude}")
    } else {
        magnitude.to_string()
    };
    signed.parse().unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

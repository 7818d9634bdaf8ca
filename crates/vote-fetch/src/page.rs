use crate::FetchError;
use common::{RawVote, UnixSeconds};
use serde_json::Value;

/// One decoded page of the votes endpoint.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VotePage {
    pub votes: Vec<RawVote>,
    /// Records dropped for lacking a usable `protocol` or `timestamp`.
    pub skipped: usize,
    pub next_cursor: Option<String>,
}

pub fn decode_vote_page(body: &[u8]) -> Result<VotePage, FetchError> {
    let value: Value = serde_json::from_slice(body)?;
    let records = value
        .get("data")
        .and_then(Value::as_array)
        .ok_or(FetchError::MissingData)?;

    let mut page = VotePage {
        votes: Vec::with_capacity(records.len()),
        ..VotePage::default()
    };
    for (index, record) in records.iter().enumerate() {
        match parse_vote_record(record) {
            Some(vote) => page.votes.push(vote),
            None => {
                page.skipped += 1;
                tracing::warn!(index, record = %record, "skipping malformed vote record");
            }
        }
    }

    page.next_cursor = value
        .get("nextCursor")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|cursor| !cursor.is_empty())
        .map(ToOwned::to_owned);

    Ok(page)
}

fn parse_vote_record(record: &Value) -> Option<RawVote> {
    let protocol = record.get("protocol").and_then(Value::as_str)?.trim();
    if protocol.is_empty() {
        return None;
    }
    let timestamp = parse_timestamp(record.get("timestamp")?)?;
    Some(RawVote::new(protocol, timestamp))
}

fn parse_timestamp(value: &Value) -> Option<UnixSeconds> {
    if let Some(seconds) = value.as_i64() {
        return Some(seconds);
    }
    let seconds = value.as_f64()?;
    if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(seconds.trunc() as UnixSeconds)
}

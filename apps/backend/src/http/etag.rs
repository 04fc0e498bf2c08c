//! ETag helpers for cacheable read endpoints.

use xxhash_rust::xxh3::xxh3_64;

use crate::domain::standings::TableRow;

/// Generate an ETag for a division's standings table.
///
/// Format: `"standings-{division}-{hash}"` where the hash covers every
/// counter of every row, so any change to the table changes the tag.
pub fn standings_etag(division_id: i64, rows: &[TableRow]) -> String {
    let mut buf = Vec::with_capacity(rows.len() * 48);
    for row in rows {
        buf.extend_from_slice(&row.team_id.to_le_bytes());
        for counter in [
            row.played,
            row.won,
            row.lost,
            row.drawn,
            row.points,
            row.pins_for,
            row.pins_against,
            row.max_score,
        ] {
            buf.extend_from_slice(&counter.to_le_bytes());
        }
    }
    let hash = xxh3_64(&buf);
    format!(r#""standings-{division_id}-{hash:016x}""#)
}

/// True when the client's `If-None-Match` value matches the current tag.
pub fn if_none_match_hits(client: &str, current: &str) -> bool {
    client.trim() == "*"
        || client
            .split(',')
            .map(str::trim)
            .any(|etag| etag == current)
}

#[cfg(test)]
mod tests {
    use super::{if_none_match_hits, standings_etag};
    use crate::domain::standings::TableRow;

    #[test]
    fn etag_changes_with_counters() {
        let mut rows = vec![TableRow::zeroed(1, "Anchor")];
        let before = standings_etag(7, &rows);
        rows[0].points = 2;
        let after = standings_etag(7, &rows);
        assert_ne!(before, after);
    }

    #[test]
    fn etag_is_stable_for_equal_tables() {
        let rows = vec![TableRow::zeroed(1, "Anchor"), TableRow::zeroed(2, "Bell")];
        assert_eq!(standings_etag(7, &rows), standings_etag(7, &rows));
    }

    #[test]
    fn if_none_match_understands_wildcard_and_lists() {
        let tag = r#""standings-7-00000000deadbeef""#;
        assert!(if_none_match_hits("*", tag));
        assert!(if_none_match_hits(tag, tag));
        assert!(if_none_match_hits(&format!(r#""other", {tag}"#), tag));
        assert!(!if_none_match_hits(r#""other""#, tag));
    }
}

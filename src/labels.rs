//! Label alphabet sizing, generation and assignment.

use crate::search::Position;

/// Shortest label length able to name `match_count` matches.
///
/// Never longer than the search key, so a label always fits over the text it
/// replaces, and never longer than the alphabet itself. When even the capped
/// length is not enough the surplus matches simply get no label.
pub fn pick_label_length(alphabet_size: usize, key_length: usize, match_count: usize) -> usize {
    let cap = key_length.min(alphabet_size).max(1);
    let mut length = 1;
    while length < cap && capacity(alphabet_size, length) < match_count {
        length += 1;
    }
    length
}

/// Number of distinct labels of `length` characters, saturating.
fn capacity(alphabet_size: usize, length: usize) -> usize {
    u32::try_from(length)
        .ok()
        .and_then(|l| alphabet_size.checked_pow(l))
        .unwrap_or(usize::MAX)
}

/// The first `count` labels of exactly `length` characters, in alphabet order.
///
/// Characters may repeat across positions (`ff`, `fj`, ... for `fjd...`).
/// At most `alphabet.len() ^ length` labels are returned.
pub fn generate_labels(alphabet: &[char], length: usize, count: usize) -> Vec<String> {
    if alphabet.is_empty() || length == 0 {
        return Vec::new();
    }

    let total = count.min(capacity(alphabet.len(), length));
    let mut labels = Vec::with_capacity(total);
    // odometer over alphabet indices, most significant digit first
    let mut digits = vec![0usize; length];

    for _ in 0..total {
        labels.push(digits.iter().map(|&d| alphabet[d]).collect());
        for d in digits.iter_mut().rev() {
            *d += 1;
            if *d < alphabet.len() {
                break;
            }
            *d = 0;
        }
    }

    labels
}

/// Squared distance from a match to the reference cursor.
///
/// `cursor` is 0-based `(col, row)`. Rows count `row_weight` times as much as
/// columns. Squared distances rank the same as the distances themselves.
pub fn weighted_distance(position: &Position, cursor: (i64, i64), row_weight: i64) -> i64 {
    let dx = position.column as i64 - (cursor.0 + 1);
    let dy = row_weight * (position.line as i64 - (cursor.1 + 1));
    dx * dx + dy * dy
}

/// Hand out `labels` to `positions`, nearest match first.
///
/// Returns one entry per position, in position order. Matches left over once
/// the labels run out get an empty string and cannot be selected. Ties keep
/// scan order.
pub fn assign_by_proximity(
    labels: &[String],
    positions: &[Position],
    cursor: (i64, i64),
    row_weight: i64,
) -> Vec<String> {
    let mut ranked: Vec<usize> = (0..positions.len()).collect();
    ranked.sort_by_key(|&i| weighted_distance(&positions[i], cursor, row_weight));

    let mut assigned = vec![String::new(); positions.len()];
    for (rank, position_idx) in ranked.into_iter().enumerate() {
        if let Some(label) = labels.get(rank) {
            assigned[position_idx] = label.clone();
        }
    }
    assigned
}

/// Position carrying `label`, if any.
pub fn find_label<'a>(
    label: &str,
    assigned: &[String],
    positions: &'a [Position],
) -> Option<&'a Position> {
    if label.is_empty() {
        return None;
    }
    assigned
        .iter()
        .position(|l| l == label)
        .and_then(|i| positions.get(i))
}

//! Results CSV builder
//!
//! One header row naming a rank column per slot, then one row per trial:
//! `ordinal,label1,..,labelN`. Ordinals are 1-based. Comma-separated,
//! newline-terminated, no quoting or escaping.

/// Build the results CSV for a completed run
pub fn build_csv(rankings: &[Vec<String>], slots: usize) -> String {
    let mut csv = String::from("Trial");
    for i in 0..slots {
        csv.push_str(",Rank");
        csv.push((b'A' + i as u8) as char);
    }
    csv.push('\n');

    for (index, ranking) in rankings.iter().enumerate() {
        csv.push_str(&format!("{},{}\n", index + 1, ranking.join(",")));
    }
    csv
}

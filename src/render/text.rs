/// Horizontal rule used between text renderings.
pub fn separator() -> String {
    "-".repeat(25)
}

/// Render labels in counting-friendly runs: a `|` marker every ten threads
/// and a line break every thirty.
pub fn ruled_line(labels: &[char]) -> String {
    let mut out = String::new();
    for (i, label) in labels.iter().enumerate() {
        out.push(*label);
        out.push_str("   ");
        let count = i + 1;
        if count % 30 == 0 {
            out.push('\n');
            continue;
        }
        if count % 10 == 0 {
            out.push_str("|   ");
        }
    }
    out
}

/// Render labels in rows aligned to a pattern repeat, `per_line` threads per
/// row, with the ten-thread `|` markers kept. A blank line separates whole
/// repeats.
pub fn pattern_grid(labels: &[char], pattern_size: usize, per_line: usize) -> String {
    if pattern_size == 0 || per_line == 0 {
        return ruled_line(labels);
    }

    let mut out = String::new();
    let mut count = 0usize;
    let mut in_pattern = 0usize;
    for label in labels {
        out.push(*label);
        out.push_str("   ");
        count += 1;
        in_pattern += 1;
        if count % 10 == 0 {
            out.push_str("|   ");
        }
        if in_pattern == pattern_size {
            out.push_str("\n\n");
            in_pattern = 0;
        } else if in_pattern % per_line == 0 {
            out.push('\n');
        }
    }
    out
}

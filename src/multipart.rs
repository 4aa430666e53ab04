//! Multipart body splitting

/// Split a multipart body into its raw part blocks.
///
/// A line equal to `--boundary` (ignoring surrounding whitespace) opens a
/// new part, `--boundary--` closes the last one and ends the scan. The
/// preamble before the first delimiter is dropped, as is everything after
/// the terminal delimiter. A part still open when the body runs out is
/// kept rather than dropped, so truncated mail still yields its last part.
/// Part lines are re-joined with `\n`.
#[must_use]
pub fn split_multipart(body: &str, boundary: &str) -> Vec<String> {
    let delimiter = format!("--{boundary}");
    let terminator = format!("{delimiter}--");

    let mut parts = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_part = false;

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed == delimiter {
            if in_part && !current.is_empty() {
                parts.push(current.join("\n"));
            }
            current.clear();
            in_part = true;
            continue;
        }
        if trimmed == terminator {
            if in_part && !current.is_empty() {
                parts.push(current.join("\n"));
            }
            current.clear();
            break;
        }
        if in_part {
            current.push(line);
        }
    }

    if in_part && !current.is_empty() {
        parts.push(current.join("\n"));
    }

    parts
}

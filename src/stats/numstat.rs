//! Parsing of raw `git log --numstat` lines, used when a commit arrives
//! without structured file changes.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumstatLine<'a> {
    pub insertions: u64,
    pub deletions: u64,
    pub path: &'a str,
}

/// Parses one `added\tdeleted\tpath` line.
///
/// Returns `None` unless the line has exactly three tab-separated fields and
/// both counts are non-negative integers. Binary files (`-\t-\tpath`) are
/// therefore rejected.
pub fn parse_line(line: &str) -> Option<NumstatLine<'_>> {
    let mut fields = line.split('\t');
    let added = fields.next()?;
    let deleted = fields.next()?;
    let path = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    Some(NumstatLine {
        insertions: added.trim().parse().ok()?,
        deletions: deleted.trim().parse().ok()?,
        path,
    })
}

/// Yields every well-formed line of a raw numstat body.
pub fn parse_body(body: &str) -> impl Iterator<Item = NumstatLine<'_>> {
    body.trim().lines().filter_map(|line| {
        let parsed = parse_line(line);
        if parsed.is_none() {
            tracing::trace!(line, "skipping malformed numstat line");
        }
        parsed
    })
}

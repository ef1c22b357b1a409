//! Natural ("human") ordering of chapter labels: digit runs compare by value.

use std::cmp::Ordering;

/// One maximal run of a label: all ASCII digits or all non-digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Text(&'a str),
    Number(&'a str),
}

fn runs(s: &str) -> Vec<Run<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut digits: Option<bool> = None;
    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match digits {
            Some(d) if d != is_digit => {
                out.push(make_run(&s[start..i], d));
                start = i;
            }
            _ => {}
        }
        digits = Some(is_digit);
    }
    if let Some(d) = digits {
        out.push(make_run(&s[start..], d));
    }
    out
}

fn make_run(s: &str, digits: bool) -> Run<'_> {
    if digits {
        Run::Number(s)
    } else {
        Run::Text(s)
    }
}

/// Compare two digit runs by value without parsing (no overflow on long runs).
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_run(a: Run<'_>, b: Run<'_>) -> Ordering {
    match (a, b) {
        (Run::Number(x), Run::Number(y)) => cmp_numeric(x, y),
        (Run::Text(x), Run::Text(y))
        | (Run::Text(x), Run::Number(y))
        | (Run::Number(x), Run::Text(y)) => x.cmp(y),
    }
}

/// Total natural order over strings.
///
/// Runs are compared left to right; the first differing run decides. If one
/// label is a run-prefix of the other the shorter one orders first. Labels
/// that are equal run by run (e.g. "ch 01" and "ch 1") fall back to plain
/// string order, so `Equal` is returned only for identical strings.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ra = runs(a);
    let rb = runs(b);
    for (x, y) in ra.iter().zip(rb.iter()) {
        let ord = cmp_run(*x, *y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ra.len().cmp(&rb.len()).then_with(|| a.cmp(b))
}

/// Stable sort in natural order.
pub fn sort_natural<T: AsRef<str>>(items: &mut [T]) {
    items.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}

//! Glob matching with Redis `MATCH` semantics.
//!
//! Supported syntax:
//! - `*` matches any run of characters, including none
//! - `?` matches exactly one character
//! - `[abc]`, `[a-z]` and `[^a]` match one character from (or outside) a set
//! - `\x` matches `x` literally

/// Returns true if `text` matches the glob `pattern`.
///
/// # Example
///
/// ```rust
/// use kvconf_store::glob_match;
///
/// assert!(glob_match("app.*", "app.timeout"));
/// assert!(glob_match("h?llo", "hallo"));
/// assert!(!glob_match("h[^e]llo", "hello"));
/// ```
#[must_use]
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    match_from(&pattern, &text)
}

fn match_from(pattern: &[char], text: &[char]) -> bool {
    let mut p = 0;
    let mut t = 0;
    // Pattern index just past the last `*`, and the text index it is resumed from.
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if pattern.get(p) == Some(&'*') {
            p += 1;
            star = Some((p, t));
            continue;
        }
        if let Some(next) = match_token(pattern, p, text[t]) {
            p = next;
            t += 1;
            continue;
        }
        match star {
            Some((resume, consumed)) => {
                star = Some((resume, consumed + 1));
                p = resume;
                t = consumed + 1;
            }
            None => return false,
        }
    }

    pattern[p.min(pattern.len())..].iter().all(|&c| c == '*')
}

/// Matches the single-character token at `p` against `c`.
///
/// Returns the pattern index after the token, or `None` on a mismatch or at
/// the end of the pattern.
fn match_token(pattern: &[char], p: usize, c: char) -> Option<usize> {
    match *pattern.get(p)? {
        '?' => Some(p + 1),
        '[' => {
            let (matched, next) = match_class(pattern, p + 1, c);
            matched.then_some(next)
        }
        '\\' if p + 1 < pattern.len() => (pattern[p + 1] == c).then_some(p + 2),
        literal => (literal == c).then_some(p + 1),
    }
}

/// Matches `c` against the class starting at `start` (just past `[`).
///
/// Returns whether it matched and the pattern index after the closing `]`.
/// An unterminated class runs to the end of the pattern.
fn match_class(pattern: &[char], start: usize, c: char) -> (bool, usize) {
    let mut p = start;
    let negate = pattern.get(p) == Some(&'^');
    if negate {
        p += 1;
    }

    let mut matched = false;
    while p < pattern.len() && pattern[p] != ']' {
        if pattern[p] == '\\' && p + 1 < pattern.len() {
            p += 1;
            if pattern[p] == c {
                matched = true;
            }
        } else if p + 2 < pattern.len() && pattern[p + 1] == '-' && pattern[p + 2] != ']' {
            let (mut lo, mut hi) = (pattern[p], pattern[p + 2]);
            if lo > hi {
                std::mem::swap(&mut lo, &mut hi);
            }
            if (lo..=hi).contains(&c) {
                matched = true;
            }
            p += 2;
        } else if pattern[p] == c {
            matched = true;
        }
        p += 1;
    }

    // Skip the closing bracket when present.
    let next = if p < pattern.len() { p + 1 } else { p };
    (matched != negate, next)
}

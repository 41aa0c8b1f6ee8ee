//! Identifier derivation.
//!
//! Turns a path segment or file stem into a PascalCase symbol name:
//!
//! ```text
//! many_by_user   -> ManyByUser
//! user/role      -> UserRole
//! get_user_id    -> GetUserID
//! ```
//!
//! Everything that is not a letter or digit is stripped and starts a new word.
//! The first letter of each word is upper-cased, digits pass through and never
//! capitalize what follows them. Words that spell a known abbreviation are
//! emitted fully upper-cased.

use std::collections::HashSet;

use lazy_static::lazy_static;

/// Abbreviations recognised by [`derive`].
pub const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "CSV", "DB", "DNS", "EOF", "GUID", "HTML", "HTTP",
    "HTTPS", "ID", "IP", "JSON", "JWT", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL",
    "SSH", "TCP", "TLS", "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML",
    "XMPP", "XSRF", "XSS",
];

lazy_static! {
    static ref DEFAULT_DERIVER: Deriver = Deriver::with_abbreviations(DEFAULT_ABBREVIATIONS);
}

/// Derive an identifier using the default abbreviation set.
///
/// See [`Deriver::derive`].
pub fn derive(raw: &str, force_initial_cap: bool) -> String {
    DEFAULT_DERIVER.derive(raw, force_initial_cap)
}

/// Identifier deriver with a configurable abbreviation set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deriver {
    /// Upper-cased abbreviations.
    abbreviations: HashSet<String>,
}

impl Default for Deriver {
    fn default() -> Self {
        DEFAULT_DERIVER.clone()
    }
}

impl Deriver {
    /// A deriver that never expands abbreviations.
    pub fn plain() -> Self {
        Self {
            abbreviations: HashSet::new(),
        }
    }

    /// A deriver recognising exactly the given abbreviations (matched
    /// case-insensitively).
    pub fn with_abbreviations<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            abbreviations: abbreviations
                .into_iter()
                .map(|a| a.as_ref().to_uppercase())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// Whether `word` is a known abbreviation (case-insensitive).
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(&word.to_uppercase())
    }

    /// Convert `raw` into an identifier.
    ///
    /// When `force_initial_cap` is false a word starting at the very first
    /// character is copied as encountered, which yields camelCase output.
    /// Input without letters or digits gives an empty string.
    pub fn derive(&self, raw: &str, force_initial_cap: bool) -> String {
        let chars: Vec<char> = raw.chars().collect();
        let mut out = String::with_capacity(raw.len());
        let mut at_boundary = true;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if !is_kept(c) {
                at_boundary = true;
                i += 1;
                continue;
            }

            if at_boundary && !(i == 0 && !force_initial_cap) {
                at_boundary = false;
                let end = run_end(&chars, i);
                let run: String = chars[i..end].iter().collect();
                if is_uniform_case(&run) && self.is_abbreviation(&run) {
                    out.push_str(&run.to_uppercase());
                    i = end;
                    continue;
                }
                if c.is_alphabetic() {
                    out.extend(c.to_uppercase().filter(|u| is_kept(*u)));
                    i += 1;
                    continue;
                }
            }

            at_boundary = false;
            out.push(c);
            i += 1;
        }

        out
    }
}

fn is_kept(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric()
}

/// Index one past the alphanumeric run starting at `start`.
fn run_end(chars: &[char], start: usize) -> usize {
    chars[start..]
        .iter()
        .position(|c| !is_kept(*c))
        .map_or(chars.len(), |offset| start + offset)
}

// Mixed-case runs ("XMl", "Utf8") are never treated as abbreviations: they can
// only come from several words glued together, and expanding them would make
// derivation non-idempotent.
fn is_uniform_case(run: &str) -> bool {
    !run.chars().any(char::is_uppercase) || !run.chars().any(char::is_lowercase)
}

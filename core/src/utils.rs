//! Formatting helpers.

use std::fmt::Debug;

/// Masks a secret for `Debug` output while keeping enough of it to tell
/// two credentials apart.
///
/// Values of fewer than twelve characters are masked entirely; longer
/// values keep their first three and last three characters, which for the
/// usual `sk_live_...` / `ck_live_...` key formats shows the key family
/// and a short suffix but never the key material. Counting is per
/// character, not per byte, so a multi-byte value can never split a
/// character boundary.
pub struct Redact<'a>(&'a str);

const KEEP: usize = 3;
const MIN_REDACTABLE: usize = 12;

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref().unwrap_or(""))
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("EMPTY");
        }
        let count = self.0.chars().count();
        if count < MIN_REDACTABLE {
            return f.write_str("***");
        }
        for c in self.0.chars().take(KEEP) {
            write!(f, "{c}")?;
        }
        f.write_str("***")?;
        for c in self.0.chars().skip(count - KEEP) {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

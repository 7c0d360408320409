use std::fmt;

const NEW_PREFIX: &str = "New-";
const UPDATED_PREFIX: &str = "Updated-";

/// Lifecycle tag of a record's identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdTag {
    Original,
    New,
    Updated,
}

/// A record identifier with its lifecycle tag made explicit.
///
/// The grid library only understands a flat string key, so the tag is
/// encoded as a `New-<n>-` / `Updated-<n>-` prefix on the wire:
///
/// ```
/// use recon_grid::types::RecordId;
///
/// let id = RecordId::parse("New-2-8edc");
/// assert_eq!(id, RecordId::New { seq: 2, base: "8edc".into() });
/// assert_eq!(id.to_string(), "New-2-8edc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// An unmodified source record.
    Original(String),
    /// A row created by splitting an amount off `base`.
    New { seq: u64, base: String },
    /// `base` after its first edit.
    Updated { seq: u64, base: String },
}

impl RecordId {
    /// Decode a wire identifier.
    ///
    /// Anything that is not `<prefix><digits>-<non-empty base>` is Original.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if let Some((seq, base)) = split_tagged(raw, NEW_PREFIX) {
            return Self::New { seq, base };
        }
        if let Some((seq, base)) = split_tagged(raw, UPDATED_PREFIX) {
            return Self::Updated { seq, base };
        }
        Self::Original(raw.to_string())
    }

    #[must_use]
    pub fn tag(&self) -> IdTag {
        match self {
            Self::Original(_) => IdTag::Original,
            Self::New { .. } => IdTag::New,
            Self::Updated { .. } => IdTag::Updated,
        }
    }

    #[must_use]
    pub fn is_original(&self) -> bool {
        matches!(self, Self::Original(_))
    }

    /// Base used when this record is the source of a split.
    ///
    /// Only a `New-<n>-` prefix is stripped, so repeated splits of a split
    /// row do not chain prefixes. Updated identifiers are kept whole.
    #[must_use]
    pub fn split_base(&self) -> String {
        match self {
            Self::New { base, .. } => base.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original(raw) => f.write_str(raw),
            Self::New { seq, base } => write!(f, "{NEW_PREFIX}{seq}-{base}"),
            Self::Updated { seq, base } => write!(f, "{UPDATED_PREFIX}{seq}-{base}"),
        }
    }
}

fn split_tagged(raw: &str, prefix: &str) -> Option<(u64, String)> {
    let rest = raw.strip_prefix(prefix)?;
    let (digits, base) = rest.split_once('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || base.is_empty() {
        return None;
    }
    let seq = digits.parse::<u64>().ok()?;
    Some((seq, base.to_string()))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_original() {
        assert_eq!(RecordId::parse("8edc"), RecordId::Original("8edc".into()));
        assert_eq!(RecordId::parse("New-x-8edc").tag(), IdTag::Original);
        assert_eq!(RecordId::parse("New-1-").tag(), IdTag::Original);
        assert_eq!(RecordId::parse("New--8edc").tag(), IdTag::Original);
        assert_eq!(RecordId::parse("Newer-1-8edc").tag(), IdTag::Original);
    }

    #[test]
    fn test_parse_tagged() {
        assert_eq!(
            RecordId::parse("Updated-12-A"),
            RecordId::Updated {
                seq: 12,
                base: "A".into()
            }
        );
        // Base may itself contain dashes
        assert_eq!(
            RecordId::parse("New-3-8edc-11ef"),
            RecordId::New {
                seq: 3,
                base: "8edc-11ef".into()
            }
        );
    }

    #[test]
    fn test_split_base() {
        assert_eq!(RecordId::parse("A").split_base(), "A");
        assert_eq!(RecordId::parse("New-4-A").split_base(), "A");
        assert_eq!(RecordId::parse("Updated-1-A").split_base(), "Updated-1-A");
    }
}

/// Character shown in place of hidden secret characters.
pub const MASK_CHAR: char = '*';

/// Secrets up to this many characters are masked completely.
const FULL_MASK_MAX_CHARS: usize = 6;

/// Output target: a fixed ingest base plus the secret stream key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationUri {
    base: String,
    secret: String,
}

impl DestinationUri {
    pub fn new(base: &str, secret: &str) -> Self {
        Self {
            base: normalize_base(base),
            secret: secret.trim().to_string(),
        }
    }

    /// Split a persisted URI against `base`. A URI that does not start with
    /// the base carries no usable secret.
    pub fn parse(base: &str, persisted: &str) -> Self {
        let base = normalize_base(base);
        let secret = persisted
            .trim()
            .strip_prefix(base.as_str())
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        Self { base, secret }
    }

    pub fn unconfigured(base: &str) -> Self {
        Self::new(base, "")
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }

    /// The single string the streaming service reads.
    pub fn render(&self) -> String {
        format!("{}{}", self.base, self.secret)
    }

    pub fn masked_secret(&self) -> String {
        mask_secret(&self.secret)
    }
}

/// Base with exactly one trailing slash.
pub fn normalize_base(base: &str) -> String {
    format!("{}/", base.trim().trim_end_matches('/'))
}

/// Hide a secret for display while keeping its length visible: short
/// secrets are fully masked, longer ones keep two characters at each end.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();
    if len <= FULL_MASK_MAX_CHARS {
        return MASK_CHAR.to_string().repeat(len);
    }

    let mut masked = String::with_capacity(secret.len());
    masked.extend(&chars[..2]);
    masked.extend(std::iter::repeat_n(MASK_CHAR, len - 4));
    masked.extend(&chars[len - 2..]);
    masked
}

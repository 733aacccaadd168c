use crate::types::RawItem;
use url::Url;

pub const MAX_TEXT_LENGTH: usize = 256;

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Characters that may not appear unescaped in a well-formed link.
const DISALLOWED_URL_CHARS: [char; 9] = ['\\', '"', '<', '>', '^', '`', '{', '|', '}'];

/// The first rule a raw item broke. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("Post URL is not valid")]
    InvalidUrl,

    #[error("{0} is empty")]
    EmptyField(&'static str),

    // "chracters" is intentional
    #[error("{0} is longer than 256 chracters")]
    TooLong(&'static str),

    #[error("{0} must be greater than 0")]
    NonPositive(&'static str),
}

/// Fields of a raw item that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedItem {
    pub title: String,
    pub uri: String,
    pub author: String,
    pub points: i64,
    pub comments: i64,
}

/// Check a raw item and normalize it.
///
/// Rules run in a fixed order and the first failure is returned:
/// URL, title, author, score, comment count.
pub fn validate(item: &RawItem) -> Result<ValidatedItem, ValidationFailure> {
    let uri = validate_url(item.url())?;
    let title = validate_text(item.title(), "Title")?;
    let author = validate_text(item.author(), "Author name")?;
    let points = validate_number(item.score(), "Story points")?;
    let comments = validate_number(item.comment_count(), "Comment count")?;

    Ok(ValidatedItem {
        title: title.to_string(),
        uri: uri.to_string(),
        author: author.to_string(),
        points,
        comments,
    })
}

/// Accepts only absolute http(s) links whose original text is well formed.
///
/// The original string is returned untouched. `Url` repairs backslashes,
/// surrounding whitespace, missing authority slashes and bad escapes, so the
/// raw text is checked on its own before and after parsing.
pub fn validate_url(raw: &str) -> Result<&str, ValidationFailure> {
    if raw.is_empty() || !is_well_formed(raw) {
        return Err(ValidationFailure::InvalidUrl);
    }

    let parsed = Url::parse(raw).map_err(|_| ValidationFailure::InvalidUrl)?;
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) || !parsed.has_host() {
        return Err(ValidationFailure::InvalidUrl);
    }
    if !has_authority(raw, parsed.scheme()) {
        return Err(ValidationFailure::InvalidUrl);
    }

    Ok(raw)
}

fn is_well_formed(raw: &str) -> bool {
    !raw
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || DISALLOWED_URL_CHARS.contains(&c))
        && has_valid_escapes(raw)
}

/// Every `%` must start a two hex digit escape.
fn has_valid_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || matches!(
                (bytes.get(i + 1), bytes.get(i + 2)),
                (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
    })
}

/// Raw text must read `<scheme>://<authority>` with a non-empty authority.
fn has_authority(raw: &str, scheme: &str) -> bool {
    let prefix_len = scheme.len() + 3;
    let has_prefix = raw
        .get(..prefix_len)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(&format!("{}://", scheme)));
    if !has_prefix {
        return false;
    }

    let authority = raw[prefix_len..].split(['/', '?', '#']).next().unwrap_or_default();
    !authority.is_empty()
}

pub fn validate_text<'a>(text: &'a str, field: &'static str) -> Result<&'a str, ValidationFailure> {
    if text.is_empty() {
        return Err(ValidationFailure::EmptyField(field));
    }
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(ValidationFailure::TooLong(field));
    }
    Ok(text)
}

pub fn validate_number(number: i64, field: &'static str) -> Result<i64, ValidationFailure> {
    if number <= 0 {
        return Err(ValidationFailure::NonPositive(field));
    }
    Ok(number)
}

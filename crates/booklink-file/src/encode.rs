//! Small encoders used by the link renderer.
use jiff::Timestamp;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped in URL paths. `/` is kept.
const URL_PATH: &AsciiSet = &CONTROLS
  .add(b' ')
  .add(b'"')
  .add(b'#')
  .add(b'%')
  .add(b'<')
  .add(b'>')
  .add(b'?')
  .add(b'`')
  .add(b'{')
  .add(b'}')
  .add(b'|')
  .add(b'\\')
  .add(b'^')
  .add(b'[')
  .add(b']');

/// Characters escaped in query parameter names and values.
const URL_QUERY: &AsciiSet = &URL_PATH.add(b'&').add(b'=').add(b'+').add(b'/');

/// Percent-encode the path of a servlet URL, and the optional query
/// parameter appended to it.
#[must_use]
pub fn encode_url_path(path: &str, query: Option<(&str, &str)>) -> String {
  let mut url = utf8_percent_encode(path, URL_PATH).to_string();
  if let Some((name, value)) = query {
    url.push('?');
    url.extend(utf8_percent_encode(name, URL_QUERY));
    url.push('=');
    url.extend(utf8_percent_encode(value, URL_QUERY));
  }
  url
}

/// Encode a last-modified time for a cache-busting parameter: whole seconds
/// since the Unix epoch, in radix 32.
#[must_use]
pub fn encode_last_modified(last_modified: Timestamp) -> String {
  const DIGITS: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

  let seconds = last_modified.as_second();
  let mut remaining = seconds.unsigned_abs();
  let mut digits = Vec::new();
  loop {
    #[allow(clippy::cast_possible_truncation, reason = "value is below 32")]
    digits.push(DIGITS[(remaining % 32) as usize]);
    remaining /= 32;
    if remaining == 0 {
      break;
    }
  }
  if seconds < 0 {
    digits.push(b'-');
  }
  digits.iter().rev().map(|&b| char::from(b)).collect()
}

/// Human readable, approximate size: `1 byte`, `12 bytes`, `1.5 KB`,
/// `340 MB`.
///
/// Below 100 units one decimal is shown, truncated rather than rounded.
#[must_use]
pub fn approximate_size(bytes: u64) -> String {
  const UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

  if bytes == 1 {
    return "1 byte".to_owned();
  }
  if bytes < 1024 {
    return format!("{bytes} bytes");
  }

  let mut unit_size: u64 = 1024;
  let mut unit = UNITS[0];
  for (idx, name) in UNITS.iter().enumerate().skip(1) {
    let next = 1_u64 << (10 * (idx + 1));
    if bytes < next {
      break;
    }
    unit_size = next;
    unit = name;
  }

  let whole = bytes / unit_size;
  if whole < 100 {
    let tenths = (u128::from(bytes % unit_size) * 10) / u128::from(unit_size);
    format!("{whole}.{tenths} {unit}")
  } else {
    format!("{whole} {unit}")
  }
}

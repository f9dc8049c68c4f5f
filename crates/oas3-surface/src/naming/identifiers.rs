use std::{collections::BTreeSet, sync::LazyLock};

use any_ascii::any_ascii;
use regex::Regex;

use crate::naming::constants::{EMPTY_CONSTANT, UNNAMED_IDENTIFIER};

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static NON_ALPHANUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// Transliterates to ASCII, replaces invalid characters with underscores, collapses
/// consecutive underscores, and trims any leading or trailing underscores.
pub fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

fn separator_to_camel(raw: &str, separator: char) -> String {
  let mut result = String::with_capacity(raw.len());
  let mut chars = raw.chars().peekable();

  while let Some(c) = chars.next() {
    if c != separator {
      result.push(c);
      continue;
    }
    if let Some(next) = chars.next_if(|next| *next != separator) {
      result.extend(next.to_uppercase());
    }
  }

  result
}

/// `pet_id` -> `petId`. Separators that are not followed by a character are dropped.
pub fn snake_to_camel(raw: &str) -> String {
  separator_to_camel(raw, '_')
}

/// `x-request-id` -> `xRequestId`.
pub fn kebab_to_camel(raw: &str) -> String {
  separator_to_camel(raw, '-')
}

pub fn capitalize(raw: &str) -> String {
  let mut chars = raw.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
  }
}

pub fn uncapitalize(raw: &str) -> String {
  let mut chars = raw.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
  }
}

/// Converts an arbitrary document name into a camelCase identifier.
///
/// # Rules:
/// 1. Transliterates to ASCII and turns every run of illegal characters into `_`.
/// 2. Replaces `_x` with `X` and drops the remaining separators.
/// 3. Lowercases the first character.
/// 4. Prefixes `_` when the result starts with a digit.
/// 5. Falls back to `unnamed` when nothing survives.
pub fn to_identifier(raw: &str) -> String {
  let sanitized = sanitize(raw);
  if sanitized.is_empty() {
    return UNNAMED_IDENTIFIER.to_string();
  }

  let mut ident = uncapitalize(&snake_to_camel(&sanitized));
  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }
  ident
}

/// Returns true when the identifier form of `raw` differs from `raw`, meaning the emitted
/// member needs an explicit annotation carrying the wire name.
pub fn needs_wire_name(raw: &str) -> bool {
  to_identifier(raw) != raw
}

/// Converts a name into a PascalCase type name.
pub fn to_type_name(raw: &str) -> String {
  capitalize(&to_identifier(raw))
}

/// `X-Request-ID` -> `X_REQUEST_ID`.
///
/// The result is always usable as a constant: never empty and never starting with a digit.
pub fn constant_name(raw: &str) -> String {
  let ascii = any_ascii(raw);
  let mut constant = NON_ALPHANUMERIC_RE
    .replace_all(&ascii, "_")
    .trim_matches('_')
    .to_ascii_uppercase();
  if constant.is_empty() {
    return EMPTY_CONSTANT.to_string();
  }
  if constant.starts_with(|c: char| c.is_ascii_digit()) {
    constant.insert(0, '_');
  }
  constant
}

/// Ensures a name is unique within a set of used names, appending a numeric suffix if needed.
pub fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  ensure_unique_with(base_name, |candidate| used_names.contains(candidate))
}

pub fn ensure_unique_with<F>(base_name: &str, is_taken: F) -> String
where
  F: Fn(&str) -> bool,
{
  if !is_taken(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}{i}");
    if !is_taken(&new_name) {
      return new_name;
    }
    i += 1;
  }
}

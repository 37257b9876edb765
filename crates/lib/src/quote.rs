//! Double-quoted string rendering for setting values.
//!
//! Values are rendered with conventional escape sequences so that every
//! report line stays on one line and is unambiguous:
//!
//! - `"` and `\` are backslash-escaped
//! - `\a \b \f \n \r \t \v` use their short forms
//! - remaining ASCII controls and DEL become `\xNN`
//! - non-ASCII characters outside the letter, mark, number, punctuation
//!   and symbol categories become `\uNNNN` or `\UNNNNNNNN`
//! - everything else, including printable Unicode, is copied as is

use std::fmt::Write;

use unicode_general_category::{GeneralCategory, get_general_category};

/// Quote `value` as a double-quoted string literal.
pub fn quote(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');
  for c in value.chars() {
    push_escaped(&mut out, c);
  }
  out.push('"');
  out
}

fn push_escaped(out: &mut String, c: char) {
  match c {
    '"' => out.push_str("\\\""),
    '\\' => out.push_str("\\\\"),
    '\u{07}' => out.push_str("\\a"),
    '\u{08}' => out.push_str("\\b"),
    '\u{0C}' => out.push_str("\\f"),
    '\n' => out.push_str("\\n"),
    '\r' => out.push_str("\\r"),
    '\t' => out.push_str("\\t"),
    '\u{0B}' => out.push_str("\\v"),
    c if c.is_ascii() => {
      if c.is_ascii_control() {
        // Writing to a String cannot fail.
        let _ = write!(out, "\\x{:02x}", c as u32);
      } else {
        out.push(c);
      }
    }
    c if is_printable(c) => out.push(c),
    c if (c as u32) < 0x10000 => {
      let _ = write!(out, "\\u{:04x}", c as u32);
    }
    c => {
      let _ = write!(out, "\\U{:08x}", c as u32);
    }
  }
}

/// Printability for non-ASCII characters: letters, marks, numbers,
/// punctuation and symbols. Controls, format characters, surrogates,
/// private-use, unassigned code points and separators are not printable.
fn is_printable(c: char) -> bool {
  use GeneralCategory::*;

  matches!(
    get_general_category(c),
    UppercaseLetter
      | LowercaseLetter
      | TitlecaseLetter
      | ModifierLetter
      | OtherLetter
      | NonspacingMark
      | SpacingMark
      | EnclosingMark
      | DecimalNumber
      | LetterNumber
      | OtherNumber
      | ConnectorPunctuation
      | DashPunctuation
      | OpenPunctuation
      | ClosePunctuation
      | InitialPunctuation
      | FinalPunctuation
      | OtherPunctuation
      | MathSymbol
      | CurrencySymbol
      | ModifierSymbol
      | OtherSymbol
  )
}

/*!
  Literal values in assembly text.

  A word that is not an id or a name is a literal. Numbers are written without quotes, strings
  always with them. A number's representation is sniffed from its spelling: a period makes it a
  float, a leading minus sign makes it signed, and otherwise it is unsigned. Each is kept at 32
  bits when that loses nothing and widened to 64 bits otherwise. Unsigned numbers may also be
  written in hex (`0x1F`), and floats may carry an exponent (`1.5e3`).

  When the type a literal initializes is known, the literal is instead parsed to exactly that
  type's width and signedness by `parse_typed_integer` and `parse_typed_float`.
*/

use nom::{
  bytes::complete::tag_no_case,
  character::complete::{char as one_char, digit1, hex_digit1, oct_digit1},
  combinator::{all_consuming, opt, recognize},
  number::complete::recognize_float,
  sequence::{pair, preceded},
  IResult,
};

/// The longest literal string, in bytes, that can be encoded.
pub const MAX_LITERAL_STRING_BYTES: usize = 65535;

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
  I32(i32),
  I64(i64),
  U32(u32),
  U64(u64),
  F32(f32),
  F64(f64),
  String(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LiteralError {
  /// Neither a number nor a quoted string.
  Invalid,
  /// A quoted string longer than `MAX_LITERAL_STRING_BYTES`.
  TooLong,
  /// A number that does not fit the type it was parsed for.
  OutOfRange,
}

impl Literal {
  pub fn is_string(&self) -> bool {
    matches!(self, Literal::String(_))
  }
}

fn hex_number(text: &str) -> IResult<&str, &str> {
  preceded(tag_no_case("0x"), hex_digit1)(text)
}

fn signed_decimal(text: &str) -> IResult<&str, &str> {
  recognize(pair(opt(one_char('-')), digit1))(text)
}

fn octal_number(text: &str) -> IResult<&str, &str> {
  preceded(one_char('0'), oct_digit1)(text)
}

fn decimal_number(text: &str) -> IResult<&str, &str> {
  digit1(text)
}

fn is_float_spelling(text: &str) -> bool {
  !text.starts_with('+') && all_consuming(recognize_float::<&str, ()>)(text).is_ok()
}

/// Sniffs the type of a literal and parses it.
pub fn parse_literal(text: &str) -> Result<Literal, LiteralError> {
  if text.starts_with('"') {
    return parse_string(text).map(Literal::String);
  }

  if let Ok((_, digits)) = all_consuming(hex_number)(text) {
    let value = u64::from_str_radix(digits, 16).map_err(|_| LiteralError::Invalid)?;
    return Ok(narrow_unsigned(value));
  }

  if all_consuming(signed_decimal)(text).is_ok() {
    return match text.starts_with('-') {
      true => {
        let value = text.parse::<i64>().map_err(|_| LiteralError::Invalid)?;
        Ok(
          i32::try_from(value)
            .map(Literal::I32)
            .unwrap_or(Literal::I64(value))
        )
      }
      false => {
        let value = text.parse::<u64>().map_err(|_| LiteralError::Invalid)?;
        Ok(narrow_unsigned(value))
      }
    };
  }

  if is_float_spelling(text) {
    let value = text.parse::<f64>().map_err(|_| LiteralError::Invalid)?;
    let narrow = value as f32;
    return match narrow as f64 == value {
      true  => Ok(Literal::F32(narrow)),
      false => Ok(Literal::F64(value)),
    };
  }

  Err(LiteralError::Invalid)
}

fn narrow_unsigned(value: u64) -> Literal {
  u32::try_from(value)
    .map(Literal::U32)
    .unwrap_or(Literal::U64(value))
}

/**
  Parses a quoted string, removing the quotes and unescaping it: a backslash makes the character
  after it literal. A newline is only allowed escaped.
*/
pub fn parse_string(text: &str) -> Result<String, LiteralError> {
  let inner = text
    .strip_prefix('"')
    .and_then(|rest| rest.strip_suffix('"'))
    .ok_or(LiteralError::Invalid)?;

  let mut value = String::with_capacity(inner.len());
  let mut escaping = false;
  for c in inner.chars() {
    match (escaping, c) {
      (false, '\n')  => return Err(LiteralError::Invalid),
      (false, '\\')  => escaping = true,
      // An unescaped quote inside the string means the closing quote was escaped away.
      (false, '"')   => return Err(LiteralError::Invalid),
      (_, c)         => {
        escaping = false;
        value.push(c);
      }
    }
  }
  if escaping {
    return Err(LiteralError::Invalid);
  }

  match value.len() > MAX_LITERAL_STRING_BYTES {
    true  => Err(LiteralError::TooLong),
    false => Ok(value),
  }
}

/**
  Parses the integer of an immediate word, `!<integer>`, with the prefix already removed. As with
  C's `strtoul` in base 0, a `0x` prefix means hex and a leading `0` means octal. The whole text
  must be consumed.
*/
pub fn parse_immediate(text: &str) -> Result<u32, LiteralError> {
  let (radix, digits) = if let Ok((_, digits)) = all_consuming(hex_number)(text) {
    (16, digits)
  } else if let Ok((_, digits)) = all_consuming(octal_number)(text) {
    (8, digits)
  } else if let Ok((_, digits)) = all_consuming(decimal_number)(text) {
    match digits.len() > 1 && digits.starts_with('0') {
      true  => return Err(LiteralError::Invalid),
      false => (10, digits),
    }
  } else {
    return Err(LiteralError::Invalid);
  };
  u32::from_str_radix(digits, radix).map_err(|_| LiteralError::OutOfRange)
}

/**
  Parses an integer for an integer type of the given width and signedness, returning its bit
  pattern. Hex spellings give the bit pattern directly. For types narrower than 32 bits, signed
  values are sign extended to 32 bits; the high bits of unsigned values are zero.
*/
pub fn parse_typed_integer(text: &str, width: u32, signed: bool) -> Result<u64, LiteralError> {
  if width == 0 || width > 64 {
    return Err(LiteralError::OutOfRange);
  }
  let width_mask = match width {
    64 => u64::MAX,
    w  => (1u64 << w) - 1,
  };

  let bits = if let Ok((_, digits)) = all_consuming(hex_number)(text) {
    let value = u64::from_str_radix(digits, 16).map_err(|_| LiteralError::OutOfRange)?;
    if value & !width_mask != 0 {
      return Err(LiteralError::OutOfRange);
    }
    match signed && width < 32 && value & (1u64 << (width - 1)) != 0 {
      true  => value | (!width_mask & 0xFFFF_FFFF),
      false => value,
    }
  } else if all_consuming(signed_decimal)(text).is_ok() {
    match signed {
      true => {
        let value = text.parse::<i64>().map_err(|_| LiteralError::OutOfRange)?;
        let min = match width { 64 => i64::MIN, w => -(1i64 << (w - 1)) };
        let max = match width { 64 => i64::MAX, w => (1i64 << (w - 1)) - 1 };
        if value < min || value > max {
          return Err(LiteralError::OutOfRange);
        }
        match width {
          w if w <= 32 => value as u32 as u64,
          _            => value as u64,
        }
      }
      false => {
        if text.starts_with('-') {
          return Err(LiteralError::OutOfRange);
        }
        let value = text.parse::<u64>().map_err(|_| LiteralError::OutOfRange)?;
        if value & !width_mask != 0 {
          return Err(LiteralError::OutOfRange);
        }
        value
      }
    }
  } else {
    return Err(LiteralError::Invalid);
  };

  Ok(bits)
}

/// Parses a float for a float type of width 32 or 64, returning its bit pattern.
pub fn parse_typed_float(text: &str, width: u32) -> Result<u64, LiteralError> {
  if !is_float_spelling(text) {
    return Err(LiteralError::Invalid);
  }
  match width {
    32 => text
      .parse::<f32>()
      .map(|value| value.to_bits() as u64)
      .map_err(|_| LiteralError::Invalid),
    64 => text
      .parse::<f64>()
      .map(f64::to_bits)
      .map_err(|_| LiteralError::Invalid),
    _  => Err(LiteralError::OutOfRange),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn numbers_are_sniffed() {
    assert_eq!(parse_literal("42"), Ok(Literal::U32(42)));
    assert_eq!(parse_literal("4294967296"), Ok(Literal::U64(1 << 32)));
    assert_eq!(parse_literal("-1"), Ok(Literal::I32(-1)));
    assert_eq!(parse_literal("-2147483649"), Ok(Literal::I64(-2147483649)));
    assert_eq!(parse_literal("0xff"), Ok(Literal::U32(255)));
    assert_eq!(parse_literal("1.5"), Ok(Literal::F32(1.5)));
    assert_eq!(parse_literal("0.1"), Ok(Literal::F64(0.1)));
    assert_eq!(parse_literal("-2.5e2"), Ok(Literal::F32(-250.0)));
  }

  #[test]
  fn malformed_numbers_are_rejected() {
    for text in ["-", "1.2.3", "abc", "+1", "1-2", "", "18446744073709551616"] {
      assert_eq!(parse_literal(text), Err(LiteralError::Invalid), "{}", text);
    }
  }

  #[test]
  fn strings_are_unescaped() {
    assert_eq!(parse_literal("\"GLSL.std.450\""), Ok(Literal::String("GLSL.std.450".into())));
    assert_eq!(parse_string(r#""a\"b\\c""#), Ok(r#"a"b\c"#.to_string()));
    assert_eq!(parse_string(r#""\x""#), Ok("x".to_string()));
    assert_eq!(parse_string("\"\""), Ok(String::new()));
    assert_eq!(parse_string("\"a\nb\""), Err(LiteralError::Invalid));
    assert_eq!(parse_string("\"a\\\nb\""), Ok("a\nb".to_string()));
    assert_eq!(parse_string("\"abc"), Err(LiteralError::Invalid));
    assert_eq!(parse_string("\""), Err(LiteralError::Invalid));
  }

  #[test]
  fn long_strings_are_resource_errors() {
    let text = format!("\"{}\"", "x".repeat(MAX_LITERAL_STRING_BYTES + 1));
    assert_eq!(parse_string(&text), Err(LiteralError::TooLong));
    let text = format!("\"{}\"", "x".repeat(MAX_LITERAL_STRING_BYTES));
    assert!(parse_string(&text).is_ok());
  }

  #[test]
  fn immediates_follow_c_radix_rules() {
    assert_eq!(parse_immediate("12"), Ok(12));
    assert_eq!(parse_immediate("0x1F"), Ok(31));
    assert_eq!(parse_immediate("017"), Ok(15));
    assert_eq!(parse_immediate("0"), Ok(0));
    assert_eq!(parse_immediate(""), Err(LiteralError::Invalid));
    assert_eq!(parse_immediate("12a"), Err(LiteralError::Invalid));
    assert_eq!(parse_immediate("08"), Err(LiteralError::Invalid));
    assert_eq!(parse_immediate("4294967296"), Err(LiteralError::OutOfRange));
  }

  #[test]
  fn typed_integers_respect_width() {
    assert_eq!(parse_typed_integer("-1", 32, true), Ok(0xFFFF_FFFF));
    assert_eq!(parse_typed_integer("-1", 64, true), Ok(u64::MAX));
    assert_eq!(parse_typed_integer("-1", 16, true), Ok(0xFFFF_FFFF));
    assert_eq!(parse_typed_integer("65535", 16, false), Ok(0xFFFF));
    assert_eq!(parse_typed_integer("65536", 16, false), Err(LiteralError::OutOfRange));
    assert_eq!(parse_typed_integer("-1", 32, false), Err(LiteralError::OutOfRange));
    assert_eq!(parse_typed_integer("2147483648", 32, true), Err(LiteralError::OutOfRange));
    assert_eq!(parse_typed_integer("0x8000", 16, true), Ok(0xFFFF_8000));
    assert_eq!(parse_typed_integer("1.5", 32, false), Err(LiteralError::Invalid));
  }

  #[test]
  fn typed_floats() {
    assert_eq!(parse_typed_float("1", 32), Ok(1.0f32.to_bits() as u64));
    assert_eq!(parse_typed_float("-0.5", 64), Ok((-0.5f64).to_bits()));
    assert_eq!(parse_typed_float("x", 32), Err(LiteralError::Invalid));
    assert_eq!(parse_typed_float("1", 16), Err(LiteralError::OutOfRange));
  }
}

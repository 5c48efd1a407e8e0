//! PHP literal encoding for synthesized scripts.
//!
//! Every dynamic value that ends up inside a generated PHP script must pass
//! through these encoders. The emitted form is a single-quoted PHP string:
//! inside single quotes PHP only interprets `\\` and `\'`, so escaping those
//! two characters is sufficient to carry arbitrary text, including newlines,
//! dollar signs, and `?>` sequences, without further interpretation.

/// Encode a string as a single-quoted PHP string literal.
pub fn string_literal(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('\'');
  for ch in value.chars() {
    if ch == '\\' || ch == '\'' {
      out.push('\\');
    }
    out.push(ch);
  }
  out.push('\'');
  out
}

/// Encode a sequence of strings as a PHP `array( ... )` literal.
pub fn string_array_literal<S: AsRef<str>>(values: &[S]) -> String {
  if values.is_empty() {
    return "array()".to_string();
  }
  let items: Vec<String> = values.iter().map(|v| string_literal(v.as_ref())).collect();
  format!("array( {} )", items.join(", "))
}

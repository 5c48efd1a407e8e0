//! Shell-like command line tokenizer.
//!
//! Splits a command string into an argument vector so that
//! `wp option set blogname "My blog"` becomes
//! `["wp", "option", "set", "blogname", "My blog"]` rather than splitting
//! the quoted value on whitespace.
//!
//! This is deliberately not a shell grammar: no variable expansion, no
//! globbing, no pipes or redirection. Unterminated quotes consume to the end
//! of the input without raising an error.

/// Tokenizer state: either scanning bare text or inside a quoted span.
enum Mode {
  Normal,
  InQuote { quote: char },
}

/// Split a shell-like command line into arguments.
///
/// Single and double quotes group whitespace-containing arguments. Inside a
/// quoted span, a backslash copies the next character verbatim, which is the
/// only way to embed the quote character itself. The quote characters are
/// not part of the produced tokens.
pub fn tokenize(command: &str) -> Vec<String> {
  let mut mode = Mode::Normal;
  let mut parts = Vec::new();
  let mut current = String::new();

  let mut chars = command.chars();
  while let Some(ch) = chars.next() {
    match mode {
      Mode::Normal => {
        if ch == '"' || ch == '\'' {
          mode = Mode::InQuote { quote: ch };
        } else if ch.is_whitespace() {
          if !current.is_empty() {
            parts.push(std::mem::take(&mut current));
          }
        } else {
          current.push(ch);
        }
      }
      Mode::InQuote { quote } => {
        if ch == '\\' {
          if let Some(escaped) = chars.next() {
            current.push(escaped);
          }
        } else if ch == quote {
          mode = Mode::Normal;
        } else {
          current.push(ch);
        }
      }
    }
  }

  if !current.is_empty() {
    parts.push(current);
  }
  parts
}

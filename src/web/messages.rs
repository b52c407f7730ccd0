//! Localized UI messages.

use std::collections::HashMap;
use std::str::Chars;

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("login.title", "JTrac Login"),
    ("login.error", "Invalid login name or password."),
    ("login.loginName", "Login Name"),
    ("login.password", "Password"),
    ("login.rememberMe", "Remember me on this computer"),
    ("login.submit", "Login"),
    ("login.home", "Home"),
    ("dashboard.title", "Dashboard"),
    ("dashboard.welcome", "Welcome"),
    ("logout", "Logout"),
];

/// Message lookup by key with built-in English defaults.
///
/// Overrides come from a Java-style properties file so existing translations
/// can be dropped in as is. See [`Localizer::from_properties`] for the
/// accepted syntax.
#[derive(Debug, Clone)]
pub struct Localizer {
    messages: HashMap<String, String>,
}

impl Default for Localizer {
    fn default() -> Self {
        Self {
            messages: DEFAULT_MESSAGES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Localizer {
    /// Defaults overlaid with the entries found in `properties`.
    ///
    /// # Syntax
    ///
    /// - Lines starting with `#` or `!` are comments
    /// - The key ends at the first unescaped `=`, `:` or whitespace; one
    ///   separator and the whitespace around it are skipped
    /// - A line ending in an odd number of backslashes continues on the next
    ///   line, whose leading whitespace is dropped
    /// - `\t`, `\n`, `\r`, `\f`, `\uXXXX` and `\<char>` escapes are
    ///   decoded in keys and values
    pub fn from_properties(properties: &str) -> Self {
        let mut localizer = Self::default();

        for line in logical_lines(properties) {
            let (key, value) = split_entry(&line);
            localizer.messages.insert(key, value);
        }

        localizer
    }

    /// Loads overrides from a file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn load(path: &str) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_properties(&contents))
    }

    /// Returns the message for `key`, or the key itself when unknown.
    pub fn get(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Joins continued lines and drops blanks and comments.
fn logical_lines(input: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for raw in input.lines() {
        let line = raw.trim_start();
        if pending.is_none() && (line.is_empty() || line.starts_with(['#', '!'])) {
            continue;
        }

        let trailing_backslashes = line.chars().rev().take_while(|&c| c == '\\').count();
        let current = pending.get_or_insert_with(String::new);
        if trailing_backslashes % 2 == 1 {
            current.push_str(&line[..line.len() - 1]);
        } else {
            current.push_str(line);
            lines.extend(pending.take());
        }
    }

    lines.extend(pending);
    lines
}

fn split_entry(line: &str) -> (String, String) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || c.is_whitespace() {
            key_end = i;
            break;
        }
    }

    let rest = line[key_end..].trim_start();
    let rest = rest
        .strip_prefix(['=', ':'])
        .map_or(rest, str::trim_start);

    (unescape(&line[..key_end]), unescape(rest))
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{0c}'),
            Some('u') => {
                let Some(unit) = hex_unit(&mut chars) else {
                    out.push_str("\\u");
                    continue;
                };
                let decoded = if (0xD800..0xDC00).contains(&unit) {
                    low_surrogate(&mut chars)
                        .map(|low| 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00))
                } else {
                    Some(unit)
                };
                out.push(
                    decoded
                        .and_then(char::from_u32)
                        .unwrap_or(char::REPLACEMENT_CHARACTER),
                );
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

/// Reads the four hex digits of a `\u` escape.
fn hex_unit(chars: &mut Chars<'_>) -> Option<u32> {
    let lookahead = chars.clone();
    let digits: String = lookahead.take(4).collect();
    if digits.len() != 4 {
        return None;
    }
    let unit = u32::from_str_radix(&digits, 16).ok()?;
    chars.nth(3);
    Some(unit)
}

/// Consumes a following `\uDC00`..`\uDFFF` escape.
fn low_surrogate(chars: &mut Chars<'_>) -> Option<u32> {
    let mut lookahead = chars.clone();
    if lookahead.next() != Some('\\') || lookahead.next() != Some('u') {
        return None;
    }
    let unit = hex_unit(&mut lookahead)?;
    if !(0xDC00..0xE000).contains(&unit) {
        return None;
    }
    *chars = lookahead;
    Some(unit)
}

///! Text kernel parsing
///!
///! A text kernel interleaves free commentary with `\begindata` sections of
///! `NAME = value` and `NAME += value` assignments. Values are numbers,
///! quoted strings (`''` escapes a quote) or parenthesised lists of either.

use crate::error::{GateError, Result};
use regex::Regex;

const BEGIN_DATA: &str = "\\begindata";
const BEGIN_TEXT: &str = "\\begintext";

#[derive(Debug, Clone, PartialEq)]
pub enum PoolValue {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl PoolValue {
    pub fn len(&self) -> usize {
        match self {
            PoolValue::Numeric(values) => values.len(),
            PoolValue::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first_number(&self) -> Option<f64> {
        match self {
            PoolValue::Numeric(values) => values.first().copied(),
            PoolValue::Text(_) => None,
        }
    }

    pub fn first_text(&self) -> Option<&str> {
        match self {
            PoolValue::Text(values) => values.first().map(String::as_str),
            PoolValue::Numeric(_) => None,
        }
    }

    /// Append `other` in place; both sides must hold the same kind of value
    pub fn extend(&mut self, other: PoolValue) -> Result<()> {
        match (self, other) {
            (PoolValue::Numeric(a), PoolValue::Numeric(b)) => a.extend(b),
            (PoolValue::Text(a), PoolValue::Text(b)) => a.extend(b),
            _ => {
                return Err(GateError::Kernel(
                    "cannot append values of a different type".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub append: bool,
    pub value: PoolValue,
}

/// Parse a full kernel file, honouring `\begindata` and `\begintext` markers.
/// Text without any marker is treated as pure data.
pub fn parse_kernel_text(text: &str) -> Result<Vec<Assignment>> {
    if !text.contains(BEGIN_DATA) {
        return parse_assignments(text);
    }

    let mut data = String::new();
    let mut in_data = false;
    for line in text.lines() {
        match line.trim() {
            BEGIN_DATA => in_data = true,
            BEGIN_TEXT => in_data = false,
            _ if in_data => {
                data.push_str(line);
                data.push('\n');
            }
            _ => {}
        }
    }

    parse_assignments(&data)
}

/// Parse a run of assignments with no commentary
pub fn parse_assignments(data: &str) -> Result<Vec<Assignment>> {
    let head = Regex::new(r"([A-Za-z_][A-Za-z0-9_./\-]*)\s*(\+?=)")
        .map_err(|e| GateError::Kernel(e.to_string()))?;
    let item = Regex::new(r"'(?:[^']|'')*'|[^\s,()]+")
        .map_err(|e| GateError::Kernel(e.to_string()))?;

    let mut assignments = Vec::new();
    let mut rest = data;

    while let Some(caps) = head.captures(rest) {
        let whole = caps.get(0).map(|m| m.end()).unwrap_or(rest.len());
        if let Some(skipped) = caps.get(0).map(|m| &rest[..m.start()]) {
            if !skipped.trim().is_empty() {
                return Err(GateError::Kernel(format!(
                    "unexpected text '{}'",
                    skipped.trim()
                )));
            }
        }

        let name = caps[1].to_uppercase();
        let append = &caps[2] == "+=";
        let (raw, remaining) = split_value(&rest[whole..], &name)?;
        rest = remaining;

        let value = parse_value(&item, raw, &name)?;
        assignments.push(Assignment {
            name,
            append,
            value,
        });
    }

    if !rest.trim().is_empty() {
        return Err(GateError::Kernel(format!("unexpected text '{}'", rest.trim())));
    }

    Ok(assignments)
}

/// Split the raw value text off the front of `text`
fn split_value<'a>(text: &'a str, name: &str) -> Result<(&'a str, &'a str)> {
    let text = text.trim_start();

    if let Some(body) = text.strip_prefix('(') {
        let mut in_quote = false;
        for (i, c) in body.char_indices() {
            match c {
                '\'' => in_quote = !in_quote,
                ')' if !in_quote => return Ok((&body[..i], &body[i + 1..])),
                _ => {}
            }
        }
        return Err(GateError::Kernel(format!("unterminated list for {}", name)));
    }

    if let Some(body) = text.strip_prefix('\'') {
        // '' inside a string is an escaped quote, so toggle on every quote
        let mut quotes = 1;
        for (i, c) in body.char_indices() {
            if c == '\'' {
                quotes += 1;
            } else if quotes % 2 == 0 {
                return Ok((&text[..i + 1], &body[i..]));
            }
        }
        if quotes % 2 == 0 {
            return Ok((text, ""));
        }
        return Err(GateError::Kernel(format!("unterminated string for {}", name)));
    }

    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    if end == 0 {
        return Err(GateError::Kernel(format!("missing value for {}", name)));
    }
    Ok((&text[..end], &text[end..]))
}

fn parse_value(item: &Regex, raw: &str, name: &str) -> Result<PoolValue> {
    let mut numbers = Vec::new();
    let mut strings = Vec::new();

    for token in item.find_iter(raw).map(|m| m.as_str()) {
        if let Some(quoted) = token.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
            strings.push(quoted.replace("''", "'"));
        } else {
            let number = token
                .replace(['D', 'd'], "E")
                .parse::<f64>()
                .map_err(|_| GateError::Kernel(format!("bad value '{}' for {}", token, name)))?;
            numbers.push(number);
        }
    }

    match (numbers.is_empty(), strings.is_empty()) {
        (false, true) => Ok(PoolValue::Numeric(numbers)),
        (true, false) => Ok(PoolValue::Text(strings)),
        (true, true) => Err(GateError::Kernel(format!("empty value for {}", name))),
        (false, false) => Err(GateError::Kernel(format!("mixed value types for {}", name))),
    }
}

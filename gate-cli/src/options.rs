///! Session options set with `SET` and read with `GET`

use gate_core::GateError;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    ObserverBody,
    ObserverLatitude,
    ObserverLongitude,
    ObserverHeight,
    StarTable,
}

impl OptionKey {
    pub const ALL: [OptionKey; 5] = [
        OptionKey::ObserverBody,
        OptionKey::ObserverLatitude,
        OptionKey::ObserverLongitude,
        OptionKey::ObserverHeight,
        OptionKey::StarTable,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(name))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::ObserverBody => "OBSERVER_BODY",
            OptionKey::ObserverLatitude => "OBSERVER_LATITUDE",
            OptionKey::ObserverLongitude => "OBSERVER_LONGITUDE",
            OptionKey::ObserverHeight => "OBSERVER_HEIGHT",
            OptionKey::StarTable => "STAR_TABLE",
        }
    }

    /// Human readable name used by `GET`
    pub fn label(&self) -> &'static str {
        match self {
            OptionKey::ObserverBody => "Observer body",
            OptionKey::ObserverLatitude => "Observer latitude",
            OptionKey::ObserverLongitude => "Observer longitude",
            OptionKey::ObserverHeight => "Observer height",
            OptionKey::StarTable => "Star table",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            OptionKey::ObserverLatitude | OptionKey::ObserverLongitude | OptionKey::ObserverHeight
        )
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(text) => f.write_str(text),
            OptionValue::Number(value) => write!(f, "{:.6}", value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    values: HashMap<OptionKey, OptionValue>,
}

impl Default for Options {
    fn default() -> Self {
        let mut values = HashMap::new();
        values.insert(OptionKey::ObserverBody, OptionValue::Text("EARTH".to_string()));
        Self { values }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `raw` under `key`. Numeric options are parsed first and a bad
    /// number leaves the previous value in place.
    pub fn set(&mut self, key: OptionKey, raw: &str) -> Result<&OptionValue, GateError> {
        let value = if key.is_numeric() {
            OptionValue::Number(parse_finite(key.label(), raw)?)
        } else {
            OptionValue::Text(raw.to_string())
        };

        self.values.insert(key, value);
        Ok(&self.values[&key])
    }

    pub fn set_number(&mut self, key: OptionKey, value: f64) -> Result<(), GateError> {
        if !value.is_finite() {
            return Err(GateError::invalid_number(key.label(), value.to_string()));
        }
        self.values.insert(key, OptionValue::Number(value));
        Ok(())
    }

    pub fn get(&self, key: OptionKey) -> Option<&OptionValue> {
        self.values.get(&key)
    }

    pub fn text(&self, key: OptionKey) -> Option<&str> {
        match self.values.get(&key)? {
            OptionValue::Text(text) => Some(text),
            OptionValue::Number(_) => None,
        }
    }

    pub fn number(&self, key: OptionKey) -> Option<f64> {
        match self.values.get(&key)? {
            OptionValue::Number(value) => Some(*value),
            OptionValue::Text(_) => None,
        }
    }

    pub fn require_text(&self, key: OptionKey) -> anyhow::Result<&str> {
        self.text(key).ok_or_else(|| missing(key))
    }

    pub fn require_number(&self, key: OptionKey) -> anyhow::Result<f64> {
        self.number(key).ok_or_else(|| missing(key))
    }
}

fn missing(key: OptionKey) -> anyhow::Error {
    anyhow::anyhow!("Option '{}' should not be NULL. Try SET {} <value>?", key, key)
}

/// Parse a real number, rejecting NaN and infinities
pub fn parse_finite(what: &str, raw: &str) -> Result<f64, GateError> {
    match raw.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(GateError::invalid_number(what, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_ignores_case() {
        assert_eq!(OptionKey::parse("observer_latitude"), Some(OptionKey::ObserverLatitude));
        assert_eq!(OptionKey::parse("STAR_TABLE"), Some(OptionKey::StarTable));
        assert_eq!(OptionKey::parse("OBSERVER"), None);
    }

    #[test]
    fn test_observer_body_defaults_to_earth() {
        let options = Options::new();
        assert_eq!(options.text(OptionKey::ObserverBody), Some("EARTH"));
        assert_eq!(options.get(OptionKey::ObserverLatitude), None);
    }

    #[test]
    fn test_bad_number_keeps_previous_value() {
        let mut options = Options::new();
        options.set(OptionKey::ObserverLatitude, "52.1").unwrap();

        let err = options.set(OptionKey::ObserverLatitude, "north").unwrap_err();
        assert!(matches!(err, GateError::InvalidNumericArgument { .. }));
        assert_eq!(options.number(OptionKey::ObserverLatitude), Some(52.1));

        for raw in ["nan", "inf", "-infinity"] {
            let err = options.set(OptionKey::ObserverLatitude, raw).unwrap_err();
            assert_eq!(err.to_string(), format!("Observer latitude '{}' is not a valid number", raw));
        }
        assert_eq!(options.number(OptionKey::ObserverLatitude), Some(52.1));
        assert!(options.set_number(OptionKey::ObserverHeight, f64::NAN).is_err());
        assert!(options.get(OptionKey::ObserverHeight).is_none());
    }

    #[test]
    fn test_missing_option_message() {
        let options = Options::new();
        let err = options.require_number(OptionKey::ObserverLongitude).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Option 'OBSERVER_LONGITUDE' should not be NULL. Try SET OBSERVER_LONGITUDE <value>?"
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(OptionValue::Number(1.5).to_string(), "1.500000");
        assert_eq!(OptionValue::Text("MOON".to_string()).to_string(), "MOON");
    }
}

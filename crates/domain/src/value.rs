//! Channel value — the wire vocabulary exchanged with the session service.

use serde::{Deserialize, Serialize};

use crate::relay::RelayState;

/// A value carried on a channel.
///
/// Switch channels use integers (`0`/`1`), telemetry uses floats, and status
/// channels carry free-form text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ChannelValue {
    /// Parse an inbound payload leniently: integer, then float, then text.
    #[must_use]
    pub fn parse(payload: &str) -> Self {
        let trimmed = payload.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            Self::Int(int)
        } else if let Ok(float) = trimmed.parse::<f64>() {
            Self::Float(float)
        } else {
            Self::Text(payload.to_string())
        }
    }

    /// Interpret this value as a relay switch command, if numeric.
    #[must_use]
    pub fn as_switch(&self) -> Option<RelayState> {
        match self {
            Self::Int(int) => Some(RelayState::from_switch(*int)),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(float) if float.is_finite() => {
                Some(RelayState::from_switch(*float as i64))
            }
            _ => None,
        }
    }

    /// Whether this value asserts a one-shot trigger.
    ///
    /// The loop's own "clear" republish (`0`) must not re-fire the trigger.
    #[must_use]
    pub fn is_asserted(&self) -> bool {
        self.as_switch().is_some_and(RelayState::is_on)
    }
}

impl From<RelayState> for ChannelValue {
    fn from(state: RelayState) -> Self {
        Self::Int(state.as_switch())
    }
}

impl std::fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(int) => write!(f, "{int}"),
            Self::Float(float) => write!(f, "{float}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_integer_payload() {
        assert_eq!(ChannelValue::parse("1"), ChannelValue::Int(1));
        assert_eq!(ChannelValue::parse(" 0 "), ChannelValue::Int(0));
    }

    #[test]
    fn should_parse_float_payload() {
        assert_eq!(ChannelValue::parse("27.5"), ChannelValue::Float(27.5));
    }

    #[test]
    fn should_fall_back_to_text_payload() {
        assert_eq!(
            ChannelValue::parse("High Temp"),
            ChannelValue::Text("High Temp".to_string())
        );
    }

    #[test]
    fn should_interpret_integers_as_switch_commands() {
        assert_eq!(ChannelValue::Int(0).as_switch(), Some(RelayState::Off));
        assert_eq!(ChannelValue::Int(1).as_switch(), Some(RelayState::On));
    }

    #[test]
    fn should_interpret_floats_as_switch_commands() {
        assert_eq!(ChannelValue::Float(1.0).as_switch(), Some(RelayState::On));
        assert_eq!(ChannelValue::Float(0.0).as_switch(), Some(RelayState::Off));
    }

    #[test]
    fn should_not_interpret_text_as_switch_command() {
        assert_eq!(
            ChannelValue::Text("on".to_string()).as_switch(),
            None
        );
    }

    #[test]
    fn should_assert_trigger_only_on_truthy_values() {
        assert!(ChannelValue::Int(1).is_asserted());
        assert!(!ChannelValue::Int(0).is_asserted());
        assert!(!ChannelValue::Text("1".to_string()).is_asserted());
    }

    #[test]
    fn should_convert_relay_state_to_switch_value() {
        assert_eq!(ChannelValue::from(RelayState::On), ChannelValue::Int(1));
        assert_eq!(ChannelValue::from(RelayState::Off), ChannelValue::Int(0));
    }

    #[test]
    fn should_display_values_as_plain_payloads() {
        assert_eq!(ChannelValue::Int(42).to_string(), "42");
        assert_eq!(ChannelValue::Float(27.5).to_string(), "27.5");
        assert_eq!(
            ChannelValue::Text("Online".to_string()).to_string(),
            "Online"
        );
    }
}

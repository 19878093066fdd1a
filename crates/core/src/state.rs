use serde::{Deserialize, Serialize};

/// Lifecycle of the master enable switch.
///
/// Persisted as `toggleState: bool`; a missing key is [`MasterState::Uninitialized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MasterState {
    /// `toggleState` has never been written (first run).
    #[default]
    Uninitialized,
    Enabled,
    Disabled,
}

impl MasterState {
    /// Decode the stored `toggleState` value.  Anything that is not a JSON
    /// boolean counts as never initialized.
    pub fn from_stored(value: Option<&serde_json::Value>) -> Self {
        match value.and_then(serde_json::Value::as_bool) {
            Some(true) => Self::Enabled,
            Some(false) => Self::Disabled,
            None => Self::Uninitialized,
        }
    }

    /// Target of a power-control click.  An uninitialized switch flips to enabled.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Enabled => Self::Disabled,
            Self::Disabled | Self::Uninitialized => Self::Enabled,
        }
    }

    #[inline]
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

/// Direction of a theme stepper click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Next,
    Previous,
}

impl Step {
    /// Signed index delta: `+1` for next, `-1` for previous.
    #[inline]
    pub fn delta(self) -> i64 {
        match self {
            Self::Next => 1,
            Self::Previous => -1,
        }
    }
}

/// Visual state of one feature toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ControlState {
    /// Rendered as "on" (`toggled`).
    pub on: bool,
    /// Accepts input.
    pub enabled: bool,
}

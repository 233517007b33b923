// controller.rs — controller kinds and the shared enable/disable guard

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerType {
    Pointer,
    Keyboard,
    Gyroscope,
}

impl ControllerType {
    pub fn as_str(self) -> &'static str {
        match self {
            ControllerType::Pointer => "pointer",
            ControllerType::Keyboard => "keyboard",
            ControllerType::Gyroscope => "gyroscope",
        }
    }
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControllerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pointer" => Ok(ControllerType::Pointer),
            "keyboard" => Ok(ControllerType::Keyboard),
            "gyroscope" => Ok(ControllerType::Gyroscope),
            other => Err(Error::UnknownControllerType(other.to_string())),
        }
    }
}

/// Whether a controller may change its enabled state.
///
/// `controllers_enabled` is the viewer-wide switch, `config_enabled` the
/// per-instance flag from configuration. Both must be on.
pub fn guard(controllers_enabled: bool, config_enabled: bool) -> bool {
    controllers_enabled && config_enabled
}

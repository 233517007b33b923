// config.rs — controller and view configuration
//
// Both structs are resolved once at startup from JSON. Angles in view
// configuration are written in degrees and converted when the view is built.

use serde::{Deserialize, Deserializer};

use crate::controller::ControllerType;
use crate::error::Result;

/// One controller instance as written in the viewer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ControllerConfig {
    #[serde(rename = "type")]
    pub kind: ControllerType,
    #[serde(default)]
    pub uid: String,
    /// Anything other than a JSON `true` (missing, null, "yes", 1) reads as `false`.
    #[serde(default, deserialize_with = "strict_true")]
    pub enabled: bool,
}

impl ControllerConfig {
    pub fn new(kind: ControllerType, uid: impl Into<String>, enabled: bool) -> Self {
        Self {
            kind,
            uid: uid.into(),
            enabled,
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

fn strict_true<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(false))
}

/// Projection selection plus optional overrides of its angular limits.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub fov_min: Option<f32>,
    pub fov_max: Option<f32>,
    pub yaw_min: Option<f32>,
    pub yaw_max: Option<f32>,
    pub pitch_min: Option<f32>,
    pub pitch_max: Option<f32>,
    pub projection_scale: Option<f32>,
}

impl ViewConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_must_be_a_real_boolean() {
        let on = ControllerConfig::from_json(r#"{"type":"gyroscope","uid":"g","enabled":true}"#).unwrap();
        assert!(on.enabled);
        assert_eq!(on.uid, "g");
        assert_eq!(on.kind, ControllerType::Gyroscope);

        for raw in [
            r#"{"type":"gyroscope","uid":"g"}"#,
            r#"{"type":"gyroscope","uid":"g","enabled":null}"#,
            r#"{"type":"gyroscope","uid":"g","enabled":"true"}"#,
            r#"{"type":"gyroscope","uid":"g","enabled":1}"#,
            r#"{"type":"gyroscope","uid":"g","enabled":false}"#,
        ] {
            assert!(!ControllerConfig::from_json(raw).unwrap().enabled, "{raw}");
        }
    }

    #[test]
    fn unknown_controller_type_is_rejected() {
        assert!(ControllerConfig::from_json(r#"{"type":"joystick","enabled":true}"#).is_err());
    }

    #[test]
    fn view_config_reads_camel_case_limits() {
        let config = ViewConfig::from_json(
            r#"{"type":"rectilinear","fovMin":40,"fovMax":140,"pitchMin":null,"projectionScale":1.5}"#,
        )
        .unwrap();
        assert_eq!(config.kind, "rectilinear");
        assert_eq!(config.fov_min, Some(40.0));
        assert_eq!(config.fov_max, Some(140.0));
        assert_eq!(config.pitch_min, None);
        assert_eq!(config.yaw_max, None);
        assert_eq!(config.projection_scale, Some(1.5));
    }
}

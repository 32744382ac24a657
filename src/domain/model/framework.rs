//! Supported ML frameworks

use serde::{Deserialize, Serialize};

/// Closed set of frameworks a model can be registered under.
///
/// Fixed at creation; unknown values are rejected at the API boundary
/// rather than stored as open strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Sklearn,
    Tensorflow,
    Pytorch,
    Xgboost,
    Lightgbm,
    Onnx,
    Other,
}

impl Framework {
    pub const ALL: [Framework; 7] = [
        Framework::Sklearn,
        Framework::Tensorflow,
        Framework::Pytorch,
        Framework::Xgboost,
        Framework::Lightgbm,
        Framework::Onnx,
        Framework::Other,
    ];
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Framework::Sklearn => "sklearn",
            Framework::Tensorflow => "tensorflow",
            Framework::Pytorch => "pytorch",
            Framework::Xgboost => "xgboost",
            Framework::Lightgbm => "lightgbm",
            Framework::Onnx => "onnx",
            Framework::Other => "other",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_round_trip() {
        for framework in Framework::ALL {
            let json = serde_json::to_string(&framework).unwrap();
            assert_eq!(json, format!("\"{}\"", framework));
            let back: Framework = serde_json::from_str(&json).unwrap();
            assert_eq!(back, framework);
        }
    }

    #[test]
    fn test_unknown_framework_rejected() {
        assert!(serde_json::from_str::<Framework>("\"keras\"").is_err());
    }
}

// ============================================================
// Layer 3: Execution Mode
// ============================================================
// Train/eval is passed explicitly into every forward call
// instead of living as a mutable flag inside the modules.
//
// What changes between the two modes:
//   - projector dropout:      active in Train, identity in Eval
//   - attention dropout:      active in Train, identity in Eval
//   - batch normalisation:    batch statistics in Train,
//                             running statistics in Eval
//   - probability head drop:  active in BOTH unless the config
//                             sets gate_head_dropout = true

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Train,
    #[default]
    Eval,
}

impl Mode {
    pub fn is_training(self) -> bool {
        matches!(self, Mode::Train)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Train => write!(f, "train"),
            Mode::Eval  => write!(f, "eval"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_train_is_training() {
        assert!(Mode::Train.is_training());
        assert!(!Mode::Eval.is_training());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Train).unwrap(), "\"train\"");
        assert_eq!(serde_json::from_str::<Mode>("\"eval\"").unwrap(), Mode::Eval);
        assert_eq!(Mode::Eval.to_string(), "eval");
    }
}

use serde::{Deserialize, Serialize};

/// Sentiment assigned to a single headline.
///
/// The classifier emits integer class codes; [`Label::from_code`] maps them
/// onto this domain. The mapping is a training-time convention and any code
/// outside it becomes [`Label::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Pessimistic,
    Neutral,
    Optimistic,
    /// Fallback for class codes with no sentiment mapping.
    #[serde(other)]
    Unknown,
}

impl Label {
    /// All labels in display order.
    pub const ALL: [Label; 4] = [
        Label::Pessimistic,
        Label::Neutral,
        Label::Optimistic,
        Label::Unknown,
    ];

    /// Map a classifier output code to a label.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Label::Pessimistic,
            1 => Label::Neutral,
            2 => Label::Optimistic,
            _ => Label::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Pessimistic => "Pessimistic",
            Label::Neutral => "Neutral",
            Label::Optimistic => "Optimistic",
            Label::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_sentiments() {
        assert_eq!(Label::from_code(0), Label::Pessimistic);
        assert_eq!(Label::from_code(1), Label::Neutral);
        assert_eq!(Label::from_code(2), Label::Optimistic);
    }

    #[test]
    fn codes_outside_mapping_are_unknown() {
        for code in [-1, 3, 7, i64::MAX, i64::MIN] {
            assert_eq!(Label::from_code(code), Label::Unknown, "code {code}");
        }
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&Label::Optimistic).unwrap();
        assert_eq!(json, "\"Optimistic\"");
    }

    #[test]
    fn unrecognised_string_deserializes_as_unknown() {
        let label: Label = serde_json::from_str("\"Bullish\"").unwrap();
        assert_eq!(label, Label::Unknown);
    }

    #[test]
    fn display_matches_wire_name() {
        for label in Label::ALL {
            let wire = serde_json::to_string(&label).unwrap();
            assert_eq!(wire.trim_matches('"'), label.to_string());
        }
    }
}

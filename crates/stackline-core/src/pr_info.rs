use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrState {
    Open,
    Draft,
    Merged,
    Closed,
    #[default]
    Unknown,
}

impl PrState {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Self::Open,
            "DRAFT" => Self::Draft,
            "MERGED" => Self::Merged,
            "CLOSED" => Self::Closed,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Open => Some("open"),
            Self::Draft => Some("draft"),
            Self::Merged => Some("merged"),
            Self::Closed => Some("closed"),
            Self::Unknown => None,
        }
    }
}

/// Pull-request identity attached to a branch. `number == 0` means no PR is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrInfo {
    pub number: u64,
    pub state: PrState,
}

impl PrInfo {
    pub fn is_known(&self) -> bool {
        self.number != 0
    }

    /// Short form used in the tree, e.g. `#142 open` or `#7` for unknown states.
    pub fn badge(&self) -> Option<String> {
        if !self.is_known() {
            return None;
        }

        Some(match self.state.label() {
            Some(label) => format!("#{} {label}", self.number),
            None => format!("#{}", self.number),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrInfoJson {
    #[serde(default)]
    pr_number: u64,
    #[serde(default)]
    state: String,
}

/// Parses `gt branch pr-info` JSON. Empty or malformed output yields the zero value.
pub fn parse_pr_info(raw: &str) -> PrInfo {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return PrInfo::default();
    }

    match serde_json::from_str::<PrInfoJson>(trimmed) {
        Ok(parsed) => PrInfo {
            number: parsed.pr_number,
            state: PrState::parse(&parsed.state),
        },
        Err(_) => PrInfo::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_number_and_state() {
        let info = parse_pr_info(r#"{"prNumber": 142, "state": "OPEN", "title": "Add stuff"}"#);
        assert_eq!(
            info,
            PrInfo {
                number: 142,
                state: PrState::Open
            }
        );
    }

    #[test]
    fn empty_and_malformed_output_is_zero_value() {
        assert_eq!(parse_pr_info(""), PrInfo::default());
        assert_eq!(parse_pr_info("   \n"), PrInfo::default());
        assert_eq!(parse_pr_info("not json"), PrInfo::default());
        assert_eq!(parse_pr_info(r#"{"prNumber": "x"}"#), PrInfo::default());
    }

    #[test]
    fn missing_state_is_unknown() {
        let info = parse_pr_info(r#"{"prNumber": 9}"#);
        assert_eq!(info.number, 9);
        assert_eq!(info.state, PrState::Unknown);
        assert_eq!(info.badge().as_deref(), Some("#9"));
    }

    #[test]
    fn state_parsing_is_case_insensitive() {
        assert_eq!(PrState::parse("draft"), PrState::Draft);
        assert_eq!(PrState::parse("Merged"), PrState::Merged);
        assert_eq!(PrState::parse(" CLOSED "), PrState::Closed);
        assert_eq!(PrState::parse("weird"), PrState::Unknown);
    }

    #[test]
    fn badge_is_absent_without_pr() {
        assert_eq!(PrInfo::default().badge(), None);
        let info = PrInfo {
            number: 143,
            state: PrState::Draft,
        };
        assert_eq!(info.badge().as_deref(), Some("#143 draft"));
    }
}

/// Readiness states a category page moves through while rendering
use crate::ScrapeError;
use std::fmt;

/// Represents how far a category page has progressed towards extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderState {
    /// Browser has navigated to the page
    Loaded,

    /// Cookie consent overlay dismissed, or found absent
    ConsentChecked,

    /// Load-more control exhausted, or found absent
    Expanded,

    /// Products parsed from the page (terminal)
    Extracted,
}

impl RenderState {
    /// Returns the state that follows this one, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Loaded => Some(Self::ConsentChecked),
            Self::ConsentChecked => Some(Self::Expanded),
            Self::Expanded => Some(Self::Extracted),
            Self::Extracted => None,
        }
    }

    /// Returns true if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Extracted)
    }

    /// Only single forward steps are allowed
    pub fn can_transition_to(&self, to: Self) -> bool {
        self.next() == Some(to)
    }

    /// Moves to `to`, failing on anything but the next state
    pub fn transition(self, to: Self) -> Result<Self, ScrapeError> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(ScrapeError::InvalidTransition { from: self, to })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loaded => "loaded",
            Self::ConsentChecked => "consent_checked",
            Self::Expanded => "expanded",
            Self::Extracted => "extracted",
        }
    }
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

use serde::{Deserialize, Serialize};

/// A directional action the vehicle understands.
///
/// Locomotion consumes actions, never raw key events, so keyboard, gamepad or
/// scripted input all drive the same integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Thrust along the heading (Model A) or toward the top of the screen (Model B).
    Forward,
    /// Brake (Model A) or thrust toward the bottom of the screen (Model B).
    Back,
    /// Steer left / thrust left.
    Left,
    /// Steer right / thrust right.
    Right,
}

impl Action {
    pub const COUNT: usize = 4;
    pub const ALL: [Action; Self::COUNT] = [Action::Forward, Action::Back, Action::Left, Action::Right];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Action::Forward => "forward",
            Action::Back => "back",
            Action::Left => "left",
            Action::Right => "right",
        }
    }

    /// Resolve an action name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name.trim()))
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

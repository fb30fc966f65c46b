use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::state::InputState;

/// Maps raw key names (as reported by the windowing layer) to actions.
///
/// Key names are compared case-insensitively. The default layout binds WASD
/// and the arrow keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    keys: BTreeMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind("w", Action::Forward);
        bindings.bind("s", Action::Back);
        bindings.bind("a", Action::Left);
        bindings.bind("d", Action::Right);
        bindings.bind("arrowup", Action::Forward);
        bindings.bind("arrowdown", Action::Back);
        bindings.bind("arrowleft", Action::Left);
        bindings.bind("arrowright", Action::Right);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, key: &str, action: Action) {
        self.keys.insert(key.to_ascii_lowercase(), action);
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.keys.get(&key.to_ascii_lowercase()).copied()
    }

    /// Apply a key transition to `state`. Returns whether the key was bound.
    pub fn apply(&self, state: &mut InputState, key: &str, pressed: bool) -> bool {
        match self.action_for(key) {
            Some(action) => {
                state.set(action, pressed);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

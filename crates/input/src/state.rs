use crate::action::Action;

/// Snapshot of which actions are currently held.
///
/// Passed by reference into the integrator every tick; there is no ambient
/// global key table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; Action::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with the given actions held.
    pub fn holding(actions: &[Action]) -> Self {
        let mut state = Self::new();
        for &action in actions {
            state.set(action, true);
        }
        state
    }

    pub fn set(&mut self, action: Action, held: bool) {
        self.held[action.index()] = held;
    }

    /// Set an action by name. Returns `false` and leaves the state untouched
    /// when the name is not a known action.
    pub fn set_named(&mut self, name: &str, held: bool) -> bool {
        match Action::from_name(name) {
            Some(action) => {
                self.set(action, held);
                true
            }
            None => {
                tracing::trace!(name, "ignoring unknown action");
                false
            }
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Unknown names are reported as not held.
    pub fn is_named_held(&self, name: &str) -> bool {
        Action::from_name(name).is_some_and(|a| self.is_held(a))
    }

    pub fn any_held(&self) -> bool {
        self.held.iter().any(|&h| h)
    }

    /// Actions currently held, in declaration order.
    pub fn held_actions(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.is_held(*a))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

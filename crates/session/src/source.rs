use oceanspace_input::InputState;

/// Supplies the input snapshot for each tick.
pub trait InputSource {
    fn poll(&mut self, tick: u64) -> InputState;
}

/// A fixed snapshot: the same keys held for every tick.
impl InputSource for InputState {
    fn poll(&mut self, _tick: u64) -> InputState {
        *self
    }
}

/// Scripted input, e.g. `|tick| if tick < 10 { forward } else { idle }`.
impl<F> InputSource for F
where
    F: FnMut(u64) -> InputState,
{
    fn poll(&mut self, tick: u64) -> InputState {
        self(tick)
    }
}

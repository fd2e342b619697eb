//! Per-tick snapshot of the keys the simulation cares about.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
    pub jump: bool,
    pub quit: bool,
    pub escape: bool,
}

impl InputSnapshot {
    pub fn wants_exit(&self) -> bool {
        self.quit || self.escape
    }
}

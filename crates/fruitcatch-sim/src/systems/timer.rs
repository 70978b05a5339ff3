//! Timer system: feeds frame time into the session countdown.

use crate::session::SessionState;

pub fn run(state: &mut SessionState, dt: f64) {
    state.tick_time(dt);
}

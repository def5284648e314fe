//! Identify blink animation.
//!
//! Protocol-triggered "show yourself" pattern: 3 groups of 2 on/off
//! toggles with 100 ms holds, each group followed by a 250 ms pause
//! (including the last one), then the lamp is driven back to whatever
//! state the controller holds at that moment.
//!
//! The sequence itself is a pure state machine emitting [`BlinkAction`]s,
//! so tests can assert the exact pattern without sleeping; the runner
//! executes the actions against the lamp controller and a [`Delay`].

use crate::app::lamp::LampController;
use crate::app::ports::Delay;

/// Blink groups per animation.
pub const BLINK_GROUPS: u8 = 3;
/// On/off toggles per group.
pub const TOGGLES_PER_GROUP: u8 = 2;
/// Hold time for each on and each off level within a toggle.
pub const HOLD_MS: u32 = 100;
/// Pause after each group.
pub const PAUSE_MS: u32 = 250;

/// One step of the animation, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkAction {
    /// Drive the lamp pin transiently (state not persisted).
    Drive(bool),
    /// Suspend for the given number of milliseconds.
    Wait(u32),
    /// Drive the pin back to the controller's current stored state.
    Restore,
}

/// Animation phases. `Blinking.step` counts the four sub-actions of each
/// toggle (on, hold, off, hold).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    Blinking { group: u8, step: u8 },
    Pausing { group: u8 },
    Restoring,
    Done,
}

const STEPS_PER_GROUP: u8 = TOGGLES_PER_GROUP * 4;

/// The identify animation state machine.
pub struct IdentifyAnimation {
    phase: BlinkPhase,
}

impl IdentifyAnimation {
    pub fn new() -> Self {
        Self {
            phase: BlinkPhase::Blinking { group: 0, step: 0 },
        }
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// Advance one step. `None` once the animation is done.
    pub fn next_action(&mut self) -> Option<BlinkAction> {
        match self.phase {
            BlinkPhase::Blinking { group, step } => {
                let action = match step % 4 {
                    0 => BlinkAction::Drive(true),
                    2 => BlinkAction::Drive(false),
                    _ => BlinkAction::Wait(HOLD_MS),
                };
                let next = step + 1;
                self.phase = if next == STEPS_PER_GROUP {
                    BlinkPhase::Pausing { group }
                } else {
                    BlinkPhase::Blinking { group, step: next }
                };
                Some(action)
            }
            BlinkPhase::Pausing { group } => {
                // The pause after the final group is still executed.
                self.phase = if group + 1 == BLINK_GROUPS {
                    BlinkPhase::Restoring
                } else {
                    BlinkPhase::Blinking {
                        group: group + 1,
                        step: 0,
                    }
                };
                Some(BlinkAction::Wait(PAUSE_MS))
            }
            BlinkPhase::Restoring => {
                self.phase = BlinkPhase::Done;
                Some(BlinkAction::Restore)
            }
            BlinkPhase::Done => None,
        }
    }
}

impl Default for IdentifyAnimation {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute a full animation against the lamp. Runs to completion; there is
/// no cancellation path.
pub fn run_animation(lamp: &LampController, delay: &dyn Delay) {
    let mut animation = IdentifyAnimation::new();
    while let Some(action) = animation.next_action() {
        match action {
            BlinkAction::Drive(level) => lamp.pulse(level),
            BlinkAction::Wait(ms) => delay.sleep_ms(ms),
            BlinkAction::Restore => lamp.restore(),
        }
    }
}

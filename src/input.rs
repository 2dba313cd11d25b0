//! Logical input state fed by whatever owns the window.
//!
//! Physical keys are mapped to [`Action`]s by the caller, the simulation only asks whether an action started this tick.

use glam::DVec2;
use hashbrown::HashMap;

/// Logical actions the simulation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Action {
    /// Append a new segment to the tail.
    Grow,
    /// Stop running frames.
    Exit,
}

/// Any button state.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ButtonState {
    /// Whether the button is being held down this update tick.
    is_down: bool,
    /// Whether the button was being held down the previous update tick.
    was_down_previous_tick: bool,
}

impl ButtonState {
    /// Create a new state.
    pub(crate) const fn new(is_down: bool) -> Self {
        let was_down_previous_tick = false;

        Self {
            is_down,
            was_down_previous_tick,
        }
    }

    /// Handle the state if the button is currently pressed.
    pub(crate) fn handle_event(&mut self, pressed: bool) {
        self.is_down = pressed;
    }

    /// Handle the state changes using the update tick to respond to changes.
    pub(crate) fn update(&mut self) {
        self.was_down_previous_tick = self.is_down;
    }

    /// Whether the button is being pressed now.
    pub(crate) const fn held(&self) -> bool {
        self.is_down
    }

    /// Whether the button goes from released to pressed.
    pub(crate) const fn pressed(&self) -> bool {
        !self.was_down_previous_tick && self.is_down
    }

    /// Whether the button goes from pressed to released.
    pub(crate) const fn released(&self) -> bool {
        self.was_down_previous_tick && !self.is_down
    }
}

/// Manager for the input the simulation needs.
#[derive(Debug, Default)]
pub struct Input {
    /// Pointer position in world space.
    ///
    /// `None` if not known yet or outside of the drawable area.
    pointer: Option<DVec2>,
    /// All action states.
    actions: HashMap<Action, ButtonState>,
}

impl Input {
    /// Setup the input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether an action is currently active.
    ///
    /// # Arguments
    ///
    /// * `action` - Logical action the physical input is mapped to.
    /// * `is_down` - `true` while the key or button is held.
    #[inline]
    pub fn handle_action(&mut self, action: Action, is_down: bool) {
        if let Some(state) = self.actions.get_mut(&action) {
            // Action already registered, update the state
            state.handle_event(is_down);
        } else {
            // Action not found, register it
            self.actions.insert(action, ButtonState::new(is_down));
        }
    }

    /// Set the pointer position in world space.
    #[inline]
    pub fn set_pointer(&mut self, pointer: impl Into<DVec2>) {
        self.pointer = Some(pointer.into());
    }

    /// Forget the pointer, for example when it left the window.
    #[inline]
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Update all registered actions.
    ///
    /// Only allowed to be called once per update tick, after the tick handled the input.
    #[inline]
    pub fn update(&mut self) {
        // Update all states, needed to handle "pressed" and "released"
        self.actions.values_mut().for_each(ButtonState::update);
    }

    /// Pointer position if known.
    #[inline]
    #[must_use]
    pub const fn pointer(&self) -> Option<DVec2> {
        self.pointer
    }

    /// Whether the action started this tick.
    #[inline]
    #[must_use]
    pub fn pressed(&self, action: Action) -> bool {
        self.actions.get(&action).is_some_and(ButtonState::pressed)
    }

    /// Whether the action stopped this tick.
    #[inline]
    #[must_use]
    pub fn released(&self, action: Action) -> bool {
        self.actions.get(&action).is_some_and(ButtonState::released)
    }

    /// Whether the action is active.
    #[inline]
    #[must_use]
    pub fn held(&self, action: Action) -> bool {
        self.actions.get(&action).is_some_and(ButtonState::held)
    }

    /// Whether a new segment was requested this tick.
    ///
    /// Holding the action only counts once.
    #[inline]
    #[must_use]
    pub fn growth_requested(&self) -> bool {
        self.pressed(Action::Grow)
    }
}

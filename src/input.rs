use std::collections::HashMap;

/// The logical actions the simulation reads. Mapping physical keys or pads onto these is the
/// business of whoever polls the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Run,
    Quit,
    Pause,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Run,
        Action::Quit,
        Action::Pause,
    ];

    pub fn from_name(name: &str) -> Option<Action> {
        match name {
            "left" => Some(Action::MoveLeft),
            "right" => Some(Action::MoveRight),
            "jump" => Some(Action::Jump),
            "run" => Some(Action::Run),
            "quit" => Some(Action::Quit),
            "pause" => Some(Action::Pause),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Down,
    Released,
    Up,
}

impl Default for ButtonState {
    fn default() -> Self {
        ButtonState::Up
    }
}

impl ButtonState {
    fn transition(&self, down: bool) -> ButtonState {
        if down {
            match self {
                ButtonState::Pressed => ButtonState::Down,
                ButtonState::Down => ButtonState::Down,
                ButtonState::Released => ButtonState::Pressed,
                ButtonState::Up => ButtonState::Pressed,
            }
        } else {
            match self {
                ButtonState::Pressed => ButtonState::Released,
                ButtonState::Down => ButtonState::Released,
                ButtonState::Released => ButtonState::Up,
                ButtonState::Up => ButtonState::Up,
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ButtonState::Pressed | ButtonState::Down)
    }
}

/// Instantaneous state of every logical action, advanced once per frame.
#[derive(Debug, Clone)]
pub struct InputState {
    buttons: HashMap<Action, ButtonState>,
}

impl Default for InputState {
    fn default() -> Self {
        let mut buttons = HashMap::new();
        for action in Action::ALL.iter() {
            buttons.insert(*action, ButtonState::default());
        }
        Self { buttons }
    }
}

impl InputState {
    pub fn get_button_state(&self, action: Action) -> ButtonState {
        self.buttons.get(&action).copied().unwrap_or_default()
    }

    pub fn is_active(&self, action: Action) -> bool {
        self.get_button_state(action).is_active()
    }

    /// Feed the physical up/down state of an action for this frame.
    pub fn set_down(&mut self, action: Action, down: bool) {
        let new_state = self.get_button_state(action).transition(down);
        self.buttons.insert(action, new_state);
    }

    /// Advances every action to this frame's state given the set of actions currently held.
    pub fn update(&mut self, held: &[Action]) {
        for action in Action::ALL.iter() {
            self.set_down(*action, held.contains(action));
        }
    }

    /// -1 for left, +1 for right, 0 if both or neither are held.
    pub fn horizontal_axis(&self) -> i32 {
        input_accumulator(
            &self.get_button_state(Action::MoveLeft),
            &self.get_button_state(Action::MoveRight),
        )
    }
}

/// Folds a negative/positive button pair (e.g., left/right) into -1 for negative, +1 for
/// positive, and 0 if both or none are pressed.
pub fn input_accumulator(negative: &ButtonState, positive: &ButtonState) -> i32 {
    let mut acc = 0;
    if negative.is_active() {
        acc -= 1;
    }
    if positive.is_active() {
        acc += 1;
    }
    acc
}

use box_engine::{keys, Entity, InputEvent};
use serde::Deserialize;

/// Logical actions the player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Back,
    Left,
    Right,
    Jump,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Forward,
        Action::Back,
        Action::Left,
        Action::Right,
        Action::Jump,
    ];

    fn index(self) -> usize {
        match self {
            Action::Forward => 0,
            Action::Back => 1,
            Action::Left => 2,
            Action::Right => 3,
            Action::Jump => 4,
        }
    }
}

/// DOM key codes bound to each action. A key may appear under several actions;
/// the first match in `Action::ALL` order wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Vec<u32>,
    pub back: Vec<u32>,
    pub left: Vec<u32>,
    pub right: Vec<u32>,
    pub jump: Vec<u32>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: vec![keys::W, keys::ARROW_UP],
            back: vec![keys::S, keys::ARROW_DOWN],
            left: vec![keys::A, keys::ARROW_LEFT],
            right: vec![keys::D, keys::ARROW_RIGHT],
            jump: vec![keys::SPACE],
        }
    }
}

impl KeyBindings {
    fn codes(&self, action: Action) -> &[u32] {
        match action {
            Action::Forward => &self.forward,
            Action::Back => &self.back,
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Jump => &self.jump,
        }
    }

    /// Action bound to a key code, if any.
    pub fn action(&self, key_code: u32) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&action| self.codes(action).contains(&key_code))
    }
}

/// Player-facing movement tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub move_speed: f32,
    pub jump_impulse: f32,
    pub jump_ceiling: f32,
}

/// Tracks held keys and the most recent press, and turns them into player velocity.
///
/// Resolution is last-key-wins: only the most recently pressed movement key
/// drives the player, and only while it is still held.
#[derive(Debug, Clone)]
pub struct InputController {
    bindings: KeyBindings,
    motion: Motion,
    pressed: [bool; 5],
    last_pressed: Option<Action>,
}

impl InputController {
    pub fn new(bindings: KeyBindings, motion: Motion) -> Self {
        Self {
            bindings,
            motion,
            pressed: [false; 5],
            last_pressed: None,
        }
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    pub fn last_pressed(&self) -> Option<Action> {
        self.last_pressed
    }

    /// Route a raw input event. Non-keyboard and unbound keys are ignored.
    pub fn handle(&mut self, event: &InputEvent, player: &mut Entity) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                if let Some(action) = self.bindings.action(key_code) {
                    self.press(action, player);
                }
            }
            InputEvent::KeyUp { key_code } => {
                if let Some(action) = self.bindings.action(key_code) {
                    self.release(action, player);
                }
            }
            InputEvent::Custom { .. } => {}
        }
    }

    pub fn press(&mut self, action: Action, player: &mut Entity) {
        if action == Action::Jump {
            // Descending players cannot jump (no air jumps)
            if player.vel.y < 0.0 {
                return;
            }
            if player.pos.y < self.motion.jump_ceiling {
                player.vel.y = self.motion.jump_impulse;
            }
        }
        self.pressed[action.index()] = true;
        self.last_pressed = Some(action);
    }

    /// Releasing a movement key stops that axis at once.
    pub fn release(&mut self, action: Action, player: &mut Entity) {
        self.pressed[action.index()] = false;
        match action {
            Action::Forward | Action::Back => player.vel.z = 0.0,
            Action::Left | Action::Right => player.vel.x = 0.0,
            Action::Jump => {}
        }
    }

    /// Apply the held, most recently pressed movement key to the player.
    pub fn resolve(&self, player: &mut Entity) {
        let Some(action) = self.last_pressed else {
            return;
        };
        if !self.is_pressed(action) {
            return;
        }
        let speed = self.motion.move_speed;
        match action {
            Action::Forward => player.vel.z = -speed,
            Action::Back => player.vel.z = speed,
            Action::Left => player.vel.x = -speed,
            Action::Right => player.vel.x = speed,
            Action::Jump => {}
        }
    }
}

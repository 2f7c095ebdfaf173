//! Input module - key bindings, MovementKeys resource, and jump edge messages

use bevy::prelude::*;

use crate::tuning::BallTweaks;

/// Named controls the ball responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Leftward,
    Rightward,
    Jump,
}

/// Fixed key-to-action table
pub const KEY_BINDINGS: [(KeyCode, Action); 5] = [
    (KeyCode::KeyW, Action::Forward),
    (KeyCode::KeyS, Action::Backward),
    (KeyCode::KeyA, Action::Leftward),
    (KeyCode::KeyD, Action::Rightward),
    (KeyCode::Space, Action::Jump),
];

pub fn action_for_key(key: KeyCode) -> Option<Action> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, action)| *action)
}

/// Held state of the four directional controls, overwritten every frame
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub leftward: bool,
    pub rightward: bool,
}

impl MovementKeys {
    /// Mark a directional action as held. `Action::Jump` is ignored.
    pub fn press(&mut self, action: Action) {
        match action {
            Action::Forward => self.forward = true,
            Action::Backward => self.backward = true,
            Action::Leftward => self.leftward = true,
            Action::Rightward => self.rightward = true,
            Action::Jump => {}
        }
    }

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.leftward || self.rightward
    }
}

/// Rising-edge detector for the jump control
#[derive(Resource, Default, Debug)]
pub struct JumpEdge {
    held: bool,
}

impl JumpEdge {
    /// Feed the current pressed state. Returns true only on a released -> pressed transition.
    pub fn update(&mut self, pressed: bool) -> bool {
        let rising = pressed && !self.held;
        self.held = pressed;
        rising
    }
}

/// Written once per jump key press (not per frame while held)
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpPressed;

/// Runs first in Update: samples the keyboard through `KEY_BINDINGS`.
pub fn capture_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    tweaks: Res<BallTweaks>,
    mut keys: ResMut<MovementKeys>,
    mut jump_edge: ResMut<JumpEdge>,
    mut jumps: MessageWriter<JumpPressed>,
) {
    let mut sampled = MovementKeys::default();
    let mut jump_held = false;

    for action in keyboard.get_pressed().filter_map(|key| action_for_key(*key)) {
        match action {
            Action::Jump => jump_held = true,
            _ => sampled.press(action),
        }
    }

    let rising = jump_edge.update(jump_held);

    // Tweak panel uses the keyboard; keep edge state current but don't act on it
    if tweaks.panel_visible {
        *keys = MovementKeys::default();
        return;
    }

    *keys = sampled;
    if rising {
        debug!("Jump pressed");
        jumps.write(JumpPressed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct JumpCount(usize);

    fn count_jumps(mut reader: MessageReader<JumpPressed>, mut count: ResMut<JumpCount>) {
        count.0 += reader.read().count();
    }

    fn input_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<JumpPressed>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<BallTweaks>()
            .init_resource::<MovementKeys>()
            .init_resource::<JumpEdge>()
            .init_resource::<JumpCount>()
            .add_systems(Update, (capture_input, count_jumps).chain());
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    fn release(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    #[test]
    fn test_key_table() {
        assert_eq!(action_for_key(KeyCode::KeyW), Some(Action::Forward));
        assert_eq!(action_for_key(KeyCode::KeyS), Some(Action::Backward));
        assert_eq!(action_for_key(KeyCode::KeyA), Some(Action::Leftward));
        assert_eq!(action_for_key(KeyCode::KeyD), Some(Action::Rightward));
        assert_eq!(action_for_key(KeyCode::Space), Some(Action::Jump));
        assert_eq!(action_for_key(KeyCode::ArrowUp), None);
    }

    #[test]
    fn test_jump_edge_fires_once_per_press() {
        let mut edge = JumpEdge::default();
        assert!(!edge.update(false));
        assert!(edge.update(true));
        assert!(!edge.update(true));
        assert!(!edge.update(true));
        assert!(!edge.update(false));
        assert!(edge.update(true));
    }

    #[test]
    fn test_press_ignores_jump() {
        let mut keys = MovementKeys::default();
        keys.press(Action::Jump);
        assert!(!keys.any());
        keys.press(Action::Leftward);
        assert!(keys.leftward);
        assert!(keys.any());
    }

    #[test]
    fn test_capture_directional_keys() {
        let mut app = input_app();
        press(&mut app, KeyCode::KeyW);
        press(&mut app, KeyCode::KeyD);
        app.update();

        let keys = *app.world().resource::<MovementKeys>();
        assert_eq!(
            keys,
            MovementKeys {
                forward: true,
                backward: false,
                leftward: false,
                rightward: true,
            }
        );

        release(&mut app, KeyCode::KeyW);
        app.update();
        assert!(!app.world().resource::<MovementKeys>().forward);
        assert!(app.world().resource::<MovementKeys>().rightward);
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut app = input_app();
        press(&mut app, KeyCode::ArrowUp);
        press(&mut app, KeyCode::KeyQ);
        app.update();

        assert!(!app.world().resource::<MovementKeys>().any());
        assert_eq!(app.world().resource::<JumpCount>().0, 0);
    }

    #[test]
    fn test_held_space_emits_single_jump() {
        let mut app = input_app();
        press(&mut app, KeyCode::Space);
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(app.world().resource::<JumpCount>().0, 1);

        release(&mut app, KeyCode::Space);
        app.update();
        press(&mut app, KeyCode::Space);
        app.update();
        assert_eq!(app.world().resource::<JumpCount>().0, 2);
    }

    #[test]
    fn test_panel_suppresses_input() {
        let mut app = input_app();
        app.world_mut().resource_mut::<BallTweaks>().panel_visible = true;
        press(&mut app, KeyCode::KeyA);
        press(&mut app, KeyCode::Space);
        app.update();

        assert!(!app.world().resource::<MovementKeys>().any());
        assert_eq!(app.world().resource::<JumpCount>().0, 0);

        // Closing the panel with Space still held is not a new press
        app.world_mut().resource_mut::<BallTweaks>().panel_visible = false;
        app.update();
        assert_eq!(app.world().resource::<JumpCount>().0, 0);
        assert!(app.world().resource::<MovementKeys>().leftward);
    }
}

use glam::Vec2;

/// Edge and level state of one logical button for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Button {
    pub is_down: bool,
    pub was_pressed: bool,
    pub was_released: bool,
}

impl Button {
    pub fn pressed() -> Self {
        Self { is_down: true, was_pressed: true, was_released: false }
    }

    pub fn held() -> Self {
        Self { is_down: true, was_pressed: false, was_released: false }
    }

    pub fn released() -> Self {
        Self { is_down: false, was_pressed: false, was_released: true }
    }

    /// Advances to the next frame from the raw level.
    pub fn update(&mut self, down: bool) {
        self.was_pressed = down && !self.is_down;
        self.was_released = !down && self.is_down;
        self.is_down = down;
    }
}

/// Mouse state in screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    pub delta: Vec2,
    pub left: Button,
    pub right: Button,
    /// Wheel notches this frame, positive away from the user.
    pub wheel: f32,
}

/// Editor shortcuts, already resolved from the keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EditorKeys {
    pub delete: bool,
    pub center: bool,
    pub deselect: bool,
}

/// Logical input for one frame. Device mapping happens outside the core.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Input {
    /// Movement axis in [-1, 1]², y pointing down the screen.
    pub movement: Vec2,
    pub interact: Button,
    pub sprint: Button,
    pub pause: Button,
    pub console: Button,
    pub dev_left: Button,
    pub dev_right: Button,
    pub pointer: Pointer,
    pub editor: EditorKeys,
    /// Set while a text field owns the keyboard.
    pub keyboard_captured: bool,
}

impl Input {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn walk(movement: Vec2) -> Self {
        Self { movement, ..Self::default() }
    }

    pub fn sprint(movement: Vec2) -> Self {
        Self { movement, sprint: Button::held(), ..Self::default() }
    }

    pub fn interact() -> Self {
        Self { interact: Button::pressed(), ..Self::default() }
    }

    pub fn pause() -> Self {
        Self { pause: Button::pressed(), ..Self::default() }
    }

    pub fn console() -> Self {
        Self { console: Button::pressed(), ..Self::default() }
    }

    pub fn dev_left() -> Self {
        Self { dev_left: Button::pressed(), ..Self::default() }
    }

    pub fn dev_right() -> Self {
        Self { dev_right: Button::pressed(), ..Self::default() }
    }
}

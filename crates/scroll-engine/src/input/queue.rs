/// Scancodes for the keys the engine and demo bind by default.
/// Values follow the USB HID usage table, which SDL-style backends use directly.
pub mod key {
    pub const A: u16 = 4;
    pub const D: u16 = 7;
    pub const S: u16 = 22;
    pub const W: u16 = 26;
    pub const ESCAPE: u16 = 41;
    pub const SPACE: u16 = 44;
    pub const RIGHT: u16 = 79;
    pub const LEFT: u16 = 80;
    pub const DOWN: u16 = 81;
    pub const UP: u16 = 82;
}

/// Number of scancodes tracked by [`KeyboardState`].
pub const KEY_COUNT: usize = 512;

/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was closed or the user asked to quit.
    Quit,
    /// A key was pressed.
    KeyDown { scancode: u16 },
    /// A key was released.
    KeyUp { scancode: u16 },
}

/// Snapshot of which keys are held, indexed by scancode.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyboardState {
    keys: Vec<bool>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            keys: vec![false; KEY_COUNT],
        }
    }

    /// Build a snapshot with the given keys held.
    pub fn with_pressed(scancodes: &[u16]) -> Self {
        let mut state = Self::new();
        for &code in scancodes {
            state.set(code, true);
        }
        state
    }

    /// Whether `scancode` is held. Out-of-range codes read as released.
    pub fn is_pressed(&self, scancode: u16) -> bool {
        self.keys.get(scancode as usize).copied().unwrap_or(false)
    }

    /// Set one key. Out-of-range codes are ignored.
    pub fn set(&mut self, scancode: u16, pressed: bool) {
        if let Some(slot) = self.keys.get_mut(scancode as usize) {
            *slot = pressed;
        }
    }

    /// Fold a key event into the snapshot.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { scancode } => self.set(scancode, true),
            InputEvent::KeyUp { scancode } => self.set(scancode, false),
            InputEvent::Quit => {}
        }
    }

    /// Scancodes currently held, ascending.
    pub fn pressed(&self) -> impl Iterator<Item = u16> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, &down)| down)
            .map(|(code, _)| code as u16)
    }

    pub fn clear(&mut self) {
        self.keys.iter_mut().for_each(|k| *k = false);
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.pressed()).finish()
    }
}

/// FIFO of input events waiting to be polled.
/// Backends push as events arrive; the game drains once per frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

// Held directions from keyboard and on-screen pad, plus double-tap detection.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Maps a `KeyboardEvent.key` value; other keys are not ours.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    /// `data-dir` value of the on-screen control.
    pub fn control_name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Unit vector, x east and y north.
    pub fn delta(self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, 1.0),
            Direction::Down => (0.0, -1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Pointer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressKind {
    HoldStart,
    Gesture,
}

/// A press is a gesture when the previous press on the same control is younger than `threshold_ms`.
pub fn classify_press(last_ms: Option<f64>, now_ms: f64, threshold_ms: f64) -> PressKind {
    match last_ms {
        Some(last) if now_ms - last < threshold_ms => PressKind::Gesture,
        _ => PressKind::HoldStart,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct SourceState {
    held: bool,
    last_press_ms: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct DirectionInput {
    keyboard: SourceState,
    pointer: SourceState,
}

impl DirectionInput {
    fn source(&self, source: InputSource) -> &SourceState {
        match source {
            InputSource::Keyboard => &self.keyboard,
            InputSource::Pointer => &self.pointer,
        }
    }

    fn source_mut(&mut self, source: InputSource) -> &mut SourceState {
        match source {
            InputSource::Keyboard => &mut self.keyboard,
            InputSource::Pointer => &mut self.pointer,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputState {
    directions: [DirectionInput; 4],
    double_tap_ms: f64,
}

impl InputState {
    pub fn new(double_tap_ms: f64) -> Self {
        Self {
            directions: [DirectionInput::default(); 4],
            double_tap_ms,
        }
    }

    pub fn press(&mut self, direction: Direction, source: InputSource, now_ms: f64) -> PressKind {
        let threshold = self.double_tap_ms;
        let state = self.directions[direction.index()].source_mut(source);
        let kind = classify_press(state.last_press_ms, now_ms, threshold);
        match kind {
            PressKind::Gesture => {
                // a third quick press starts a fresh hold instead of chaining
                state.last_press_ms = None;
                state.held = false;
            }
            PressKind::HoldStart => {
                state.held = true;
                state.last_press_ms = Some(now_ms);
            }
        }
        kind
    }

    /// Keyboard press. Auto-repeat keydowns of a held key are dropped without touching
    /// the hold or the tap timestamp, so holding a key never reads as a double tap.
    pub fn key_down(&mut self, direction: Direction, repeat: bool, now_ms: f64) -> Option<PressKind> {
        if repeat {
            return None;
        }
        Some(self.press(direction, InputSource::Keyboard, now_ms))
    }

    pub fn release(&mut self, direction: Direction, source: InputSource) {
        self.directions[direction.index()].source_mut(source).held = false;
    }

    /// Pointer left the control without a release.
    pub fn pointer_leave(&mut self, direction: Direction) {
        self.release(direction, InputSource::Pointer);
    }

    pub fn is_held(&self, direction: Direction, source: InputSource) -> bool {
        self.directions[direction.index()].source(source).held
    }

    pub fn any_held(&self) -> bool {
        self.directions.iter().any(|d| d.keyboard.held || d.pointer.held)
    }

    /// Net (east, north) movement for one frame. Every held source adds its own step.
    pub fn movement(&self, step: f64) -> (f64, f64) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        for direction in Direction::ALL {
            let input = &self.directions[direction.index()];
            let count = input.keyboard.held as u8 + input.pointer.held as u8;
            let (ux, uy) = direction.delta();
            dx += ux * step * count as f64;
            dy += uy * step * count as f64;
        }
        (dx, dy)
    }
}

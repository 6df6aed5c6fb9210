use crate::catalog::{App, Catalog};
use crate::error::IndexError;
use crate::grid::{Change, GridState, Position};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browsing,
    Editing,
}

impl Mode {
    pub fn is_editing(self) -> bool {
        self == Mode::Editing
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Browsing => Mode::Editing,
            Mode::Editing => Mode::Browsing,
        }
    }
}

/// What the screen is showing, independent of grid contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Screen {
    pub mode: Mode,
    pub picker_open: bool,
}

/// Gestures and button presses forwarded by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    /// Tap on an icon while editing.
    Delete(Position),
    /// Drag released over a drop slot.
    Move { from: Position, to: Position },
    /// App chosen in the picker.
    Add(App),
    Refresh,
    ToggleEdit,
    Done,
    OpenPicker,
    ClosePicker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatched {
    pub screen: Screen,
    pub change: Option<Change>,
}

/// Applies one intent. The grid itself has no notion of mode; gating by
/// `screen.mode` happens here.
pub fn dispatch(
    grid: &mut GridState,
    catalog: &Catalog,
    screen: Screen,
    intent: UserIntent,
) -> Result<Dispatched, IndexError> {
    let mut next = screen;
    let change = match intent {
        UserIntent::Delete(at) => {
            if screen.mode.is_editing() {
                Some(grid.delete(at)?)
            } else {
                debug!("ignoring delete at {at} outside edit mode");
                None
            }
        }
        UserIntent::Move { from, to } => Some(grid.move_app(from, to)?),
        UserIntent::Add(app) => {
            next.picker_open = false;
            grid.add(app)
        }
        UserIntent::Refresh => {
            next.mode = Mode::Browsing;
            info!("resetting grid to catalog");
            Some(grid.reset(catalog))
        }
        UserIntent::ToggleEdit => {
            next.mode = screen.mode.toggled();
            None
        }
        UserIntent::Done => {
            next.mode = Mode::Browsing;
            None
        }
        UserIntent::OpenPicker => {
            next.picker_open = true;
            None
        }
        UserIntent::ClosePicker => {
            next.picker_open = false;
            None
        }
    };

    Ok(Dispatched {
        screen: next,
        change,
    })
}

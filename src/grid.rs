//! The mutable arrangement of sections and apps currently on screen.
//!
//! Every mutation returns a [`Change`] record describing exactly which
//! positions were affected, and pushes the same record to every subscriber
//! so a renderer can update incrementally.

use crate::catalog::{App, AppId, Catalog, Section};
use crate::error::IndexError;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};
use std::fmt;

pub const DEFAULT_SECTION_NAME: &str = "Added apps";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub section: usize,
    pub row: usize,
}

impl Position {
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.row)
    }
}

/// A single applied mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// An app was appended at `at`. `new_section` is set when the section
    /// holding it was created for this insert.
    Insert { at: Position, new_section: bool },
    /// The app at `at` was removed. `section_removed` is set when that left
    /// the section empty and it was dropped from the grid.
    Remove { at: Position, section_removed: bool },
    /// The app at `from` now sits at `to`. `to` is the landing position after
    /// an emptied source section (if any) has been dropped.
    Move {
        from: Position,
        to: Position,
        section_removed: bool,
    },
    /// The whole grid was replaced.
    Reload,
}

#[derive(Debug, Default)]
pub struct GridState {
    sections: Vec<Section>,
    subscribers: Vec<Sender<Change>>,
}

impl GridState {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            sections: catalog.sections.clone(),
            subscribers: Vec::new(),
        }
    }

    /// Returns a receiver that gets a copy of every change applied from now on.
    pub fn subscribe(&mut self) -> Receiver<Change> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Total number of apps across all sections.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|section| section.apps.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|section| section.apps.is_empty())
    }

    pub fn contains(&self, id: AppId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn position_of(&self, id: AppId) -> Option<Position> {
        self.sections
            .iter()
            .enumerate()
            .find_map(|(section_idx, section)| {
                section
                    .apps
                    .iter()
                    .position(|app| app.id == id)
                    .map(|row| Position::new(section_idx, row))
            })
    }

    /// Looks up the app at `at`. Out-of-range positions are simply absent.
    pub fn item(&self, at: Position) -> Option<&App> {
        self.sections
            .get(at.section)
            .and_then(|section| section.apps.get(at.row))
    }

    /// Apps from the catalog's picker list that are not on screen.
    pub fn available<'a>(&self, catalog: &'a Catalog) -> Vec<&'a App> {
        catalog
            .other_apps
            .iter()
            .filter(|app| !self.contains(app.id))
            .collect()
    }

    /// Appends `app` to the end of the last section. Returns `None` without
    /// touching the grid if an app with the same id is already present.
    pub fn add(&mut self, app: App) -> Option<Change> {
        if self.contains(app.id) {
            debug!("ignoring add of app {} ({}): already on grid", app.id, app.name);
            return None;
        }

        let new_section = self.sections.is_empty();
        if new_section {
            self.sections
                .push(Section::new(DEFAULT_SECTION_NAME, Vec::new()));
        }
        let section = self.sections.len() - 1;
        let apps = &mut self.sections[section].apps;
        apps.push(app);
        let at = Position::new(section, apps.len() - 1);

        Some(self.emit(Change::Insert { at, new_section }))
    }

    /// Removes the app at `at`, dropping its section if it becomes empty.
    pub fn delete(&mut self, at: Position) -> Result<Change, IndexError> {
        if self.item(at).is_none() {
            return Err(reject("delete", at));
        }

        let apps = &mut self.sections[at.section].apps;
        apps.remove(at.row);
        let section_removed = apps.is_empty();
        if section_removed {
            self.sections.remove(at.section);
        }

        Ok(self.emit(Change::Remove {
            at,
            section_removed,
        }))
    }

    /// Moves the app at `from` to `to`, where `to` is read against the grid
    /// with the app already taken out. `to.row` may equal the length of the
    /// target section to append. The source section is kept while resolving
    /// `to` and dropped afterwards if the move emptied it.
    pub fn move_app(&mut self, from: Position, to: Position) -> Result<Change, IndexError> {
        if self.item(from).is_none() {
            return Err(reject("move", from));
        }
        let target_len = match self.sections.get(to.section) {
            Some(section) if to.section == from.section => section.apps.len() - 1,
            Some(section) => section.apps.len(),
            None => return Err(reject("move", to)),
        };
        if to.row > target_len {
            return Err(reject("move", to));
        }

        let app = self.sections[from.section].apps.remove(from.row);
        self.sections[to.section].apps.insert(to.row, app);

        let section_removed = self.sections[from.section].apps.is_empty();
        let mut landed = to;
        if section_removed {
            self.sections.remove(from.section);
            if landed.section > from.section {
                landed.section -= 1;
            }
        }

        Ok(self.emit(Change::Move {
            from,
            to: landed,
            section_removed,
        }))
    }

    /// Throws away every edit and starts over from the catalog.
    pub fn reset(&mut self, catalog: &Catalog) -> Change {
        self.sections = catalog.sections.clone();
        self.emit(Change::Reload)
    }

    fn emit(&mut self, change: Change) -> Change {
        debug!("grid change: {:?}", change);
        self.subscribers.retain(|tx| tx.send(change).is_ok());
        change
    }
}

fn reject(op: &'static str, position: Position) -> IndexError {
    let err = IndexError::new(op, position);
    warn!("rejected grid operation: {err}");
    err
}

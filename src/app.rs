mod state;
mod style;
mod ui;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::events::{dispatch, Screen, UserIntent};
use crate::grid::{Change, GridState};
use crossbeam_channel::Receiver;
use eframe::egui;
use log::{info, warn};
use state::{DragSession, GeometrySettle, Highlights, PressCandidate};
use std::time::Instant;

pub const WINDOW_WIDTH: f32 = 390.0;
pub const WINDOW_HEIGHT: f32 = 720.0;
pub const MIN_WINDOW_WIDTH: f32 = 300.0;
pub const MIN_WINDOW_HEIGHT: f32 = 420.0;

pub struct GridApp {
    catalog: Catalog,
    grid: GridState,
    changes: Receiver<Change>,
    screen: Screen,
    config: AppConfig,
    drag: Option<DragSession>,
    press_candidate: Option<PressCandidate>,
    highlights: Highlights,
    geometry: GeometrySettle,
}

impl GridApp {
    pub fn new(cc: &eframe::CreationContext<'_>, catalog: Catalog, config: AppConfig) -> Self {
        if let Some((x, y)) = config.last_pos {
            cc.egui_ctx
                .send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(x, y)));
        }

        let saved_geometry = config
            .last_pos
            .zip(config.last_size)
            .map(|((x, y), (w, h))| (egui::pos2(x, y), egui::vec2(w, h)));
        let mut grid = GridState::new(&catalog);
        let changes = grid.subscribe();
        info!(
            "grid ready with {} apps in {} sections",
            grid.len(),
            grid.sections().len()
        );

        Self {
            catalog,
            grid,
            changes,
            screen: Screen::default(),
            config,
            drag: None,
            press_candidate: None,
            highlights: Highlights::default(),
            geometry: GeometrySettle::new(saved_geometry),
        }
    }

    fn apply(&mut self, intent: UserIntent) {
        let screen = apply_intent(&mut self.grid, &self.catalog, self.screen, intent);
        if screen.mode != self.screen.mode {
            self.drag = None;
            self.press_candidate = None;
        }
        self.screen = screen;
    }

    fn drain_changes(&mut self) {
        let now = Instant::now();
        for change in self.changes.try_iter() {
            self.highlights.apply(change, now);
            if change == Change::Reload {
                self.drag = None;
                self.press_candidate = None;
            }
        }
        self.highlights.prune(now);
    }

    fn save_window_geometry(&mut self, pos: egui::Pos2, size: egui::Vec2) {
        let size = sanitize_window_size(size);
        self.config.last_pos = Some((pos.x, pos.y));
        self.config.last_size = Some((size.x, size.y));
        self.config.save();
    }
}

/// Positions handed to the grid come from what is on screen, so a rejection
/// here means the UI and the grid disagree.
fn apply_intent(
    grid: &mut GridState,
    catalog: &Catalog,
    screen: Screen,
    intent: UserIntent,
) -> Screen {
    match dispatch(grid, catalog, screen, intent) {
        Ok(dispatched) => dispatched.screen,
        Err(err) => {
            warn!("rejected intent: {err}");
            debug_assert!(false, "UI produced an out-of-range intent: {err}");
            screen
        }
    }
}

pub(super) fn sanitize_window_size(size: egui::Vec2) -> egui::Vec2 {
    let width = if size.x.is_finite() {
        size.x
    } else {
        WINDOW_WIDTH
    };
    let height = if size.y.is_finite() {
        size.y
    } else {
        WINDOW_HEIGHT
    };
    egui::vec2(width.max(MIN_WINDOW_WIDTH), height.max(MIN_WINDOW_HEIGHT))
}

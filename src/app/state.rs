use crate::catalog::App;
use crate::events::Mode;
use crate::grid::{Change, Position};
use eframe::egui;
use std::time::{Duration, Instant};

pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(600);
pub const REORDER_HOLD: Duration = Duration::from_millis(350);
pub const REORDER_MOVE_TOLERANCE: f32 = 12.0;
pub const GEOMETRY_SETTLE: Duration = Duration::from_millis(500);
const GEOMETRY_EPSILON: f32 = 1.0;

/// An icon picked up by a long press, waiting to be dropped.
pub struct DragSession {
    pub from: Position,
    pub app: App,
    pub target: Option<Position>,
}

/// A press on an icon that may turn into a drag once held long enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressCandidate {
    pub at: Position,
    pub start: Instant,
    pub origin: egui::Pos2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressStep {
    Waiting,
    Cancel,
    PickUp(Position),
}

/// Only edit mode arms long-press reordering; while browsing the grid is static.
pub fn arms_press(mode: Mode, dragging: bool, pending: bool) -> bool {
    mode.is_editing() && !dragging && !pending
}

pub fn step_press(
    mode: Mode,
    press: PressCandidate,
    pointer: Option<egui::Pos2>,
    now: Instant,
) -> PressStep {
    if !mode.is_editing() {
        return PressStep::Cancel;
    }
    let Some(p) = pointer else {
        return PressStep::Cancel;
    };
    if p.distance(press.origin) > REORDER_MOVE_TOLERANCE {
        PressStep::Cancel
    } else if now.saturating_duration_since(press.start) >= REORDER_HOLD {
        PressStep::PickUp(press.at)
    } else {
        PressStep::Waiting
    }
}

/// Holds back window geometry until it has stopped changing, so a resize
/// or move is written to disk once rather than every frame.
#[derive(Default)]
pub struct GeometrySettle {
    pending: Option<(egui::Pos2, egui::Vec2, Instant)>,
    saved: Option<(egui::Pos2, egui::Vec2)>,
}

impl GeometrySettle {
    pub fn new(saved: Option<(egui::Pos2, egui::Vec2)>) -> Self {
        Self {
            pending: None,
            saved,
        }
    }

    /// Returns geometry that should be saved now.
    pub fn observe(
        &mut self,
        pos: egui::Pos2,
        size: egui::Vec2,
        now: Instant,
    ) -> Option<(egui::Pos2, egui::Vec2)> {
        let same = |a: (egui::Pos2, egui::Vec2)| {
            (a.0 - pos).length() <= GEOMETRY_EPSILON && (a.1 - size).length() <= GEOMETRY_EPSILON
        };
        if self.saved.is_some_and(&same) {
            self.pending = None;
            return None;
        }
        match self.pending {
            Some((p, s, since)) if same((p, s)) => {
                if now.saturating_duration_since(since) >= GEOMETRY_SETTLE {
                    self.pending = None;
                    self.saved = Some((pos, size));
                    return Some((pos, size));
                }
            }
            _ => self.pending = Some((pos, size, now)),
        }
        None
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// What the pointer is over when a drag is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropHit {
    Cell(Position),
    /// Empty space after the last icon of a section.
    SectionEnd(usize),
}

/// Turns a drop hit into a `to` position for [`crate::grid::GridState::move_app`],
/// which reads positions with the dragged app already removed.
/// `section_lens` are the current lengths, before removal.
pub fn resolve_drop(section_lens: &[usize], from: Position, hit: DropHit) -> Option<Position> {
    let post_len = |section: usize| {
        section_lens
            .get(section)
            .map(|len| len - usize::from(section == from.section))
    };
    match hit {
        DropHit::Cell(at) => {
            let len = post_len(at.section)?;
            Some(Position::new(at.section, at.row.min(len)))
        }
        DropHit::SectionEnd(section) => post_len(section).map(|len| Position::new(section, len)),
    }
}

pub struct Highlight {
    pub at: Position,
    pub start: Instant,
}

/// Brief pulses on positions touched by recent inserts and moves, kept in
/// step with later removals and moves.
#[derive(Default)]
pub struct Highlights {
    items: Vec<Highlight>,
}

impl Highlights {
    pub fn apply(&mut self, change: Change, now: Instant) {
        match change {
            Change::Insert { at, .. } => self.items.push(Highlight { at, start: now }),
            Change::Remove {
                at,
                section_removed,
            } => self.shift_after_remove(at, section_removed),
            Change::Move {
                from,
                to,
                section_removed,
            } => {
                self.shift_after_remove(from, section_removed);
                for h in &mut self.items {
                    if h.at.section == to.section && h.at.row >= to.row {
                        h.at.row += 1;
                    }
                }
                self.items.push(Highlight { at: to, start: now });
            }
            Change::Reload => self.items.clear(),
        }
    }

    fn shift_after_remove(&mut self, at: Position, section_removed: bool) {
        self.items.retain(|h| h.at != at);
        for h in &mut self.items {
            if section_removed && h.at.section > at.section {
                h.at.section -= 1;
            } else if h.at.section == at.section && h.at.row > at.row {
                h.at.row -= 1;
            }
        }
    }

    /// Pulse strength in `0.0..=1.0` for `at`, fading out over
    /// [`HIGHLIGHT_DURATION`].
    pub fn strength(&self, at: Position, now: Instant) -> Option<f32> {
        self.items.iter().rev().find(|h| h.at == at).and_then(|h| {
            let t = now.saturating_duration_since(h.start).as_secs_f32()
                / HIGHLIGHT_DURATION.as_secs_f32();
            (t < 1.0).then(|| 1.0 - t)
        })
    }

    pub fn prune(&mut self, now: Instant) {
        self.items
            .retain(|h| now.saturating_duration_since(h.start) < HIGHLIGHT_DURATION);
    }

    pub fn is_active(&self) -> bool {
        !self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn drop_on_cell_in_same_section() {
        let lens = [4, 2];
        let from = Position::new(0, 2);
        assert_eq!(
            resolve_drop(&lens, from, DropHit::Cell(Position::new(0, 0))),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            resolve_drop(&lens, from, DropHit::SectionEnd(0)),
            Some(Position::new(0, 3))
        );
    }

    #[test]
    fn drop_into_other_section() {
        let lens = [4, 2];
        let from = Position::new(0, 1);
        assert_eq!(
            resolve_drop(&lens, from, DropHit::Cell(Position::new(1, 1))),
            Some(Position::new(1, 1))
        );
        assert_eq!(
            resolve_drop(&lens, from, DropHit::SectionEnd(1)),
            Some(Position::new(1, 2))
        );
        assert_eq!(resolve_drop(&lens, from, DropHit::SectionEnd(5)), None);
    }

    #[test]
    fn highlight_follows_removals() {
        let now = Instant::now();
        let mut highlights = Highlights::default();
        highlights.apply(
            Change::Insert {
                at: Position::new(1, 3),
                new_section: false,
            },
            now,
        );
        highlights.apply(
            Change::Remove {
                at: Position::new(1, 0),
                section_removed: false,
            },
            now,
        );
        assert!(highlights.strength(Position::new(1, 2), now).is_some());
        assert!(highlights.strength(Position::new(1, 3), now).is_none());

        highlights.apply(
            Change::Remove {
                at: Position::new(0, 0),
                section_removed: true,
            },
            now,
        );
        assert!(highlights.strength(Position::new(0, 2), now).is_some());
    }

    #[test]
    fn move_shifts_unrelated_highlights() {
        let now = Instant::now();
        let mut highlights = Highlights::default();
        for at in [Position::new(0, 3), Position::new(1, 0)] {
            highlights.apply(
                Change::Insert {
                    at,
                    new_section: false,
                },
                now,
            );
        }

        highlights.apply(
            Change::Move {
                from: Position::new(0, 0),
                to: Position::new(1, 0),
                section_removed: false,
            },
            now,
        );

        assert!(highlights.strength(Position::new(0, 2), now).is_some());
        assert!(highlights.strength(Position::new(1, 1), now).is_some());
        assert!(highlights.strength(Position::new(1, 0), now).is_some());
        assert!(highlights.strength(Position::new(0, 3), now).is_none());
    }

    #[test]
    fn move_out_of_emptied_section_shifts_later_sections() {
        let now = Instant::now();
        let mut highlights = Highlights::default();
        highlights.apply(
            Change::Insert {
                at: Position::new(2, 1),
                new_section: false,
            },
            now,
        );

        highlights.apply(
            Change::Move {
                from: Position::new(0, 0),
                to: Position::new(0, 0),
                section_removed: true,
            },
            now,
        );

        assert!(highlights.strength(Position::new(1, 1), now).is_some());
        assert!(highlights.strength(Position::new(0, 0), now).is_some());
    }

    fn press(at: Position, start: Instant) -> PressCandidate {
        PressCandidate {
            at,
            start,
            origin: egui::pos2(50.0, 50.0),
        }
    }

    #[test]
    fn long_press_while_browsing_never_picks_up() {
        let start = Instant::now();
        assert!(!arms_press(Mode::Browsing, false, false));

        let held = step_press(
            Mode::Browsing,
            press(Position::new(0, 1), start),
            Some(egui::pos2(50.0, 50.0)),
            start + REORDER_HOLD * 2,
        );
        assert_eq!(held, PressStep::Cancel);
    }

    #[test]
    fn long_press_while_editing_picks_up_after_hold() {
        let start = Instant::now();
        let at = Position::new(0, 1);
        let still = Some(egui::pos2(52.0, 51.0));
        assert!(arms_press(Mode::Editing, false, false));
        assert!(!arms_press(Mode::Editing, true, false));
        assert!(!arms_press(Mode::Editing, false, true));

        assert_eq!(
            step_press(Mode::Editing, press(at, start), still, start),
            PressStep::Waiting
        );
        assert_eq!(
            step_press(Mode::Editing, press(at, start), still, start + REORDER_HOLD),
            PressStep::PickUp(at)
        );
        assert_eq!(
            step_press(
                Mode::Editing,
                press(at, start),
                Some(egui::pos2(90.0, 50.0)),
                start + REORDER_HOLD
            ),
            PressStep::Cancel
        );
        assert_eq!(
            step_press(Mode::Editing, press(at, start), None, start),
            PressStep::Cancel
        );
    }

    #[test]
    fn geometry_is_saved_once_after_settling() {
        let t0 = Instant::now();
        let mut settle = GeometrySettle::new(None);
        let size = egui::vec2(400.0, 700.0);

        for step in 0..10u32 {
            let pos = egui::pos2(step as f32 * 10.0, 0.0);
            let now = t0 + Duration::from_millis(16 * step as u64);
            assert_eq!(settle.observe(pos, size, now), None);
        }
        let last = egui::pos2(90.0, 0.0);
        let later = t0 + Duration::from_millis(16 * 9) + GEOMETRY_SETTLE;
        assert_eq!(settle.observe(last, size, later), Some((last, size)));
        assert!(!settle.is_pending());
        assert_eq!(settle.observe(last, size, later + GEOMETRY_SETTLE), None);
    }

    #[test]
    fn geometry_matching_saved_config_is_not_rewritten() {
        let now = Instant::now();
        let pos = egui::pos2(10.0, 20.0);
        let size = egui::vec2(400.0, 700.0);
        let mut settle = GeometrySettle::new(Some((pos, size)));

        assert_eq!(settle.observe(pos, size, now), None);
        assert_eq!(settle.observe(pos, size, now + GEOMETRY_SETTLE), None);
        assert!(!settle.is_pending());
    }

    #[test]
    fn highlight_fades_and_reload_clears() {
        let now = Instant::now();
        let mut highlights = Highlights::default();
        highlights.apply(
            Change::Move {
                from: Position::new(0, 0),
                to: Position::new(0, 2),
                section_removed: false,
            },
            now,
        );
        assert_eq!(highlights.strength(Position::new(0, 2), now), Some(1.0));
        let later = now + HIGHLIGHT_DURATION;
        assert_eq!(highlights.strength(Position::new(0, 2), later), None);
        highlights.prune(later);
        assert!(!highlights.is_active());

        highlights.apply(
            Change::Insert {
                at: Position::new(0, 0),
                new_section: true,
            },
            now,
        );
        highlights.apply(Change::Reload, now);
        assert!(!highlights.is_active());
    }
}

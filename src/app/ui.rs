use super::state::{
    arms_press, resolve_drop, step_press, DragSession, DropHit, PressCandidate, PressStep,
    GEOMETRY_SETTLE,
};
use super::style::{
    GridTheme, BADGE_RADIUS, CONTENT_PADDING, ICON_ROUNDING, LABEL_HEIGHT, NAV_HEIGHT,
    SECTION_SPACING, WOBBLE_PX,
};
use super::{sanitize_window_size, GridApp};
use crate::branding::{APP_DISPLAY_NAME, PICKER_TITLE};
use crate::events::{Mode, UserIntent};
use crate::grid::Position;
use crate::icons::IconFace;
use eframe::egui;
use log::debug;
use std::time::Instant;

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_changes();

        let theme = GridTheme::default();
        let mode = self.screen.mode;
        let mut intents = Vec::new();

        self.handle_keys(ctx, mode, &mut intents);
        self.draw_nav_bar(ctx, mode, &mut intents);
        self.draw_grid(ctx, mode, &theme, &mut intents);
        if self.screen.picker_open {
            self.draw_picker(ctx, &theme, &mut intents);
        }
        self.draw_drag_ghost(ctx, &theme);

        for intent in intents {
            debug!("intent: {intent:?}");
            self.apply(intent);
        }
        self.drain_changes();
        self.track_window_geometry(ctx);

        if mode.is_editing()
            || self.highlights.is_active()
            || self.drag.is_some()
            || self.press_candidate.is_some()
        {
            ctx.request_repaint();
        }
    }
}

impl GridApp {
    fn handle_keys(&self, ctx: &egui::Context, mode: Mode, intents: &mut Vec<UserIntent>) {
        if !ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            return;
        }
        if self.screen.picker_open {
            intents.push(UserIntent::ClosePicker);
        } else if mode.is_editing() {
            intents.push(UserIntent::Done);
        }
    }

    fn draw_nav_bar(&self, ctx: &egui::Context, mode: Mode, intents: &mut Vec<UserIntent>) {
        egui::TopBottomPanel::top("nav_bar")
            .exact_height(NAV_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    if ui.button("Refresh").clicked() {
                        intents.push(UserIntent::Refresh);
                    }
                    ui.label(egui::RichText::new(APP_DISPLAY_NAME).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let (label, intent) = if mode.is_editing() {
                            ("Done", UserIntent::Done)
                        } else {
                            ("Edit", UserIntent::ToggleEdit)
                        };
                        if ui.button(label).clicked() {
                            intents.push(intent);
                        }
                        if ui.button("+").on_hover_text(PICKER_TITLE).clicked() {
                            intents.push(UserIntent::OpenPicker);
                        }
                    });
                });
            });
    }

    fn draw_grid(
        &mut self,
        ctx: &egui::Context,
        mode: Mode,
        theme: &GridTheme,
        intents: &mut Vec<UserIntent>,
    ) {
        let cols = self.config.grid_cols.max(1) as usize;
        let now = Instant::now();
        let time = ctx.input(|i| i.time);
        let pointer = ctx.input(|i| i.pointer.hover_pos());
        let mut hits: Vec<(DropHit, egui::Rect)> = Vec::new();

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(theme.background)
                    .inner_margin(CONTENT_PADDING),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let width = ui.available_width();
                    let cell_w = width / cols as f32;
                    let icon_side = (self.config.icon_size as f32).min(cell_w - 16.0).max(24.0);
                    let cell_h = icon_side + LABEL_HEIGHT + 14.0;

                    if self.grid.is_empty() {
                        ui.add_space(40.0);
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new("No apps here. Press + to add some.")
                                    .color(theme.section_title),
                            );
                        });
                    }

                    for (s, section) in self.grid.sections().iter().enumerate() {
                        ui.label(
                            egui::RichText::new(&section.name)
                                .color(theme.section_title)
                                .small(),
                        );
                        let rows = section.apps.len().div_ceil(cols).max(1);
                        let (area, _) = ui.allocate_exact_size(
                            egui::vec2(width, rows as f32 * cell_h),
                            egui::Sense::hover(),
                        );
                        hits.push((DropHit::SectionEnd(s), area));

                        for (r, app) in section.apps.iter().enumerate() {
                            let at = Position::new(s, r);
                            let cell = egui::Rect::from_min_size(
                                area.min
                                    + egui::vec2(
                                        (r % cols) as f32 * cell_w,
                                        (r / cols) as f32 * cell_h,
                                    ),
                                egui::vec2(cell_w, cell_h),
                            );
                            hits.push((DropHit::Cell(at), cell));
                            let resp = ui.interact(
                                cell,
                                ui.id().with(("app", app.id)),
                                egui::Sense::click_and_drag(),
                            );

                            if resp.is_pointer_button_down_on()
                                && arms_press(
                                    mode,
                                    self.drag.is_some(),
                                    self.press_candidate.is_some(),
                                )
                            {
                                if let Some(origin) = pointer {
                                    self.press_candidate = Some(PressCandidate {
                                        at,
                                        start: now,
                                        origin,
                                    });
                                }
                            }
                            if resp.clicked() && self.drag.is_none() && mode.is_editing() {
                                intents.push(UserIntent::Delete(at));
                            }

                            let wobble = if mode.is_editing() {
                                ((time * 18.0 + app.id as f64 * 1.7).sin() as f32) * WOBBLE_PX
                            } else {
                                0.0
                            };
                            let icon_rect = egui::Rect::from_center_size(
                                egui::pos2(
                                    cell.center().x + wobble,
                                    cell.min.y + 6.0 + icon_side * 0.5,
                                ),
                                egui::vec2(icon_side, icon_side),
                            );
                            let dragged = self.drag.as_ref().is_some_and(|d| d.from == at);
                            let opacity = if dragged { 0.3 } else { 1.0 };
                            let painter = ui.painter();

                            paint_icon(
                                painter,
                                icon_rect,
                                &IconFace::resolve(&app.image, &app.name),
                                theme,
                                opacity,
                            );
                            painter.text(
                                egui::pos2(cell.center().x, icon_rect.max.y + 4.0),
                                egui::Align2::CENTER_TOP,
                                &app.name,
                                egui::FontId::proportional(11.0),
                                theme.app_label.gamma_multiply(opacity),
                            );

                            if let Some(strength) = self.highlights.strength(at, now) {
                                painter.rect_stroke(
                                    icon_rect.expand(3.0),
                                    ICON_ROUNDING + 3.0,
                                    egui::Stroke::new(2.0, theme.highlight.gamma_multiply(strength)),
                                );
                            }

                            if mode.is_editing() && !dragged {
                                let badge = icon_rect.left_top();
                                painter.circle_filled(badge, BADGE_RADIUS, theme.badge_bg);
                                painter.text(
                                    badge,
                                    egui::Align2::CENTER_CENTER,
                                    "×",
                                    egui::FontId::proportional(12.0),
                                    theme.badge_fg,
                                );
                            }
                        }

                        ui.add_space(SECTION_SPACING);
                    }
                });
            });

        self.update_long_press(mode, pointer, now);
        self.update_drag(ctx, pointer, &hits, theme, intents);
    }

    fn update_long_press(&mut self, mode: Mode, pointer: Option<egui::Pos2>, now: Instant) {
        let Some(press) = self.press_candidate else {
            return;
        };
        match step_press(mode, press, pointer, now) {
            PressStep::Waiting => {}
            PressStep::Cancel => self.press_candidate = None,
            PressStep::PickUp(at) => {
                self.press_candidate = None;
                if let Some(app) = self.grid.item(at) {
                    debug!("picked up {} at {at}", app.name);
                    self.drag = Some(DragSession {
                        from: at,
                        app: app.clone(),
                        target: None,
                    });
                }
            }
        }
    }

    fn update_drag(
        &mut self,
        ctx: &egui::Context,
        pointer: Option<egui::Pos2>,
        hits: &[(DropHit, egui::Rect)],
        theme: &GridTheme,
        intents: &mut Vec<UserIntent>,
    ) {
        let primary_down = ctx.input(|i| i.pointer.primary_down());
        if !primary_down {
            self.press_candidate = None;
            if let Some(drag) = self.drag.take() {
                match drag.target {
                    Some(to) if to != drag.from => intents.push(UserIntent::Move {
                        from: drag.from,
                        to,
                    }),
                    _ => debug!("drag of {} ended without a move", drag.app.name),
                }
            }
            return;
        }

        let section_lens: Vec<usize> = self
            .grid
            .sections()
            .iter()
            .map(|section| section.apps.len())
            .collect();
        let (Some(drag), Some(p)) = (self.drag.as_mut(), pointer) else {
            return;
        };

        let from = drag.from;
        let hit = find_hit(hits, p);
        drag.target = hit.and_then(|(h, _)| resolve_drop(&section_lens, from, h));
        if let (Some((_, rect)), Some(_)) = (hit, drag.target) {
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("drop_hint"),
            ));
            painter.rect_stroke(rect, 8.0, egui::Stroke::new(1.5, theme.drop_hint));
        }
    }

    fn draw_drag_ghost(&self, ctx: &egui::Context, theme: &GridTheme) {
        let (Some(drag), Some(pos)) = (&self.drag, ctx.input(|i| i.pointer.hover_pos())) else {
            return;
        };
        let side = self.config.icon_size as f32;
        let rect = egui::Rect::from_center_size(pos, egui::vec2(side, side));
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Tooltip,
            egui::Id::new("drag_ghost"),
        ));
        painter.rect_filled(
            rect.expand(6.0),
            ICON_ROUNDING + 6.0,
            egui::Color32::from_rgba_premultiplied(0, 0, 0, 48),
        );
        paint_icon(
            &painter,
            rect,
            &IconFace::resolve(&drag.app.image, &drag.app.name),
            theme,
            1.0,
        );
    }

    fn draw_picker(&self, ctx: &egui::Context, theme: &GridTheme, intents: &mut Vec<UserIntent>) {
        let available = self.grid.available(&self.catalog);
        let mut open = true;

        egui::Window::new(PICKER_TITLE)
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                if available.is_empty() {
                    ui.label("Every app is already on the home screen.");
                    return;
                }
                egui::ScrollArea::vertical()
                    .max_height(360.0)
                    .show(ui, |ui| {
                        for app in &available {
                            egui::Frame::none()
                                .fill(theme.picker_row)
                                .rounding(6.0)
                                .inner_margin(6.0)
                                .show(ui, |ui| {
                                    ui.horizontal(|ui| {
                                        let (rect, _) = ui.allocate_exact_size(
                                            egui::vec2(28.0, 28.0),
                                            egui::Sense::hover(),
                                        );
                                        paint_icon(
                                            ui.painter(),
                                            rect,
                                            &IconFace::resolve(&app.image, &app.name),
                                            theme,
                                            1.0,
                                        );
                                        ui.label(app.name.as_str());
                                        ui.with_layout(
                                            egui::Layout::right_to_left(egui::Align::Center),
                                            |ui| {
                                                if ui.button("Add").clicked() {
                                                    intents.push(UserIntent::Add((*app).clone()));
                                                }
                                            },
                                        );
                                    });
                                });
                            ui.add_space(4.0);
                        }
                    });
            });

        if !open {
            intents.push(UserIntent::ClosePicker);
        }
    }

    fn track_window_geometry(&mut self, ctx: &egui::Context) {
        let (outer, inner, closing) = ctx.input(|i| {
            let viewport = i.viewport();
            (viewport.outer_rect, viewport.inner_rect, viewport.close_requested())
        });
        let (Some(outer), Some(inner)) = (outer, inner) else {
            return;
        };
        let pos = outer.min;
        let size = sanitize_window_size(inner.size());

        let settled = self.geometry.observe(pos, size, Instant::now());
        if settled.is_some() || (closing && self.geometry.is_pending()) {
            self.save_window_geometry(pos, size);
        } else if self.geometry.is_pending() {
            ctx.request_repaint_after(GEOMETRY_SETTLE);
        }
    }
}

fn find_hit(hits: &[(DropHit, egui::Rect)], p: egui::Pos2) -> Option<(DropHit, egui::Rect)> {
    let cell = hits
        .iter()
        .find(|(hit, rect)| matches!(hit, DropHit::Cell(_)) && rect.contains(p));
    cell.or_else(|| {
        hits.iter()
            .find(|(hit, rect)| matches!(hit, DropHit::SectionEnd(_)) && rect.contains(p))
    })
    .copied()
}

fn paint_icon(
    painter: &egui::Painter,
    rect: egui::Rect,
    face: &IconFace,
    theme: &GridTheme,
    opacity: f32,
) {
    painter.rect_filled(rect, ICON_ROUNDING, face.tint.gamma_multiply(opacity));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        &face.monogram,
        egui::FontId::proportional(rect.height() * 0.45),
        theme.monogram.gamma_multiply(opacity),
    );
}

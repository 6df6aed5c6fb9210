use eframe::egui::Color32;

pub const NAV_HEIGHT: f32 = 36.0;
pub const SECTION_SPACING: f32 = 10.0;
pub const CONTENT_PADDING: f32 = 12.0;
pub const LABEL_HEIGHT: f32 = 16.0;
pub const ICON_ROUNDING: f32 = 10.0;
pub const BADGE_RADIUS: f32 = 8.0;
pub const WOBBLE_PX: f32 = 1.6;

#[derive(Clone, Copy)]
pub struct GridTheme {
    pub background: Color32,
    pub section_title: Color32,
    pub app_label: Color32,
    pub badge_bg: Color32,
    pub badge_fg: Color32,
    pub monogram: Color32,
    pub drop_hint: Color32,
    pub highlight: Color32,
    pub picker_row: Color32,
}

impl Default for GridTheme {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(18, 24, 38),
            section_title: Color32::from_rgb(170, 184, 204),
            app_label: Color32::from_rgb(242, 248, 255),
            badge_bg: Color32::from_rgb(90, 90, 96),
            badge_fg: Color32::WHITE,
            monogram: Color32::from_rgba_premultiplied(255, 255, 255, 230),
            drop_hint: Color32::from_rgba_premultiplied(93, 214, 189, 186),
            highlight: Color32::from_rgba_premultiplied(255, 255, 255, 90),
            picker_row: Color32::from_rgba_premultiplied(35, 53, 74, 184),
        }
    }
}

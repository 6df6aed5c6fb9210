pub const APP_DISPLAY_NAME: &str = "Apps Grid";
pub const PICKER_TITLE: &str = "Add Apps";

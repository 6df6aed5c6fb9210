use eframe::egui::Color32;

const PALETTE: [Color32; 8] = [
    Color32::from_rgb(52, 199, 89),
    Color32::from_rgb(0, 122, 255),
    Color32::from_rgb(255, 149, 0),
    Color32::from_rgb(255, 59, 48),
    Color32::from_rgb(175, 82, 222),
    Color32::from_rgb(90, 200, 250),
    Color32::from_rgb(255, 204, 0),
    Color32::from_rgb(88, 86, 214),
];

/// Resolved look of an app icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFace {
    pub tint: Color32,
    pub monogram: String,
}

impl IconFace {
    pub fn resolve(image_ref: &str, display_name: &str) -> Self {
        Self {
            tint: icon_tint(image_ref),
            monogram: monogram(display_name),
        }
    }
}

fn stable_hash64(input: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for b in input {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

fn normalize_icon_name_key(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    lowered
        .strip_suffix(".png")
        .unwrap_or(lowered.as_str())
        .trim()
        .to_string()
}

/// Picks a palette colour for an icon reference; the same reference always
/// gets the same colour.
pub fn icon_tint(image_ref: &str) -> Color32 {
    let key = normalize_icon_name_key(image_ref);
    let idx = (stable_hash64(key.as_bytes()) % PALETTE.len() as u64) as usize;
    PALETTE[idx]
}

pub fn monogram(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_is_stable_and_ignores_case_and_extension() {
        assert_eq!(icon_tint("safari"), icon_tint("safari"));
        assert_eq!(icon_tint("Safari.png"), icon_tint("safari"));
        assert_eq!(icon_tint("  safari "), icon_tint("safari"));
    }

    #[test]
    fn tint_spreads_over_palette() {
        let refs = [
            "phone", "messages", "safari", "mail", "calendar", "notes", "photos", "camera",
            "music", "maps", "clock", "books",
        ];
        let distinct: std::collections::HashSet<_> =
            refs.iter().map(|r| icon_tint(r).to_array()).collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn monogram_uses_first_letter() {
        assert_eq!(monogram("mail"), "M");
        assert_eq!(monogram("  ümlaut"), "Ü");
        assert_eq!(monogram(""), "?");
        assert_eq!(
            IconFace::resolve("notes", "Notes"),
            IconFace {
                tint: icon_tint("notes"),
                monogram: "N".to_string()
            }
        );
    }
}

use crate::palette::{Palette, PaletteEntry};

/// Result handed back to the UI for one clicked pixel.
/// `rgb` is `None` only for the sentinel "Unknown" result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMatch {
    pub name: String,
    pub hex: String,
    pub rgb: Option<[u8; 3]>,
}

impl ColorMatch {
    /// Fallback when the palette is empty or unusable.
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_owned(),
            hex: "#000000".to_owned(),
            rgb: None,
        }
    }
}

// Squared Euclidean distance in raw RGB space (no square root, ordering
// is identical). Query channels are i32 so out-of-range values cannot
// panic; widened to i64 before squaring, summed in u64.
#[inline]
fn dist2(q: [i32; 3], e: [u8; 3]) -> u64 {
    let dr = (q[0] as i64 - e[0] as i64).unsigned_abs();
    let dg = (q[1] as i64 - e[1] as i64).unsigned_abs();
    let db = (q[2] as i64 - e[2] as i64).unsigned_abs();
    dr * dr + dg * dg + db * db
}

/// Linear scan for the palette entry nearest to `rgb`. Ties go to the
/// earlier entry (strictly-less comparison against the running minimum).
/// Returns `None` only for an empty palette.
pub fn closest_entry(rgb: [i32; 3], palette: &Palette) -> Option<&PaletteEntry> {
    let mut best: Option<&PaletteEntry> = None;
    let mut best_d = u64::MAX;
    for entry in &palette.entries {
        let d = dist2(rgb, entry.rgb);
        if best.is_none() || d < best_d {
            best = Some(entry);
            best_d = d;
            if d == 0 {
                break;
            }
        }
    }
    best
}

/// Nearest named color for a query triple, degrading to the "Unknown"
/// sentinel when the palette has no usable entries.
pub fn closest_color(rgb: [i32; 3], palette: &Palette) -> ColorMatch {
    match closest_entry(rgb, palette) {
        Some(e) => ColorMatch {
            name: e.name.clone(),
            hex: e.hex.clone(),
            rgb: Some(e.rgb),
        },
        None => ColorMatch::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, hex: &str, rgb: [u8; 3]) -> PaletteEntry {
        PaletteEntry {
            name: name.to_owned(),
            hex: hex.to_owned(),
            rgb,
        }
    }

    fn rgb_palette() -> Palette {
        Palette {
            entries: vec![
                entry("Red", "#FF0000", [255, 0, 0]),
                entry("Green", "#00FF00", [0, 255, 0]),
                entry("Blue", "#0000FF", [0, 0, 255]),
            ],
        }
    }

    #[test]
    fn exact_match_returns_entry_at_zero_distance() {
        let pal = rgb_palette();
        for e in &pal.entries {
            let q = [e.rgb[0] as i32, e.rgb[1] as i32, e.rgb[2] as i32];
            let found = closest_entry(q, &pal).unwrap();
            assert_eq!(found.rgb, e.rgb);
        }
    }

    #[test]
    fn near_red_resolves_to_red() {
        let m = closest_color([250, 10, 10], &rgb_palette());
        assert_eq!(m.name, "Red");
        assert_eq!(m.hex, "#FF0000");
    }

    #[test]
    fn repeated_queries_agree() {
        let pal = rgb_palette();
        let a = closest_color([37, 120, 200], &pal);
        let b = closest_color([37, 120, 200], &pal);
        assert_eq!(a, b);
    }

    #[test]
    fn tie_goes_to_first_entry() {
        let pal = Palette {
            entries: vec![
                entry("First Black", "#000000", [0, 0, 0]),
                entry("Second Black", "#000000", [0, 0, 0]),
            ],
        };
        let m = closest_color([0, 0, 0], &pal);
        assert_eq!(m.name, "First Black");
    }

    #[test]
    fn equidistant_nonzero_tie_goes_to_first_entry() {
        // (5,0,0) is 25 away from both endpoints
        let pal = Palette {
            entries: vec![
                entry("Low", "#000000", [0, 0, 0]),
                entry("High", "#0a0000", [10, 0, 0]),
            ],
        };
        let m = closest_color([5, 0, 0], &pal);
        assert_eq!(m.name, "Low");
    }

    #[test]
    fn empty_palette_yields_unknown_sentinel() {
        let m = closest_color([10, 20, 30], &Palette::default());
        assert_eq!(m.name, "Unknown");
        assert_eq!(m.hex, "#000000");
        assert_eq!(m.rgb, None);
    }

    #[test]
    fn distance_ranks_closer_queries_first() {
        let e = [100, 100, 100];
        assert!(dist2([110, 100, 100], e) < dist2([150, 100, 100], e));

        let pal = Palette {
            entries: vec![
                entry("Dark", "#000000", [0, 0, 0]),
                entry("Light", "#c8c8c8", [200, 200, 200]),
            ],
        };
        assert_eq!(closest_color([10, 10, 10], &pal).name, "Dark");
        assert_eq!(closest_color([190, 190, 190], &pal).name, "Light");
    }

    #[test]
    fn extreme_query_values_do_not_overflow() {
        let pal = rgb_palette();
        let m = closest_color([i32::MAX, i32::MIN, 0], &pal);
        assert_ne!(m.name, "Unknown");
    }
}

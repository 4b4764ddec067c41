use std::io::Read;
use std::path::Path;

use log::warn;
use rust_embed::RustEmbed;
use serde::Deserialize;

/// One reference color from the palette CSV.
///
/// `hex` is stored exactly as it appears in the source file and is never
/// derived from or checked against the RGB channels. The two fields are
/// independent data and may disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    pub hex: String,
    pub rgb: [u8; 3],
}

// CSV row shape (colors.csv schema). Extra columns such as the leading
// `color` slug are ignored; a channel value outside u8 fails to parse and
// the row is skipped.
#[derive(Debug, Deserialize)]
struct RawRow {
    color_name: String,
    hex: String,
    #[serde(rename = "R")]
    r: u8,
    #[serde(rename = "G")]
    g: u8,
    #[serde(rename = "B")]
    b: u8,
}

/// Ordered reference palette, loaded once and immutable afterwards.
/// Entry order is source row order; the matcher relies on it for
/// deterministic tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Parse palette rows from CSV. A malformed row (non-numeric or
    /// out-of-range channel, missing field, empty name) is skipped with
    /// a warning so one bad row never loses the rest of the file.
    pub fn from_csv_reader(reader: impl Read) -> Result<Self, String> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut entries = Vec::new();
        for (i, row) in rdr.deserialize::<RawRow>().enumerate() {
            // header is line 1, first data row is line 2
            let line = i + 2;
            match row {
                Ok(raw) => {
                    if raw.color_name.trim().is_empty() {
                        warn!("palette line {line}: empty color name, row skipped");
                        continue;
                    }
                    entries.push(PaletteEntry {
                        name: raw.color_name,
                        hex: raw.hex,
                        rgb: [raw.r, raw.g, raw.b],
                    });
                }
                Err(e) => warn!("palette line {line}: {e}, row skipped"),
            }
        }
        Ok(Self { entries })
    }

    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, String> {
        Self::from_csv_reader(bytes)
    }

    pub fn from_path(path: &Path) -> Result<Self, String> {
        let file = std::fs::File::open(path).map_err(|e| e.to_string())?;
        Self::from_csv_reader(file)
    }

    /// The palette shipped inside the binary (assets/colors.csv).
    pub fn embedded_default() -> Self {
        match EmbeddedAssets::get("colors.csv")
            .ok_or_else(|| "colors.csv missing from embedded assets".to_owned())
            .and_then(|f| Self::from_csv_bytes(f.data.as_ref()))
        {
            Ok(p) if !p.is_empty() => p,
            Ok(_) | Err(_) => {
                warn!("embedded palette unusable, falling back to basic colors");
                Self::basic_colors()
            }
        }
    }

    /// Minimal hard-coded fallback so the app still answers queries if
    /// the embedded CSV cannot be read.
    pub fn basic_colors() -> Self {
        const BASIC: [(&str, &str, [u8; 3]); 8] = [
            ("Black", "#000000", [0, 0, 0]),
            ("White", "#ffffff", [255, 255, 255]),
            ("Red", "#ff0000", [255, 0, 0]),
            ("Green", "#008000", [0, 128, 0]),
            ("Blue", "#0000ff", [0, 0, 255]),
            ("Yellow", "#ffff00", [255, 255, 0]),
            ("Cyan", "#00ffff", [0, 255, 255]),
            ("Magenta", "#ff00ff", [255, 0, 255]),
        ];
        Self {
            entries: BASIC
                .iter()
                .map(|&(name, hex, rgb)| PaletteEntry {
                    name: name.to_owned(),
                    hex: hex.to_owned(),
                    rgb,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

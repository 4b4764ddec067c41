use eframe::egui::{self, Color32, Context, Key, Modifiers, RichText, Sense, TextureHandle};
use rfd::FileDialog;

use crate::color_match::{self, ColorMatch};
use crate::image_io;
use crate::palette::Palette;

pub struct PickerApp {
    // loaded once, immutable until the user loads another CSV
    pub palette: Palette,
    pub palette_name: String,
    pub image: Option<image::RgbaImage>,
    pub image_name: String,
    texture: Option<TextureHandle>,
    // UI state
    pub scale: f32,
    pub picked: Option<Picked>,
    pub status: String,
    pub show_palette_browser: bool,
}

/// Everything the result panel needs for one clicked pixel.
pub struct Picked {
    pub x: i32,
    pub y: i32,
    pub rgb: [u8; 3],
    pub result: ColorMatch,
}

impl PickerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        setup_theme(&cc.egui_ctx);
        let palette = Palette::embedded_default();
        let status = format!("Loaded built-in palette ({} colors)", palette.len());
        Self {
            palette,
            palette_name: "Built-in".into(),
            image: None,
            image_name: String::new(),
            texture: None,
            scale: 1.0,
            picked: None,
            status,
            show_palette_browser: false,
        }
    }

    pub fn ui_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("File", |ui| {
            if ui.button("Open Image... (Ctrl+O)").clicked() {
                ui.close_menu();
                self.action_open_image();
            }
            ui.separator();
            if ui.button("Open Palette CSV...").clicked() {
                ui.close_menu();
                self.action_open_palette();
            }
            if ui.button("Reset to Built-in Palette").clicked() {
                ui.close_menu();
                self.action_reset_palette();
            }
        });
        ui.menu_button("View", |ui| {
            ui.checkbox(&mut self.show_palette_browser, "Palette Browser");
        });
        ui.separator();
        ui.label(RichText::new(&self.status).color(Color32::LIGHT_GRAY));
    }

    fn action_open_image(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("Image", &["png", "jpg", "jpeg"])
            .pick_file()
        {
            match image_io::load_rgba(&path) {
                Ok(img) => {
                    self.status = format!(
                        "Loaded image {} ({}x{})",
                        path.display(),
                        img.width(),
                        img.height()
                    );
                    self.image_name = path
                        .file_name()
                        .and_then(|s| s.to_str())
                        .unwrap_or("image")
                        .to_owned();
                    self.image = Some(img);
                    self.texture = None;
                    self.picked = None;
                }
                Err(e) => {
                    self.status = format!("Failed to load image: {e}");
                }
            }
        }
    }

    fn action_open_palette(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("Palette CSV", &["csv"])
            .pick_file()
        {
            match Palette::from_path(&path) {
                Ok(pal) => {
                    self.status = format!(
                        "Loaded palette {} ({} usable colors)",
                        path.display(),
                        pal.len()
                    );
                    self.palette = pal;
                    self.palette_name = path
                        .file_name()
                        .and_then(|s| s.to_str())
                        .unwrap_or("palette.csv")
                        .to_owned();
                    self.picked = None;
                }
                Err(e) => {
                    self.status = format!("Failed to load palette: {e}");
                }
            }
        }
    }

    fn action_reset_palette(&mut self) {
        self.palette = Palette::embedded_default();
        self.palette_name = "Built-in".into();
        self.picked = None;
        self.status = format!("Loaded built-in palette ({} colors)", self.palette.len());
    }

    /// Resolve a canvas-local pixel coordinate to a match result.
    /// Out-of-bounds clicks never reach the matcher.
    fn pick_at(&mut self, x: i32, y: i32) {
        let Some(img) = &self.image else { return };
        match image_io::pixel_rgb(img, x, y) {
            Some(rgb) => {
                let result = color_match::closest_color(
                    [rgb[0] as i32, rgb[1] as i32, rgb[2] as i32],
                    &self.palette,
                );
                self.status = format!(
                    "({x}, {y}) RGB ({}, {}, {}) -> {}",
                    rgb[0], rgb[1], rgb[2], result.name
                );
                self.picked = Some(Picked { x, y, rgb, result });
            }
            None => {
                self.status = format!("Clicked outside the image bounds ({x}, {y})");
            }
        }
    }

    fn ensure_texture(&mut self, ctx: &Context) {
        if self.texture.is_some() {
            return;
        }
        let Some(img) = &self.image else { return };
        // guard against pathological sizes before the RGBA copy
        let pixels = img.width() as u64 * img.height() as u64;
        if pixels == 0 || pixels > 64_000_000 {
            let fallback = egui::ColorImage::from_rgba_unmultiplied([1, 1], &[0, 0, 0, 255]);
            self.texture =
                Some(ctx.load_texture("picker_image_err", fallback, egui::TextureOptions::NEAREST));
            self.status = "Image too large to display".into();
            return;
        }
        let size = [img.width() as usize, img.height() as usize];
        let color_img = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
        self.texture = Some(ctx.load_texture("picker_image", color_img, egui::TextureOptions::NEAREST));
    }

    fn ui_result_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Detected Color");
        match &self.picked {
            Some(p) => {
                ui.horizontal(|ui| {
                    ui.label("Pixel");
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(40.0, 18.0), Sense::hover());
                    ui.painter().rect_filled(
                        rect,
                        2.0,
                        Color32::from_rgb(p.rgb[0], p.rgb[1], p.rgb[2]),
                    );
                });
                if let Some(rgb) = p.result.rgb {
                    ui.horizontal(|ui| {
                        ui.label("Match");
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(40.0, 18.0), Sense::hover());
                        ui.painter()
                            .rect_filled(rect, 2.0, Color32::from_rgb(rgb[0], rgb[1], rgb[2]));
                    });
                }
                ui.strong(&p.result.name);
                ui.monospace(&p.result.hex);
                ui.label(format!("Clicked at ({}, {})", p.x, p.y));
                ui.label(format!(
                    "Pixel RGB ({}, {}, {})",
                    p.rgb[0], p.rgb[1], p.rgb[2]
                ));
            }
            None => {
                ui.label("Click a pixel on the image to detect its color.");
            }
        }
    }

    fn ui_palette_browser(&mut self, ctx: &Context) {
        let palette = &self.palette;
        egui::Window::new("Palette Browser")
            .open(&mut self.show_palette_browser)
            .default_width(360.0)
            .show(ctx, |ui| {
                use egui_extras::{Column, TableBuilder};
                ui.label(format!("{} entries", palette.len()));
                ui.separator();
                TableBuilder::new(ui)
                    .striped(true)
                    .column(Column::exact(28.0))
                    .column(Column::auto().at_least(140.0))
                    .column(Column::auto().at_least(70.0))
                    .column(Column::remainder())
                    .header(18.0, |mut header| {
                        header.col(|_| {});
                        header.col(|ui| {
                            ui.strong("Name");
                        });
                        header.col(|ui| {
                            ui.strong("Hex");
                        });
                        header.col(|ui| {
                            ui.strong("RGB");
                        });
                    })
                    .body(|body| {
                        body.rows(18.0, palette.len(), |mut row| {
                            let e = &palette.entries[row.index()];
                            row.col(|ui| {
                                let (rect, _) =
                                    ui.allocate_exact_size(egui::vec2(18.0, 12.0), Sense::hover());
                                ui.painter().rect_filled(
                                    rect,
                                    2.0,
                                    Color32::from_rgb(e.rgb[0], e.rgb[1], e.rgb[2]),
                                );
                            });
                            row.col(|ui| {
                                ui.label(&e.name);
                            });
                            row.col(|ui| {
                                ui.monospace(&e.hex);
                            });
                            row.col(|ui| {
                                ui.label(format!("({}, {}, {})", e.rgb[0], e.rgb[1], e.rgb[2]));
                            });
                        });
                    });
            });
    }
}

fn setup_theme(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals::dark());
}

impl eframe::App for PickerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                self.ui_menu(ui);
            });
        });

        egui::SidePanel::left("left")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Image");
                if self.image.is_some() {
                    ui.label(&self.image_name);
                } else {
                    ui.label("No image loaded");
                }
                ui.label("Zoom");
                ui.add(egui::Slider::new(&mut self.scale, 0.25..=12.0));
                ui.separator();
                ui.heading("Palette");
                ui.label(format!("{} ({} colors)", self.palette_name, self.palette.len()));
                ui.separator();
                self.ui_result_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ensure_texture(ctx);
            let mut clicked_px: Option<(i32, i32)> = None;
            if let (Some(img), Some(tex)) = (&self.image, &self.texture) {
                let img_w = img.width();
                let img_h = img.height();
                egui::ScrollArea::both().show(ui, |ui| {
                    let size = egui::vec2(img_w as f32, img_h as f32) * self.scale;
                    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
                    // checkerboard backdrop so transparent pixels stay visible
                    {
                        let sq = 8.0_f32.max(self.scale);
                        let dark = Color32::from_gray(60);
                        let light = Color32::from_gray(90);
                        let mut y = rect.top();
                        let mut row = 0;
                        while y < rect.bottom() {
                            let mut x = rect.left();
                            let mut col = row % 2;
                            while x < rect.right() {
                                let r = egui::Rect::from_min_size(
                                    egui::pos2(x, y),
                                    egui::vec2(sq, sq),
                                );
                                let c = if col % 2 == 0 { light } else { dark };
                                ui.painter().rect_filled(r.intersect(rect), 0.0, c);
                                x += sq;
                                col += 1;
                            }
                            y += sq;
                            row += 1;
                        }
                    }
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter().image(tex.id(), rect, uv, Color32::WHITE);

                    if response.clicked() {
                        if let Some(pos) = response.interact_pointer_pos() {
                            // fractional widget coords truncate to pixel indices
                            let local = (pos - rect.min) / self.scale;
                            clicked_px = Some((local.x.floor() as i32, local.y.floor() as i32));
                        }
                    }
                    response.on_hover_cursor(egui::CursorIcon::Crosshair);
                });
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Open an image (File > Open Image...) and click a pixel.");
                });
            }
            if let Some((x, y)) = clicked_px {
                self.pick_at(x, y);
            }
        });

        if self.show_palette_browser {
            self.ui_palette_browser(ctx);
        }

        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::O)) {
            self.action_open_image();
        }
    }
}

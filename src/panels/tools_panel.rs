use egui::Slider;

use crate::WavyPenApp;
use crate::geometry::{MAX_ZOOM, MIN_ZOOM};

pub fn tools_panel(app: &mut WavyPenApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading(format!("{} pen", app.tool().name()));
            ui.separator();

            let settings = app.settings_mut();

            ui.horizontal(|ui| {
                ui.label("Color:");
                egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut settings.color,
                    egui::color_picker::Alpha::OnlyBlend,
                );
            });
            ui.add(Slider::new(&mut settings.base_width, 0.5..=50.0).text("Width"));

            ui.separator();
            ui.label("Thickness wave");
            let wave = &mut settings.wave;
            ui.add(Slider::new(&mut wave.amplitude, 0.0..=50.0).text("Amplitude"));
            ui.add(
                Slider::new(&mut wave.frequency, 0.0..=0.5)
                    .logarithmic(true)
                    .text("Frequency"),
            );

            ui.separator();
            ui.label("Speed taper");
            ui.add(
                Slider::new(&mut wave.speed_reduction_factor, 0.0..=0.5)
                    .logarithmic(true)
                    .text("Factor"),
            );
            ui.add(Slider::new(&mut wave.max_speed_for_tapering, 1.0..=1000.0).text("Max speed"));
            ui.add(Slider::new(&mut wave.min_stroke_width, 0.0..=10.0).text("Min width"));

            ui.small("Changes apply to the next stroke.");
            if ui.button("Reset pen").clicked() {
                log::info!("Pen settings reset to defaults");
                *settings = Default::default();
            }

            ui.separator();
            let mut zoom = app.viewport().zoom();
            if ui
                .add(Slider::new(&mut zoom, MIN_ZOOM..=MAX_ZOOM).logarithmic(true).text("Zoom"))
                .changed()
            {
                app.viewport_mut().set_zoom(zoom);
            }

            let mut show_dirty_rect = app.renderer().show_dirty_rect();
            if ui.checkbox(&mut show_dirty_rect, "Show stroke bounds").changed() {
                app.renderer_mut().set_show_dirty_rect(show_dirty_rect);
            }

            ui.separator();
            ui.label(format!("Strokes: {}", app.document().len()));
            if ui
                .add_enabled(!app.document().is_empty(), egui::Button::new("Clear canvas"))
                .clicked()
            {
                app.clear_canvas();
            }
        });
}

use crate::WavyPenApp;

pub fn central_panel(app: &mut WavyPenApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;

            // Canvas origin follows the panel's top-left corner
            app.viewport_mut().offset = canvas_rect.min.to_vec2();

            app.handle_input(ctx, canvas_rect);

            app.renderer()
                .render(&painter, canvas_rect, app.viewport(), app.document(), app.tool());

            if app.tool().is_drawing() {
                ctx.request_repaint();
            }
        });
}

use crate::config::PenSettings;
use crate::document::Document;
use crate::geometry::Viewport;
use crate::input::InputHandler;
use crate::panels;
use crate::renderer::Renderer;
use crate::tools::PenTool;

/// We derive Deserialize/Serialize so we can persist pen settings on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct WavyPenApp {
    settings: PenSettings,
    viewport: Viewport,
    #[serde(skip)]
    renderer: Renderer,
    // Strokes are not persisted
    #[serde(skip)]
    document: Document,
    #[serde(skip)]
    tool: PenTool,
    #[serde(skip)]
    input: InputHandler,
}

impl WavyPenApp {
    /// Called once before the first frame.
    ///
    /// `settings` overrides whatever was restored from storage.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Option<PenSettings>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        if let Err(err) = app.settings.validate() {
            log::warn!("Restored pen settings are invalid ({err}); using defaults");
            app.settings = PenSettings::default();
        }
        let zoom = app.viewport.zoom();
        app.viewport.set_zoom(zoom);

        if let Some(settings) = settings {
            app.settings = settings;
        }

        app
    }

    pub fn settings(&self) -> &PenSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut PenSettings {
        &mut self.settings
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tool(&self) -> &PenTool {
        &self.tool
    }

    pub fn clear_canvas(&mut self) {
        self.tool.cancel();
        self.document.clear();
    }

    /// Feed this frame's pointer input to the pen; finished strokes land in the document.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        for event in self.input.process_input(ctx, canvas_rect, &self.viewport) {
            if let Some(stroke) = self.tool.handle_event(&event, &self.settings, &self.viewport) {
                self.document.add_stroke(stroke);
            }
        }
    }
}

impl eframe::App for WavyPenApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
    }
}

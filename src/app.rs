use std::time::Instant;

use crate::input::InputHandler;
use crate::renderer::Renderer;
use crate::session::Session;

/// The eframe shell around a `Session`: feeds it the frame's input, shows
/// its display and closes the window when it stops running.
pub struct PaintApp {
    session: Session,
    input: InputHandler,
    renderer: Renderer,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, session: Session) -> Self {
        let input = InputHandler::new(session.config());
        let renderer = Renderer::new(&cc.egui_ctx, session.display());

        Self {
            session,
            input,
            renderer,
        }
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting; one paint frame per call.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let renderer = &self.renderer;
        let events = self
            .input
            .process_input(ctx, |pos| renderer.screen_to_canvas(pos), Instant::now());
        let display = self.session.frame(&events);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let rect = self.renderer.fit_rect(ui.max_rect());
                let response = ui.allocate_rect(rect, egui::Sense::hover());
                if response.hovered() {
                    // the active tool draws its own cursor
                    ctx.set_cursor_icon(egui::CursorIcon::None);
                }
                self.renderer.render(ui.painter(), rect, display);
            });

        if !self.session.is_running() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        ctx.request_repaint_after(self.session.config().frame_interval());
    }
}

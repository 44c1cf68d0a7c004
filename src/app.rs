use eframe::egui;
use std::sync::mpsc::{self, Receiver};
use crate::shell::{self, ShellCommand, HELP};
use crate::state::session::{PlotSession, SessionConfig};
use crate::state::visibility::VisibilityAction;
use crate::ui::graph_panel::{self, GraphAction, SessionPoints};

pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// One font size for titles, legends and axes, in black on white like printed figures.
pub fn plot_style(base: &egui::Style, font_size: f32) -> egui::Style {
    let mut style = base.clone();
    for text_style in [
        egui::TextStyle::Body,
        egui::TextStyle::Button,
        egui::TextStyle::Heading,
        egui::TextStyle::Small,
    ] {
        style.text_styles.insert(text_style, egui::FontId::proportional(font_size));
    }
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::monospace(font_size),
    );
    style.spacing.item_spacing = egui::vec2(6.0, 6.0);

    let mut visuals = egui::Visuals::light();
    visuals.override_text_color = Some(egui::Color32::BLACK);
    visuals.extreme_bg_color = egui::Color32::WHITE;
    visuals.panel_fill = egui::Color32::WHITE;
    style.visuals = visuals;
    style
}

/// The main logplotter window.
pub struct LogPlotterApp {
    config: SessionConfig,
    session: PlotSession,
    /// Downsampled points, rebuilt with the session.
    points: SessionPoints,
    /// Push configured axis ranges on the next frame.
    reset_view: bool,
    /// Commands from the stdin shell, when `-i` was given.
    commands: Option<Receiver<ShellCommand>>,
    /// An error message shown in the footer until dismissed.
    error_message: Option<String>,
    show_diagnostics: bool,
}

impl LogPlotterApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: SessionConfig,
        session: PlotSession,
        interactive: bool,
        font_size: f32,
    ) -> Self {
        let ctx = &cc.egui_ctx;
        ctx.set_style(plot_style(&ctx.style(), font_size));

        let commands = interactive.then(|| {
            let (tx, rx) = mpsc::channel();
            shell::spawn_stdin_reader(tx, ctx.clone());
            println!("{HELP}");
            rx
        });

        Self {
            points: graph_panel::prepare_points(&session),
            show_diagnostics: !session.diagnostics.is_empty(),
            config,
            session,
            reset_view: true,
            commands,
            error_message: None,
        }
    }

    fn apply(&mut self, action: VisibilityAction) {
        self.session.apply(action);
        if action == VisibilityAction::Restore {
            self.reset_view = true;
        }
    }

    fn resize(&mut self, row: usize, col: usize, width: f32, height: f32) {
        if !self.session.resize(row, col, width, height) {
            self.error_message = Some(format!("cannot resize plot ({row}, {col}) to {width} x {height}"));
        }
    }

    /// Re-read the log and both configs. The old session stays on failure.
    fn reload(&mut self) {
        match PlotSession::load(&self.config) {
            Ok(session) => {
                tracing::info!("Reloaded {:?}", self.config.log_path);
                self.points = graph_panel::prepare_points(&session);
                self.show_diagnostics = !session.diagnostics.is_empty();
                self.session = session;
                self.reset_view = true;
                self.error_message = None;
            }
            Err(e) => {
                tracing::error!("Reload failed: {e}");
                self.error_message = Some(format!("Reload failed: {e}"));
            }
        }
    }

    /// Drain pending shell commands; `quit` closes the window.
    fn handle_commands(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.commands else {
            return;
        };
        let pending: Vec<ShellCommand> = rx.try_iter().collect();
        for command in pending {
            match command {
                ShellCommand::Help => println!("{HELP}"),
                ShellCommand::List => {
                    for line in self.session.summary() {
                        println!("{line}");
                    }
                }
                ShellCommand::Diagnostics => {
                    if self.session.diagnostics.is_empty() {
                        println!("no diagnostics");
                    }
                    for d in &self.session.diagnostics {
                        println!("{d}");
                    }
                }
                ShellCommand::Visibility(action) => self.apply(action),
                ShellCommand::Resize { row, col, width, height } => self.resize(row, col, width, height),
                ShellCommand::Reload => self.reload(),
                ShellCommand::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }
    }
}

impl eframe::App for LogPlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ------------------------------------------------------------------
        // 1. Shell commands queued since the last frame
        // ------------------------------------------------------------------
        self.handle_commands(ctx);

        // ------------------------------------------------------------------
        // 2. Footer: counts, reload, diagnostics toggle, errors
        // ------------------------------------------------------------------
        let mut reload = false;
        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(12, 4)))
            .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let total = self.session.cells.len();
                let shown = self.session.visibility.visible_count();
                ui.label(egui::RichText::new(format!("{shown}/{total} plots")).weak());
                ui.separator();
                if ui.small_button("Reload").clicked() {
                    reload = true;
                }
                let count = self.session.diagnostics.len();
                if count > 0 {
                    ui.separator();
                    ui.toggle_value(&mut self.show_diagnostics, format!("{count} diagnostics"));
                }

                if let Some(msg) = &self.error_message {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(200, 40, 40), msg);
                    if ui.small_button("dismiss").clicked() {
                        self.error_message = None;
                    }
                }
            });
        });
        if reload {
            self.reload();
        }

        if self.show_diagnostics && !self.session.diagnostics.is_empty() {
            egui::TopBottomPanel::bottom("diagnostics")
                .resizable(true)
                .default_height(120.0)
                .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for d in &self.session.diagnostics {
                        ui.monospace(d.to_string());
                    }
                });
            });
        }

        // ------------------------------------------------------------------
        // 3. The plot grid
        // ------------------------------------------------------------------
        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            action = graph_panel::show_grid(ui, &self.session, &self.points, self.reset_view);
        });
        self.reset_view = false;
        match action {
            Some(GraphAction::Visibility(action)) => self.apply(action),
            Some(GraphAction::Resize { row, col, width, height }) => self.resize(row, col, width, height),
            None => {}
        }
    }
}

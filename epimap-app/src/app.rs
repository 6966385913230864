use epimap::{
    ui::{CanvasStyle, LegendComponent, MapCanvas, TableComponent},
    Autoplay, Gradient, RenderContext, Step, Visualizer, VisualizerOptions,
};
use std::path::PathBuf;

/// The main application struct
pub struct EpimapApp {
    visualizer: Visualizer,
    autoplay: Autoplay,
    running: bool,
    looping: bool,
    run_speed_ms: u64,
    path_input: String,
    status: Option<String>,
    style: CanvasStyle,
}

impl EpimapApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        options: VisualizerOptions,
        data: Option<PathBuf>,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let autoplay = Autoplay::new(options.playback.run_interval());
        let looping = options.playback.looping;
        let run_speed_ms = options.playback.run_speed_ms;

        let mut app = Self {
            visualizer: Visualizer::new(options),
            autoplay,
            running: false,
            looping,
            run_speed_ms,
            path_input: data
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            status: None,
            style: CanvasStyle::default(),
        };
        if data.is_some() {
            app.load();
        }
        app
    }

    fn load(&mut self) {
        let path = self.path_input.trim().to_string();
        match self.visualizer.load_file(&path) {
            Ok(_) => {
                self.status = None;
                self.set_running(false);
            }
            Err(err) => self.status = Some(format!("Could not load {}: {}", path, err)),
        }
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
        if !running {
            self.autoplay.stop();
            return;
        }
        if let Err(err) = self.autoplay.start() {
            log::error!("Autoplay unavailable: {}", err);
            self.status = Some(err.to_string());
            self.running = false;
        }
    }

    fn step_autoplay(&mut self) {
        if self.autoplay.drain() == 0 {
            return;
        }
        if let Ok(session) = self.visualizer.session_mut() {
            if session.advance(self.looping) == Step::Finished {
                self.set_running(false);
            }
        }
    }

    fn file_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Simulation file:");
            let response = ui.text_edit_singleline(&mut self.path_input);
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Load").clicked() || submitted {
                self.load();
            }
            if let Some(status) = &self.status {
                ui.colored_label(egui::Color32::from_rgb(200, 40, 40), status.as_str());
            }
        });
    }

    fn day_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let Ok(session) = self.visualizer.session_mut() else {
                ui.label("No simulation loaded");
                return;
            };

            if ui.button("◀").clicked() {
                session.prev_day();
            }
            let mut day = session.day();
            let last = session.max_days().saturating_sub(1);
            if ui
                .add(egui::Slider::new(&mut day, 0..=last).show_value(false))
                .changed()
            {
                session.update_day(day as i64);
            }
            if ui.button("▶").clicked() {
                session.next_day();
            }

            ui.label(format!("Day {} / {}", session.display_day(), session.max_days()));
            ui.label(format!("Total infected: {}", session.total_infected()));
            ui.separator();

            let current = session.gradient().name().to_string();
            let mut selected = current.clone();
            egui::ComboBox::from_label("Gradient")
                .selected_text(selected.clone())
                .show_ui(ui, |ui| {
                    for name in Gradient::names() {
                        ui.selectable_value(&mut selected, name.clone(), name);
                    }
                });
            if selected != current {
                if let Err(err) = session.select_gradient(&selected) {
                    log::warn!("{}", err);
                }
            }
        });

        ui.horizontal(|ui| {
            let mut running = self.running;
            if ui.checkbox(&mut running, "Run").changed() {
                self.set_running(running);
            }
            ui.checkbox(&mut self.looping, "Loop");
            ui.separator();

            let speed = ui.add(
                egui::Slider::new(&mut self.run_speed_ms, 10..=1000)
                    .logarithmic(true)
                    .suffix(" ms")
                    .text("Step delay"),
            );
            if speed.changed() {
                let interval = std::time::Duration::from_millis(self.run_speed_ms);
                if let Err(err) = self.autoplay.set_interval(interval) {
                    log::error!("Autoplay unavailable: {}", err);
                    self.status = Some(err.to_string());
                    self.running = false;
                }
            }
        });
    }
}

impl eframe::App for EpimapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.step_autoplay();
        if self.running {
            ctx.request_repaint_after(self.autoplay.interval());
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.file_bar(ui);
            ui.add_enabled_ui(self.visualizer.is_loaded(), |ui| self.day_controls(ui));
        });

        egui::SidePanel::right("table_panel")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| {
                if let Ok(session) = self.visualizer.session() {
                    ui.heading("Legend");
                    LegendComponent::show(ui, &session.legend(), &self.style);
                    ui.separator();
                    TableComponent::show(ui, &session.table());
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Ok(session) = self.visualizer.session_mut() else {
                ui.centered_and_justified(|ui| ui.label("Open a simulation file to begin"));
                return;
            };

            let frame = RenderContext::for_viewport(session.viewport()).and_then(
                |mut context| {
                    session.render(&mut context)?;
                    Ok(context)
                },
            );
            match frame {
                Ok(context) => {
                    MapCanvas::show(ui, &context, &self.style);
                }
                Err(err) => {
                    ui.label(format!("Render failed: {}", err));
                }
            }
        });
    }
}

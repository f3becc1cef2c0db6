use std::time::{Duration, Instant};

use client_core::{resolve_redirect, FormView, SelectionController, SubmitError, SubmitPhase};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const GRID_COLUMNS: usize = 10;
const CELL_SIZE: [f32; 2] = [40.0, 32.0];
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub base_url: Url,
    pub submit_label: String,
}

pub struct LottoFormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: SelectionController,
    base_url: Url,
    name_draft: String,
    status: String,
    fatal_error: Option<UiError>,
    /// Set once the server accepted the games; the form is replaced by the
    /// submitted panel from then on.
    redirected_to: Option<String>,
}

impl LottoFormApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: SelectionController::new(startup.submit_label),
            base_url: startup.base_url,
            name_draft: String::new(),
            status: "Starting".to_string(),
            fatal_error: None,
            redirected_to: None,
        }
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), category = ?err.category(), "{}", err.message());
                    self.status = err.message().to_string();
                    if err.is_fatal() {
                        self.fatal_error = Some(err);
                    }
                }
                UiEvent::SubmitSettled(result) => {
                    let phase = self.controller.finish_submit(result, Instant::now()).clone();
                    if let SubmitPhase::Redirecting { target } = phase {
                        self.follow_redirect(ctx, &target);
                    }
                }
            }
        }
    }

    fn follow_redirect(&mut self, ctx: &egui::Context, target: &str) {
        match resolve_redirect(&self.base_url, target) {
            Ok(url) => {
                tracing::info!(%url, "opening submission result");
                ctx.open_url(egui::OpenUrl::same_tab(url.as_str()));
                self.status = format!("Submitted. Opened {url}");
                self.redirected_to = Some(url.into());
            }
            Err(err) => {
                tracing::warn!(%target, "unusable redirect target: {err}");
                self.status = format!("Submitted, but the result page '{target}' is not a valid url");
                self.redirected_to = Some(target.to_string());
            }
        }
    }

    fn start_submit(&mut self) {
        let now = Instant::now();
        let Ok(request) = self.controller.begin_submit(now) else {
            return;
        };
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::Submit { request })
        {
            self.status = err.message().to_string();
            self.controller
                .finish_submit(Err(SubmitError::transport(err.message())), now);
        }
    }

    fn show_form(&mut self, ctx: &egui::Context, view: &FormView) {
        let now = Instant::now();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Pick your games");
            ui.label("Choose 6 numbers from 1 to 60 for each game, up to 5 games.");
            ui.add_space(8.0);

            egui::Grid::new("number_grid")
                .spacing([4.0, 4.0])
                .show(ui, |ui| {
                    for (position, cell) in view.cells.iter().enumerate() {
                        let button = egui::Button::new(cell.number.to_string())
                            .selected(cell.selected)
                            .min_size(egui::vec2(CELL_SIZE[0], CELL_SIZE[1]));
                        if ui.add(button).clicked() {
                            let _ = self.controller.toggle_number(cell.number, now);
                        }
                        if (position + 1) % GRID_COLUMNS == 0 {
                            ui.end_row();
                        }
                    }
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Random").clicked() {
                    self.controller.randomize();
                }
                if ui
                    .add_enabled(view.add_game_enabled, egui::Button::new("Add game"))
                    .clicked()
                {
                    self.controller.commit_game();
                }
            });

            ui.add_space(8.0);
            ui.label(format!("Games ({}/{})", view.game_count, shared::domain::MAX_GAMES));
            for row in &view.games {
                ui.horizontal(|ui| {
                    ui.monospace(row.label.as_str());
                    if ui.small_button("✕").on_hover_text("Remove game").clicked() {
                        self.controller.remove_game(row.index);
                    }
                });
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Full name");
                if ui.text_edit_singleline(&mut self.name_draft).changed() {
                    self.controller.set_full_name(self.name_draft.clone());
                }
            });

            if let Some(error) = &view.error {
                ui.colored_label(ERROR_COLOR, error.as_str());
            }

            ui.add_space(8.0);
            if ui
                .add_enabled(view.submit_enabled, egui::Button::new(view.submit_label.as_str()))
                .clicked()
            {
                self.start_submit();
            }
        });
    }

    fn show_submitted(&self, ctx: &egui::Context, target: &str) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Games submitted");
            if Url::parse(target).is_ok() {
                ui.label("Your result page was opened in the browser.");
                ui.hyperlink(target);
            } else {
                ui.label("The server accepted your games but sent an unusable result page:");
                ui.monospace(target);
            }
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| match &self.fatal_error {
            Some(err) => {
                ui.colored_label(ERROR_COLOR, err.message());
            }
            None => {
                ui.small(self.status.as_str());
            }
        });
    }
}

impl eframe::App for LottoFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);

        let now = Instant::now();
        self.controller.expire_notices(now);

        self.show_status_bar(ctx);
        match self.redirected_to.clone() {
            Some(target) => self.show_submitted(ctx, &target),
            None => {
                let view = self.controller.view(now);
                self.show_form(ctx, &view);
            }
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

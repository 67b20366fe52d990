// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the studio flows.
//!
//! The `App` struct owns the whole session: the selected image, prompt and
//! style, the generate controller, and the history with its thumbnails.
//! `update` is the only writer. It translates messages into side effects
//! like preprocessing, generation streams, thumbnail decoding and history
//! persistence.

pub mod config;
pub mod history;
mod message;
pub mod paths;
mod session;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use session::{Banner, SelectedImage, Upload};

use crate::application::controller::GenerationController;
use crate::application::port::GenerationService;
use crate::domain::generation::{GenerationId, StyleTag};
use crate::i18n::fluent::I18n;
use crate::infrastructure::{MockGenerationService, RandomGate};
use crate::ui::studio::Thumbnail;
use crate::ui::theming::ThemeMode;
use history::History;
use iced::{window, Element, Subscription, Task, Theme};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    theme_mode: ThemeMode,
    /// Explicit data directory for the history file, if any.
    data_dir: Option<PathBuf>,
    service: Arc<dyn GenerationService>,
    controller: GenerationController,
    upload: Upload,
    /// Tag of the latest preprocessing task.
    upload_ticket: u64,
    prompt: String,
    style: StyleTag,
    history: History,
    thumbnails: HashMap<GenerationId, Thumbnail>,
    banner: Option<Banner>,
    spinner_rotation: f32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("upload", &self.upload)
            .field("controller", &self.controller.state())
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 820;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
pub const MIN_WINDOW_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 800;

/// Builds the window settings.
#[allow(clippy::cast_precision_loss)]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a Fn boot; the flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_else(|| {
            log::warn!("Boot called more than once, starting with default flags");
            Flags::default()
        });
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads config and history, then kicks off thumbnail decoding and the
    /// optional startup file.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load_with_override(flags.config_dir.clone());
        let generation = &config.generation;
        let gate = RandomGate::new(
            generation.latency_window_ms(),
            generation.failure_rate(),
            generation.seed,
        );
        let service: Arc<dyn GenerationService> = Arc::new(MockGenerationService::new(gate));
        Self::with_service(flags, &config, config_warning, service)
    }

    fn with_service(
        flags: Flags,
        config: &config::Config,
        config_warning: Option<String>,
        service: Arc<dyn GenerationService>,
    ) -> (Self, Task<Message>) {
        let history = History::load_from(flags.data_dir.clone());

        let mut app = App {
            i18n: I18n::new(flags.lang.clone(), config),
            theme_mode: config.general.theme_mode,
            data_dir: flags.data_dir.clone(),
            service,
            controller: GenerationController::default(),
            upload: Upload::Empty,
            upload_ticket: 0,
            prompt: String::new(),
            style: config.generation.default_style(),
            history,
            thumbnails: HashMap::new(),
            banner: config_warning.map(Banner::Notice),
            spinner_rotation: 0.0,
        };

        let mut tasks: Vec<Task<Message>> = app
            .history
            .entries()
            .iter()
            .map(|record| {
                app.thumbnails.insert(record.id().clone(), Thumbnail::Loading);
                update::load_thumbnail(record.id().clone(), record.image_url().to_owned())
            })
            .collect();

        if let Some(path) = flags.file_path {
            let mut ctx = app.update_context();
            tasks.push(update::handle_file_selected(&mut ctx, PathBuf::from(path)));
        }

        (app, Task::batch(tasks))
    }

    fn update_context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            upload: &mut self.upload,
            upload_ticket: &mut self.upload_ticket,
            prompt: &mut self.prompt,
            style: &mut self.style,
            controller: &mut self.controller,
            service: &self.service,
            history: &mut self.history,
            thumbnails: &mut self.thumbnails,
            banner: &mut self.banner,
            spinner_rotation: &mut self.spinner_rotation,
            data_dir: self.data_dir.clone(),
            dialog_filter_name: self.i18n.tr("dialog-filter-images"),
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.is_busy()),
        ])
    }

    /// Whether any spinner is on screen.
    fn is_busy(&self) -> bool {
        self.upload.is_processing()
            || self.controller.is_requesting()
            || self.thumbnails.values().any(Thumbnail::is_loading)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.update_context();

        match message {
            Message::Studio(studio_message) => {
                update::handle_studio_message(&mut ctx, studio_message)
            }
            Message::OpenFileDialogResult(None) => Task::none(),
            Message::OpenFileDialogResult(Some(path)) | Message::FileDropped(path) => {
                update::handle_file_selected(&mut ctx, path)
            }
            Message::PreviewReady { ticket, result } => {
                update::handle_preview_ready(&mut ctx, ticket, result)
            }
            Message::Generation { ticket, progress } => {
                update::handle_generation_progress(&mut ctx, ticket, progress)
            }
            Message::ThumbnailLoaded { id, result } => {
                update::handle_thumbnail_loaded(&mut ctx, &id, result);
                Task::none()
            }
            Message::Tick(_) => {
                update::handle_tick(&mut ctx);
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}

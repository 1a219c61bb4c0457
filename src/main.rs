use iced::keyboard::{self, key};
use iced::widget::{button, column, row, text, Space};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use std::time::{Duration, Instant};

mod config;
mod images;
mod logging;
mod navigation;
mod state;
mod ui;

use config::{Config, ThemeChoice};
use images::{PosterCache, Tier};
use navigation::{Destination, NavRequest};
use state::catalog::{ItemSource, JsonCatalog, SeedCatalog};
use state::data::RowList;
use ui::detail_screen::{DetailMessage, DetailScreen};
use ui::list_screen::{Action, ListMessage, ListScreen, PosterRequest};

/// Which screen is on top
enum Screen {
    List,
    Detail(DetailScreen),
}

/// Main application state
struct PosterList {
    config: Config,
    /// Where rows come from (built-in or a JSON catalog)
    source: Box<dyn ItemSource>,
    /// Stays alive underneath the detail screen
    list: ListScreen,
    screen: Screen,
    cache: Option<PosterCache>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    List(ListMessage),
    Detail(DetailMessage),
    /// Escape key or the back button
    Back,
    /// Re-read the data source and submit it
    Reload,
}

impl PosterList {
    /// Create a new instance of the application
    fn new(config: Config) -> (Self, Task<Message>) {
        let source: Box<dyn ItemSource> = match &config.catalog {
            Some(path) => Box::new(JsonCatalog::new(path)),
            None => Box::new(SeedCatalog),
        };

        let cache = config.poster_cache();
        match &cache {
            Some(cache) => tracing::info!("📁 Poster cache at: {}", cache.root().display()),
            None => tracing::warn!("no cache directory available, posters load uncached"),
        }

        let mut app = PosterList {
            list: ListScreen::new(config.image_base.clone()),
            screen: Screen::List,
            source,
            cache,
            status: String::new(),
            config,
        };

        let task = app.reload();
        tracing::info!("🎬 Poster list initialized with {} items", app.list.item_count());

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::List(message) => {
                let action = self.list.update(message);
                self.perform(action)
            }
            Message::Detail(DetailMessage::Back) | Message::Back => {
                self.navigate(navigation::back_to_list())
            }
            Message::Detail(message) => {
                if let Screen::Detail(detail) = &mut self.screen {
                    detail.update(message);
                }
                Task::none()
            }
            Message::Reload => self.reload(),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match &self.screen {
            Screen::List => {
                let header = row![
                    text("Posters").size(32),
                    Space::with_width(Length::Fill),
                    text(&self.status).size(14),
                    button("Reload").on_press(Message::Reload).padding(8),
                ]
                .spacing(16)
                .padding(16)
                .align_y(Alignment::Center);

                column![header, self.list.view().map(Message::List)].into()
            }
            Screen::Detail(detail) => detail.view().map(Message::Detail),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.config.theme {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let back = keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(key::Named::Escape) => Some(Message::Back),
            _ => None,
        });

        let animating = matches!(&self.screen, Screen::Detail(detail) if detail.is_animating());
        let tick = if animating {
            iced::time::every(Duration::from_millis(16))
                .map(|now| Message::Detail(DetailMessage::Tick(now)))
        } else {
            Subscription::none()
        };

        Subscription::batch([back, tick])
    }

    /// Load rows from the source and submit them through the reconciler.
    /// A failing source falls back to the built-in catalog for this load
    /// only; the next reload reads the configured source again.
    fn reload(&mut self) -> Task<Message> {
        let rows: RowList = match self.source.load() {
            Ok(rows) => {
                self.status = format!("{} items from {}", rows.len(), self.source.name());
                rows
            }
            Err(e) => {
                tracing::warn!("⚠️  {}; using the built-in catalog", e);
                let rows = SeedCatalog.load().unwrap_or_default();
                self.status = format!("{} items from {} (catalog failed)", rows.len(), SeedCatalog.name());
                rows
            }
        };

        let action = self.list.submit(rows);
        self.perform(action)
    }

    /// Turn a list screen action into tasks or a screen switch
    fn perform(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::None => Task::none(),
            Action::LoadPosters(requests) => {
                Task::batch(requests.into_iter().map(|request| self.load_row_poster(request)))
            }
            Action::Navigate(request) => self.navigate(request),
        }
    }

    fn navigate(&mut self, request: NavRequest) -> Task<Message> {
        match request.destination {
            Destination::List => {
                if matches!(self.screen, Screen::Detail(_)) {
                    tracing::debug!("back to list");
                }
                self.screen = Screen::List;
                Task::none()
            }
            Destination::Detail => {
                let detail = DetailScreen::new(
                    &request.params,
                    request.transition.as_ref(),
                    self.config.transition_duration(),
                    Instant::now(),
                );
                let task = match detail.image_ref() {
                    Some(reference) => {
                        let reference = reference.to_string();
                        Task::perform(
                            images::load_poster(reference.clone(), Tier::Full, self.cache.clone()),
                            move |handle| {
                                Message::Detail(DetailMessage::PosterLoaded {
                                    reference: reference.clone(),
                                    handle,
                                })
                            },
                        )
                    }
                    None => Task::none(),
                };
                self.screen = Screen::Detail(detail);
                task
            }
        }
    }

    fn load_row_poster(&self, request: PosterRequest) -> Task<Message> {
        let PosterRequest {
            slot,
            generation,
            reference,
        } = request;

        Task::perform(
            images::load_poster(reference, Tier::Thumb, self.cache.clone()),
            move |handle| {
                Message::List(ListMessage::PosterLoaded {
                    slot,
                    generation,
                    handle,
                })
            },
        )
    }
}

fn main() -> iced::Result {
    // Config comes first so the log level can be taken from it
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("⚠️  Logging disabled: {}", e);
    }
    if let Some(e) = config_error {
        tracing::warn!("⚠️  {}; using defaults", e);
    }

    iced::application("Poster List", PosterList::update, PosterList::view)
        .theme(PosterList::theme)
        .subscription(PosterList::subscription)
        .centered()
        .run_with(move || PosterList::new(config))
}

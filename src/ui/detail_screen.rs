//! Full-size poster screen
//!
//! Built from the navigation parameters alone: the poster reference is
//! the only input and doubles as the shared-element transition key.

use std::time::{Duration, Instant};

use iced::widget::image::{Handle, Image};
use iced::widget::{button, column, container, text};
use iced::{Alignment, ContentFit, Element, Length};

use crate::navigation::NavParams;
use crate::ui::transition::{SharedElement, TransitionSpec};

/// Width the poster settles at
pub const DETAIL_WIDTH: f32 = 640.0;

#[derive(Debug, Clone)]
pub enum DetailMessage {
    PosterLoaded {
        reference: String,
        handle: Option<Handle>,
    },
    Tick(Instant),
    Back,
}

/// What the poster area currently holds
#[derive(Debug, Clone)]
enum Poster {
    Loading,
    Ready(Handle),
    /// No reference to show, or the load failed
    Unavailable,
}

#[derive(Debug)]
pub struct DetailScreen {
    image_ref: Option<String>,
    poster: Poster,
    transition: Option<SharedElement>,
    now: Instant,
}

impl DetailScreen {
    /// Create the screen from its parameters.
    ///
    /// The transition only runs if `incoming` was keyed with the same
    /// reference this screen shows.
    pub fn new(
        params: &NavParams,
        incoming: Option<&TransitionSpec>,
        duration: Duration,
        now: Instant,
    ) -> Self {
        let image_ref = params.image_url().map(str::to_string);
        let poster = match image_ref {
            Some(_) => Poster::Loading,
            None => {
                tracing::warn!("detail screen opened without a poster reference");
                Poster::Unavailable
            }
        };

        let mut screen = Self {
            image_ref,
            poster,
            transition: None,
            now,
        };
        screen.transition = match (screen.transition_key(), incoming) {
            (Some(key), Some(spec)) => SharedElement::begin(spec, key, now, duration),
            _ => None,
        };
        screen
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    /// The full-size poster is tagged with its own reference
    pub fn transition_key(&self) -> Option<&str> {
        self.image_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.transition
            .as_ref()
            .is_some_and(|t| !t.is_finished(self.now))
    }

    /// Text shown in place of the poster, `None` once it is loaded
    fn placeholder(&self) -> Option<&'static str> {
        match self.poster {
            Poster::Ready(_) => None,
            Poster::Loading => Some("Loading poster…"),
            Poster::Unavailable => Some("Poster unavailable"),
        }
    }

    /// Current poster width
    pub fn poster_width(&self) -> f32 {
        match &self.transition {
            Some(transition) => transition.width_at(self.now, DETAIL_WIDTH),
            None => DETAIL_WIDTH,
        }
    }

    pub fn update(&mut self, message: DetailMessage) {
        match message {
            DetailMessage::PosterLoaded { reference, handle } => {
                // A load from a previously opened detail screen may land late
                if self.image_ref.as_deref() == Some(reference.as_str()) {
                    self.poster = match handle {
                        Some(handle) => Poster::Ready(handle),
                        None => Poster::Unavailable,
                    };
                }
            }
            DetailMessage::Tick(now) => {
                self.now = now;
                if self.transition.as_ref().is_some_and(|t| t.is_finished(now)) {
                    self.transition = None;
                }
            }
            // Handled by the application shell
            DetailMessage::Back => {}
        }
    }

    pub fn view(&self) -> Element<'_, DetailMessage> {
        let width = self.poster_width();

        let poster: Element<'_, DetailMessage> = match (&self.poster, self.placeholder()) {
            (Poster::Ready(handle), _) => Image::<Handle>::new(handle.clone())
                .width(Length::Fixed(width))
                .content_fit(ContentFit::Contain)
                .into(),
            (_, label) => container(text(label.unwrap_or_default()).size(16))
                .center_x(Length::Fixed(width))
                .center_y(Length::Fixed(width * 1.5))
                .style(container::rounded_box)
                .into(),
        };

        let content = column![
            button("Back").on_press(DetailMessage::Back).padding(10),
            poster,
        ]
        .spacing(20)
        .padding(20)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::IMAGE_URL_KEY;

    const DURATION: Duration = Duration::from_millis(300);

    fn params(reference: &str) -> NavParams {
        NavParams::new().with(IMAGE_URL_KEY, reference)
    }

    #[test]
    fn test_reference_is_the_only_input() {
        let screen = DetailScreen::new(&params("/p/a.jpg"), None, DURATION, Instant::now());

        assert_eq!(screen.image_ref(), Some("/p/a.jpg"));
        assert_eq!(screen.transition_key(), Some("/p/a.jpg"));
        assert!(!screen.is_animating());
        assert_eq!(screen.poster_width(), DETAIL_WIDTH);
    }

    #[test]
    fn test_matching_transition_animates_from_thumbnail() {
        let now = Instant::now();
        let spec = TransitionSpec::new("/p/a.jpg", 120.0);

        let screen = DetailScreen::new(&params("/p/a.jpg"), Some(&spec), DURATION, now);

        assert!(screen.is_animating());
        assert_eq!(screen.poster_width(), 120.0);
    }

    #[test]
    fn test_mismatched_transition_shows_full_size() {
        let spec = TransitionSpec::new("/p/other.jpg", 120.0);
        let screen = DetailScreen::new(&params("/p/a.jpg"), Some(&spec), DURATION, Instant::now());

        assert!(!screen.is_animating());
        assert_eq!(screen.poster_width(), DETAIL_WIDTH);
    }

    #[test]
    fn test_ticks_finish_the_transition() {
        let start = Instant::now();
        let spec = TransitionSpec::new("/p/a.jpg", 120.0);
        let mut screen = DetailScreen::new(&params("/p/a.jpg"), Some(&spec), DURATION, start);

        screen.update(DetailMessage::Tick(start + Duration::from_millis(150)));
        let halfway = screen.poster_width();
        assert!(halfway > 120.0 && halfway < DETAIL_WIDTH);

        screen.update(DetailMessage::Tick(start + DURATION));
        assert!(!screen.is_animating());
        assert_eq!(screen.poster_width(), DETAIL_WIDTH);
    }

    #[test]
    fn test_missing_reference_renders_empty() {
        let spec = TransitionSpec::new("/p/a.jpg", 120.0);
        let screen = DetailScreen::new(&NavParams::new(), Some(&spec), DURATION, Instant::now());

        assert_eq!(screen.image_ref(), None);
        assert!(!screen.is_animating());
        assert_eq!(screen.placeholder(), Some("Poster unavailable"));
    }

    #[test]
    fn test_failed_load_shows_unavailable() {
        let mut screen = DetailScreen::new(&params("/p/a.jpg"), None, DURATION, Instant::now());
        assert_eq!(screen.placeholder(), Some("Loading poster…"));

        screen.update(DetailMessage::PosterLoaded {
            reference: "/p/a.jpg".to_string(),
            handle: None,
        });

        assert_eq!(screen.placeholder(), Some("Poster unavailable"));
    }

    #[test]
    fn test_poster_loaded_is_stored() {
        let mut screen = DetailScreen::new(&params("/p/a.jpg"), None, DURATION, Instant::now());
        screen.update(DetailMessage::PosterLoaded {
            reference: "/p/a.jpg".to_string(),
            handle: Some(Handle::from_path("/p/a.jpg")),
        });
        assert!(matches!(screen.poster, Poster::Ready(_)));
        assert_eq!(screen.placeholder(), None);
    }

    #[test]
    fn test_poster_for_other_reference_is_ignored() {
        let mut screen = DetailScreen::new(&params("/p/a.jpg"), None, DURATION, Instant::now());
        screen.update(DetailMessage::PosterLoaded {
            reference: "/p/b.jpg".to_string(),
            handle: Some(Handle::from_path("/p/b.jpg")),
        });
        assert!(matches!(screen.poster, Poster::Loading));
    }
}

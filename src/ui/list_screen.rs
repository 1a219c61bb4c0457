//! The poster list screen
//!
//! `ListState` owns the data; `RenderedRows` owns what is on screen. Every
//! change to the data goes through the reconciler and the resulting edit
//! script is replayed on the rendered rows, so an expand/collapse only
//! flips a flag while a real content change rebinds the row and reloads
//! its poster.

use iced::widget::image::{Handle, Image};
use iced::widget::{button, column, container, mouse_area, scrollable, text, Column};
use iced::{Element, Length};

use crate::navigation::{go_to_detail, NavRequest};
use crate::state::data::{ItemId, RowList, RowRecord};
use crate::state::list::ListState;
use crate::state::reconcile::{apply, RowOp, RowTarget};
use crate::ui::transition::TransitionSpec;

/// Thumbnail size in the list
pub const THUMB_WIDTH: f32 = 120.0;
const THUMB_HEIGHT: f32 = 180.0;

/// Events coming out of a row
#[derive(Debug, Clone)]
pub enum ListMessage {
    /// Row tapped: expand or collapse its overview
    Toggle(ItemId),
    /// Poster tapped: open the detail screen
    OpenDetail {
        image_ref: String,
        transition_key: String,
    },
    /// A poster finished loading for a slot
    PosterLoaded {
        slot: ItemId,
        generation: u64,
        handle: Option<Handle>,
    },
}

/// What the owner of the screen has to do after an update
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    LoadPosters(Vec<PosterRequest>),
    Navigate(NavRequest),
}

/// Ask the image loader to fill a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterRequest {
    pub slot: ItemId,
    pub generation: u64,
    pub reference: String,
}

/// One rendered row
#[derive(Debug, Clone)]
pub struct RowSlot {
    id: ItemId,
    image_ref: String,
    description: String,
    expanded: bool,
    poster: Option<Handle>,
    /// Bumped on every full bind; poster results for older binds are dropped
    generation: u64,
}

impl RowSlot {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[cfg(test)]
    pub fn has_poster(&self) -> bool {
        self.poster.is_some()
    }

    /// The thumbnail is tagged with its own reference
    pub fn transition_key(&self) -> &str {
        &self.image_ref
    }

    fn view(&self) -> Element<'_, ListMessage> {
        let poster: Element<'_, ListMessage> = match &self.poster {
            Some(handle) => Image::<Handle>::new(handle.clone())
                .width(Length::Fixed(THUMB_WIDTH))
                .height(Length::Fixed(THUMB_HEIGHT))
                .into(),
            None => container(text("…").size(24))
                .center_x(Length::Fixed(THUMB_WIDTH))
                .center_y(Length::Fixed(THUMB_HEIGHT))
                .style(container::rounded_box)
                .into(),
        };

        let poster = button(poster)
            .padding(0)
            .style(button::text)
            .on_press(ListMessage::OpenDetail {
                image_ref: self.image_ref.clone(),
                transition_key: self.transition_key().to_string(),
            });

        let mut content = column![poster].spacing(8);
        if self.is_expanded() {
            content = content.push(text(&self.description).size(16));
        }

        mouse_area(
            container(content)
                .padding(12)
                .width(Length::Fill)
                .style(container::rounded_box),
        )
        .on_press(ListMessage::Toggle(self.id()))
        .into()
    }
}

/// The rows currently on screen, driven by reconciler edit scripts
#[derive(Debug, Default)]
pub struct RenderedRows {
    slots: Vec<RowSlot>,
    image_base: String,
    next_generation: u64,
    pending: Vec<PosterRequest>,
}

impl RenderedRows {
    pub fn new(image_base: impl Into<String>) -> Self {
        Self {
            image_base: image_base.into(),
            ..Self::default()
        }
    }

    pub fn slots(&self) -> &[RowSlot] {
        &self.slots
    }

    /// Drain the poster loads issued since the last call
    pub fn take_requests(&mut self) -> Vec<PosterRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Deliver a finished poster. Returns false if the slot is gone or has
    /// been rebound since the request went out.
    pub fn poster_loaded(&mut self, slot: ItemId, generation: u64, handle: Option<Handle>) -> bool {
        match self.slots.iter_mut().find(|s| s.id() == slot) {
            Some(target) if target.generation == generation => {
                target.poster = handle;
                true
            }
            _ => {
                tracing::trace!(slot, generation, "dropping stale poster");
                false
            }
        }
    }

    /// Full bind: fresh text, fresh poster request
    fn bind(&mut self, record: &RowRecord) -> RowSlot {
        self.next_generation += 1;
        let image_ref = record.image_ref(&self.image_base);
        self.pending.push(PosterRequest {
            slot: record.id,
            generation: self.next_generation,
            reference: image_ref.clone(),
        });

        RowSlot {
            id: record.id,
            image_ref,
            description: record.description.clone(),
            expanded: record.is_expanded,
            poster: None,
            generation: self.next_generation,
        }
    }
}

impl RowTarget for RenderedRows {
    fn remove(&mut self, position: usize) {
        if position < self.slots.len() {
            self.slots.remove(position);
        }
    }

    fn insert(&mut self, position: usize, record: &RowRecord) {
        let slot = self.bind(record);
        self.slots.insert(position.min(self.slots.len()), slot);
    }

    fn move_row(&mut self, from: usize, to: usize) {
        if from < self.slots.len() {
            let slot = self.slots.remove(from);
            self.slots.insert(to.min(self.slots.len()), slot);
        }
    }

    fn render_full(&mut self, position: usize, record: &RowRecord) {
        if position < self.slots.len() {
            let slot = self.bind(record);
            self.slots[position] = slot;
        }
    }

    fn render_cosmetic(&mut self, position: usize, expanded: bool) {
        if let Some(slot) = self.slots.get_mut(position) {
            slot.expanded = expanded;
        }
    }
}

/// List screen: state plus its rendering
#[derive(Debug)]
pub struct ListScreen {
    state: ListState,
    rows: RenderedRows,
}

impl ListScreen {
    pub fn new(image_base: impl Into<String>) -> Self {
        Self {
            state: ListState::new(),
            rows: RenderedRows::new(image_base),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn rows(&self) -> &RenderedRows {
        &self.rows
    }

    pub fn item_count(&self) -> usize {
        self.state.rows().len()
    }

    /// Replace the whole list with `next`
    pub fn submit(&mut self, next: RowList) -> Action {
        let ops = self.state.submit(next);
        self.render(&ops)
    }

    pub fn update(&mut self, message: ListMessage) -> Action {
        match message {
            ListMessage::Toggle(id) => {
                let ops = self.state.toggle(id);
                let expanded = self.state.get(id).map(|row| row.is_expanded);
                tracing::debug!(id, ?expanded, ops = ops.len(), "row toggled");
                self.render(&ops)
            }
            ListMessage::OpenDetail {
                image_ref,
                transition_key,
            } => {
                tracing::info!(%image_ref, "opening detail");
                Action::Navigate(go_to_detail(
                    &image_ref,
                    TransitionSpec::new(transition_key, THUMB_WIDTH),
                ))
            }
            ListMessage::PosterLoaded {
                slot,
                generation,
                handle,
            } => {
                self.rows.poster_loaded(slot, generation, handle);
                Action::None
            }
        }
    }

    pub fn view(&self) -> Element<'_, ListMessage> {
        let rows = Column::with_children(self.rows().slots().iter().map(RowSlot::view))
            .spacing(10)
            .padding(16);

        scrollable(rows).height(Length::Fill).into()
    }

    fn render(&mut self, ops: &[RowOp]) -> Action {
        apply(ops, &mut self.rows);

        let requests = self.rows.take_requests();
        if requests.is_empty() {
            Action::None
        } else {
            Action::LoadPosters(requests)
        }
    }
}

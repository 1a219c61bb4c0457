//! Screen navigation requests
//!
//! Mirrors the "start the next screen with a parameter bag" shape: the
//! list screen builds a [`NavRequest`] and the application shell performs
//! the switch. Nothing is shared between screens after the hand-off.

use std::collections::BTreeMap;

use crate::ui::transition::TransitionSpec;

/// Parameter key carrying the poster reference to the detail screen
pub const IMAGE_URL_KEY: &str = "IMAGE_URL_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    List,
    Detail,
}

/// String key/value bag handed to the destination screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavParams(BTreeMap<String, String>);

impl NavParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The poster reference, if one was passed
    pub fn image_url(&self) -> Option<&str> {
        self.get(IMAGE_URL_KEY)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavRequest {
    pub destination: Destination,
    pub params: NavParams,
    pub transition: Option<TransitionSpec>,
}

/// Build the request that opens the detail screen for one poster
pub fn go_to_detail(image_ref: &str, transition: TransitionSpec) -> NavRequest {
    NavRequest {
        destination: Destination::Detail,
        params: NavParams::new().with(IMAGE_URL_KEY, image_ref),
        transition: Some(transition),
    }
}

/// Build the request that returns to the list
pub fn back_to_list() -> NavRequest {
    NavRequest {
        destination: Destination::List,
        params: NavParams::new(),
        transition: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_to_detail_carries_exactly_one_param() {
        let spec = TransitionSpec::new("/posters/a.jpg", 120.0);
        let request = go_to_detail("/posters/a.jpg", spec.clone());

        assert_eq!(request.destination, Destination::Detail);
        assert_eq!(request.params.image_url(), Some("/posters/a.jpg"));
        assert_eq!(request.params, NavParams::new().with(IMAGE_URL_KEY, "/posters/a.jpg"));
        assert_eq!(request.transition, Some(spec));
    }

    #[test]
    fn test_back_to_list_has_no_params() {
        let request = back_to_list();
        assert_eq!(request.destination, Destination::List);
        assert_eq!(request.params.image_url(), None);
        assert!(request.transition.is_none());
    }
}

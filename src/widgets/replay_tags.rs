use iced::alignment::Vertical;
use iced::widget::{button, column, container, scrollable, text, Column, Row};
use iced::{Element, Length, Task as Command};
use iced_aw::{drop_down, DropDown};
use itertools::Itertools;
use log::{error, warn};

use crate::entities::{Replay, Tag, TagList};
use crate::state::State;
use crate::widgets::{icon_button, tag_chip};

#[derive(Clone, Debug)]
pub enum ReplayTagMessage {
    // Private
    Add(String),
    Remove(String),
    Toggle,
    Dismiss,
    Added(Tag),
    Removed(String),
    Error(String),
    // Public
    Changed(Vec<Tag>),
}

/// Tags attached to one replay.
///
/// Read-only for anonymous users. Local changes are applied only after the
/// server confirmed them.
#[derive(Clone, Debug)]
pub struct ReplayTagDisplay {
    replay_id: String,
    tags: Vec<Tag>,
    expanded: bool,
    error: Option<String>,
}

impl ReplayTagDisplay {
    pub fn new(replay: &Replay) -> Self {
        Self {
            replay_id: replay.id.clone(),
            tags: replay.tags.clone(),
            expanded: false,
            error: None,
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Forget view state; the tags themselves are kept.
    pub fn reset(&mut self) {
        self.expanded = false;
        self.error = None;
    }

    pub fn update(
        &mut self,
        message: ReplayTagMessage,
        state: &State,
    ) -> Command<ReplayTagMessage> {
        use ReplayTagMessage::*;
        match message {
            Add(name) => {
                self.expanded = false;
                if self.tags.has_tag(&name) {
                    return Command::none();
                }
                if !state.is_logged_in() {
                    warn!("Anonymous users cannot tag replays.");
                    return Command::none();
                }
                let client = match state.client() {
                    Ok(client) => client,
                    Err(e) => return Command::done(Error(e.to_string())),
                };
                let replay_id = self.replay_id.clone();
                Command::future(async move {
                    match Replay::add_tag(&replay_id, &name, &client).await {
                        Ok(()) => Added(Tag::new(name)),
                        Err(e) => Error(e.to_string()),
                    }
                })
            }
            Remove(name) => {
                if !state.is_logged_in() {
                    warn!("Anonymous users cannot untag replays.");
                    return Command::none();
                }
                let client = match state.client() {
                    Ok(client) => client,
                    Err(e) => return Command::done(Error(e.to_string())),
                };
                let replay_id = self.replay_id.clone();
                Command::future(async move {
                    match Replay::remove_tag(&replay_id, &name, &client).await
                    {
                        Ok(()) => Removed(name),
                        Err(e) => Error(e.to_string()),
                    }
                })
            }
            Added(tag) => {
                self.error = None;
                if !self.tags.has_tag(&tag.name) {
                    self.tags.push(tag);
                }
                Command::done(Changed(self.tags.clone()))
            }
            Removed(name) => {
                self.error = None;
                self.tags.retain(|t| t.name != name);
                Command::done(Changed(self.tags.clone()))
            }
            Toggle => {
                self.expanded = !self.expanded;
                Command::none()
            }
            Dismiss => {
                self.expanded = false;
                Command::none()
            }
            Error(e) => {
                error!("Replay tag update failed: {e}");
                self.error = Some(e);
                Command::none()
            }
            Changed(_) => Command::none(),
        }
    }

    /// `user_tags` is `None` when nobody is logged in.
    pub fn view<'a>(
        &'a self,
        user_tags: Option<&'a [Tag]>,
    ) -> Element<'a, ReplayTagMessage> {
        let editable = user_tags.is_some();
        let chips = Row::with_children(self.tags.iter().map(|tag| {
            tag_chip(
                &tag.name,
                editable.then(|| ReplayTagMessage::Remove(tag.name.clone())),
            )
        }))
        .push_maybe(user_tags.map(|options| self.picker(options)))
        .spacing(6)
        .align_y(Vertical::Center)
        .wrap();

        let empty_hint = (self.tags.is_empty() && !editable)
            .then(|| text("This replay has no tags yet."));

        column![chips]
            .push_maybe(empty_hint)
            .push_maybe(
                self.error.as_ref().map(|e| text(e).style(text::danger)),
            )
            .spacing(10)
            .into()
    }

    fn picker<'a>(&'a self, options: &'a [Tag]) -> Element<'a, ReplayTagMessage> {
        let underlay = icon_button(iced_fonts::Bootstrap::Plus)
            .width(26.0)
            .style(button::secondary)
            .on_press(ReplayTagMessage::Toggle);

        let available = options
            .iter()
            .filter(|t| !self.tags.has_tag(&t.name))
            .sorted_by_key(|t| t.name.to_lowercase())
            .map(|t| {
                button(text(t.name.clone()))
                    .style(button::secondary)
                    .on_press(ReplayTagMessage::Add(t.name.clone()))
                    .width(Length::Fill)
                    .into()
            })
            .collect::<Vec<Element<'a, ReplayTagMessage>>>();
        let choices = if available.is_empty() {
            Column::new().push(text("Create tags in \"My tags\" first.").size(12))
        } else {
            Column::with_children(available)
        }
        .width(Length::Fill);

        let overlay = container(scrollable(choices))
            .max_width(160.0)
            .max_height(240.0);

        DropDown::new(underlay, overlay, self.expanded)
            .on_dismiss(ReplayTagMessage::Dismiss)
            .alignment(drop_down::Alignment::Bottom)
            .width(Length::Shrink)
            .into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{logged_in_state, tags, test_replay};

    fn tag_names(display: &ReplayTagDisplay) -> Vec<String> {
        display.tags().iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_added_tag_is_appended_once() {
        let state = logged_in_state();
        let mut display = ReplayTagDisplay::new(&test_replay());
        let _ = display.update(ReplayTagMessage::Added(Tag::new("save")), &state);
        let _ = display.update(ReplayTagMessage::Added(Tag::new("save")), &state);
        assert_eq!(tag_names(&display), ["kickoff", "save"]);
    }

    #[test]
    fn test_add_existing_is_noop() {
        let state = logged_in_state();
        let mut display = ReplayTagDisplay::new(&test_replay());
        display.expanded = true;
        let _ = display.update(ReplayTagMessage::Add("kickoff".into()), &state);
        assert!(!display.expanded);
        assert_eq!(display.tags(), tags(&["kickoff"]));
    }

    #[test]
    fn test_removed_and_error() {
        let state = logged_in_state();
        let mut display = ReplayTagDisplay::new(&test_replay());
        let _ = display.update(ReplayTagMessage::Error("boom".into()), &state);
        assert_eq!(display.error.as_deref(), Some("boom"));
        assert_eq!(display.tags(), tags(&["kickoff"]));

        let _ = display.update(ReplayTagMessage::Removed("kickoff".into()), &state);
        assert!(display.tags().is_empty());
        assert_eq!(display.error, None);
    }

    #[test]
    fn test_reset_keeps_tags() {
        let state = logged_in_state();
        let mut display = ReplayTagDisplay::new(&test_replay());
        let _ = display.update(ReplayTagMessage::Toggle, &state);
        let _ = display.update(ReplayTagMessage::Error("boom".into()), &state);
        display.reset();
        assert!(!display.expanded);
        assert_eq!(display.error, None);
        assert_eq!(display.tags(), tags(&["kickoff"]));
    }
}

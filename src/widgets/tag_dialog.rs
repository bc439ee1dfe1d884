use std::fmt;

use iced::alignment::Horizontal;
use iced::widget::{
    button, column, container, horizontal_rule, row, text, tooltip,
};
use iced::{Element, Length, Task as Command};
use log::{debug, error, info};

use crate::entities::{Replay, Tag, TagList};
use crate::state::State;
use crate::widgets::{
    close_button, CustomWidget, ReplayTagDisplay, ReplayTagMessage,
    UserTagDisplay, UserTagMessage,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TagTab {
    #[default]
    Replay,
    MyTags,
}

impl fmt::Display for TagTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replay => "Replay",
            Self::MyTags => "My tags",
        }
        .fmt(f)
    }
}

/// Load status of the current user's tags.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TagsLoad {
    #[default]
    Unloaded,
    Loading,
    Loaded(Vec<Tag>),
    Failed(String),
}

impl TagsLoad {
    pub fn tags(&self) -> Option<&[Tag]> {
        match self {
            Self::Loaded(tags) => Some(tags),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub enum TagDialogMessage {
    // Private
    SelectTab(TagTab),
    Load,
    Loaded(Result<Vec<Tag>, String>),
    Deleted(Tag, Result<(), String>),
    ReplayTags(ReplayTagMessage),
    UserTags(UserTagMessage),
    /// Completion of a task started while the dialog had this generation.
    Scoped(u64, Box<TagDialogMessage>),
    // Public
    TagsUpdated(Vec<Tag>),
    Close,
}

/// Modal for tagging a replay and managing the user's own tags.
///
/// The user's tags are fetched when the dialog opens and dropped when it
/// closes. Closing also bumps `generation`, so completions of requests
/// issued before are ignored. Replay tag changes are the exception: the
/// server has applied them already, so they land whenever they complete.
#[derive(Clone, Debug)]
pub struct TagDialog {
    replay_tags: ReplayTagDisplay,
    user_tag_editor: UserTagDisplay,
    selected_tab: TagTab,
    user_tags: TagsLoad,
    is_open: bool,
    generation: u64,
    error: Option<String>,
}

impl TagDialog {
    pub fn new(replay: &Replay) -> Self {
        Self {
            replay_tags: ReplayTagDisplay::new(replay),
            user_tag_editor: UserTagDisplay::new(),
            selected_tab: TagTab::default(),
            user_tags: TagsLoad::default(),
            is_open: false,
            generation: 0,
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[cfg(test)]
    pub fn selected_tab(&self) -> TagTab {
        self.selected_tab
    }

    #[cfg(test)]
    pub fn user_tags(&self) -> &TagsLoad {
        &self.user_tags
    }

    pub fn replay_tags(&self) -> &[Tag] {
        self.replay_tags.tags()
    }

    pub fn open(&mut self, state: &State) -> Command<TagDialogMessage> {
        self.is_open = true;
        match self.user_tags {
            TagsLoad::Unloaded | TagsLoad::Failed(_) => self.load(state),
            TagsLoad::Loading | TagsLoad::Loaded(_) => Command::none(),
        }
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.selected_tab = TagTab::default();
        self.user_tags = TagsLoad::Unloaded;
        self.user_tag_editor = UserTagDisplay::new();
        self.replay_tags.reset();
        self.error = None;
        self.generation += 1;
    }

    pub fn select_tab(&mut self, tab: TagTab) {
        self.selected_tab = tab;
    }

    /// The "My tags" tab is only reachable for a logged-in user.
    pub fn is_tab_enabled(tab: TagTab, state: &State) -> bool {
        match tab {
            TagTab::Replay => true,
            TagTab::MyTags => state.is_logged_in(),
        }
    }

    /// Add a tag to the local list, unless one with the same name exists.
    ///
    /// Local only: the caller must have stored the tag on the server.
    pub fn create_tag(&mut self, tag: Tag) {
        match &mut self.user_tags {
            TagsLoad::Loaded(tags) => {
                if tags.has_tag(&tag.name) {
                    debug!("Tag {:?} already exists, ignoring.", tag.name);
                } else {
                    tags.push(tag);
                }
            }
            _ => self.user_tags = TagsLoad::Loaded(vec![tag]),
        }
    }

    fn load(&mut self, state: &State) -> Command<TagDialogMessage> {
        if !state.is_logged_in() {
            return Command::none();
        }
        let client = match state.client() {
            Ok(client) => client,
            Err(e) => {
                self.user_tags = TagsLoad::Failed(e.to_string());
                return Command::none();
            }
        };
        self.user_tags = TagsLoad::Loading;
        self.scoped(Command::perform(
            async move { Tag::load_all(&client).await.map_err(|e| e.to_string()) },
            TagDialogMessage::Loaded,
        ))
    }

    fn delete_tag(
        &mut self,
        tag: Tag,
        state: &State,
    ) -> Command<TagDialogMessage> {
        if self.user_tags.tags().is_none() {
            return Command::none();
        }
        let client = match state.client() {
            Ok(client) => client,
            Err(e) => {
                self.error = Some(e.to_string());
                return Command::none();
            }
        };
        let name = tag.name.clone();
        self.scoped(Command::perform(
            async move {
                Tag::delete(&name, &client).await.map_err(|e| e.to_string())
            },
            move |result| TagDialogMessage::Deleted(tag.clone(), result),
        ))
    }

    /// Tag the messages of an in-flight task with the current generation.
    fn scoped(
        &self,
        task: Command<TagDialogMessage>,
    ) -> Command<TagDialogMessage> {
        let generation = self.generation;
        task.map(move |message| {
            TagDialogMessage::Scoped(generation, Box::new(message))
        })
    }

    fn tab_button(
        &self,
        tab: TagTab,
        state: &State,
    ) -> Element<'_, TagDialogMessage> {
        type Style = fn(&iced::Theme, button::Status) -> button::Style;
        let style: Style = if self.selected_tab == tab {
            button::primary
        } else {
            button::text
        };
        let enabled = Self::is_tab_enabled(tab, state);
        let control = button(
            text(tab.to_string())
                .align_x(Horizontal::Center)
                .width(Length::Fill),
        )
        .width(Length::Fill)
        .style(style)
        .on_press_maybe(enabled.then_some(TagDialogMessage::SelectTab(tab)));
        if enabled {
            control.into()
        } else {
            tooltip(
                control,
                container(text("Log in to view your tags").size(12))
                    .padding(4)
                    .style(container::rounded_box),
                tooltip::Position::Bottom,
            )
            .into()
        }
    }

    fn content(&self, state: &State) -> Element<'_, TagDialogMessage> {
        if !state.is_logged_in() {
            return self.replay_tags.view(None).map(TagDialogMessage::ReplayTags);
        }
        match (&self.user_tags, self.selected_tab) {
            (TagsLoad::Unloaded | TagsLoad::Loading, _) => {
                text("Loading...").into()
            }
            (TagsLoad::Failed(e), _) => column![
                text(format!("Could not load your tags: {e}"))
                    .style(text::danger),
                button("Retry").on_press(TagDialogMessage::Load),
            ]
            .spacing(8)
            .into(),
            (TagsLoad::Loaded(tags), TagTab::Replay) => self
                .replay_tags
                .view(Some(tags.as_slice()))
                .map(TagDialogMessage::ReplayTags),
            (TagsLoad::Loaded(tags), TagTab::MyTags) => self
                .user_tag_editor
                .view(tags)
                .map(TagDialogMessage::UserTags),
        }
    }
}

impl CustomWidget<TagDialogMessage> for TagDialog {
    fn view(&self, state: &State) -> Element<'_, TagDialogMessage> {
        let tabs = row![
            self.tab_button(TagTab::Replay, state),
            self.tab_button(TagTab::MyTags, state),
            close_button(TagDialogMessage::Close),
        ]
        .spacing(4);

        let content = column![tabs, horizontal_rule(1.0), self.content(state)]
            .push_maybe(self.error.as_ref().map(|e| text(e).style(text::danger)))
            .spacing(10);

        container(content)
            .width(360.0)
            .max_height(480.0)
            .padding(10)
            .style(container::rounded_box)
            .into()
    }

    fn update(
        &mut self,
        message: TagDialogMessage,
        state: &State,
    ) -> Command<TagDialogMessage> {
        use TagDialogMessage::*;
        match message {
            Scoped(generation, message) => {
                let confirmed = matches!(
                    *message,
                    ReplayTags(
                        ReplayTagMessage::Added(_) | ReplayTagMessage::Removed(_)
                    )
                );
                if generation != self.generation && !confirmed {
                    debug!("Dropping a completion issued before the dialog closed.");
                    return Command::none();
                }
                return self.update(*message, state);
            }
            SelectTab(tab) => self.select_tab(tab),
            Load => return self.load(state),
            Loaded(Ok(tags)) => {
                info!("Loaded {} user tags.", tags.len());
                self.user_tags = TagsLoad::Loaded(tags);
            }
            Loaded(Err(e)) => {
                error!("Failed to load user tags: {e}");
                self.user_tags = TagsLoad::Failed(e);
            }
            Deleted(tag, Ok(())) => {
                self.error = None;
                if let TagsLoad::Loaded(tags) = &mut self.user_tags {
                    tags.retain(|t| t.name != tag.name);
                }
            }
            Deleted(tag, Err(e)) => {
                error!("Failed to delete tag {:?}: {e}", tag.name);
                self.error = Some(format!("Could not delete {}: {e}", tag.name));
            }
            UserTags(UserTagMessage::Delete(tag)) => {
                return self.delete_tag(tag, state)
            }
            UserTags(UserTagMessage::Created(tag)) => {
                self.create_tag(tag.clone());
                return self
                    .user_tag_editor
                    .update(UserTagMessage::Created(tag), state)
                    .map(UserTags);
            }
            UserTags(msg) => {
                let task = self.user_tag_editor.update(msg, state).map(UserTags);
                return self.scoped(task);
            }
            ReplayTags(ReplayTagMessage::Changed(tags)) => {
                return Command::done(TagsUpdated(tags))
            }
            ReplayTags(msg) => {
                return self.replay_tags.update(msg, state).map(ReplayTags)
            }
            TagsUpdated(_) | Close => {}
        }
        Command::none()
    }

    fn handle_key(
        &mut self,
        key: iced::keyboard::key::Named,
        modifiers: iced::keyboard::Modifiers,
    ) -> Option<Command<TagDialogMessage>> {
        use iced::keyboard::key::Named;
        if self.is_open && matches!(key, Named::Escape) && modifiers.is_empty()
        {
            Some(Command::done(TagDialogMessage::Close))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{anonymous_state, logged_in_state, tags, test_replay};

    fn loaded_dialog(names: &[&str]) -> TagDialog {
        let mut dialog = TagDialog::new(&test_replay());
        dialog.is_open = true;
        dialog.user_tags = TagsLoad::Loaded(tags(names));
        dialog
    }

    #[test]
    fn test_initial_state() {
        let dialog = TagDialog::new(&test_replay());
        assert_eq!(dialog.selected_tab(), TagTab::Replay);
        assert_eq!(dialog.user_tags(), &TagsLoad::Unloaded);
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_open_starts_load_only_when_logged_in() {
        let mut dialog = TagDialog::new(&test_replay());
        let _ = dialog.open(&anonymous_state());
        assert!(dialog.is_open());
        assert_eq!(dialog.user_tags(), &TagsLoad::Unloaded);

        let mut dialog = TagDialog::new(&test_replay());
        let _ = dialog.open(&logged_in_state());
        assert_eq!(dialog.user_tags(), &TagsLoad::Loading);
    }

    #[test]
    fn test_load_results() {
        let state = logged_in_state();
        let mut dialog = TagDialog::new(&test_replay());
        let _ = dialog.open(&state);
        let _ = dialog.update(
            TagDialogMessage::Loaded(Err("502 Bad Gateway".into())),
            &state,
        );
        assert_eq!(
            dialog.user_tags(),
            &TagsLoad::Failed("502 Bad Gateway".into())
        );

        let _ = dialog.update(TagDialogMessage::Load, &state);
        assert_eq!(dialog.user_tags(), &TagsLoad::Loading);

        let _ = dialog.update(
            TagDialogMessage::Loaded(Ok(tags(&["a", "b"]))),
            &state,
        );
        assert_eq!(dialog.user_tags(), &TagsLoad::Loaded(tags(&["a", "b"])));
    }

    #[test]
    fn test_create_tag() {
        let mut dialog = loaded_dialog(&["a", "b"]);
        dialog.create_tag(Tag::new("a"));
        assert_eq!(dialog.user_tags(), &TagsLoad::Loaded(tags(&["a", "b"])));

        dialog.create_tag(Tag::new("c"));
        assert_eq!(
            dialog.user_tags(),
            &TagsLoad::Loaded(tags(&["a", "b", "c"]))
        );
    }

    #[test]
    fn test_create_tag_before_load() {
        let mut dialog = TagDialog::new(&test_replay());
        dialog.create_tag(Tag::new("solo"));
        assert_eq!(dialog.user_tags(), &TagsLoad::Loaded(tags(&["solo"])));
    }

    #[test]
    fn test_created_message_updates_list() {
        let state = logged_in_state();
        let mut dialog = loaded_dialog(&["a"]);
        let _ = dialog.update(
            TagDialogMessage::UserTags(UserTagMessage::Created(Tag::new("b"))),
            &state,
        );
        assert_eq!(dialog.user_tags(), &TagsLoad::Loaded(tags(&["a", "b"])));
    }

    #[test]
    fn test_delete_applied_only_on_success() {
        let state = logged_in_state();
        let mut dialog = loaded_dialog(&["a", "b", "c"]);

        let _ = dialog.update(
            TagDialogMessage::Deleted(Tag::new("b"), Err("timed out".into())),
            &state,
        );
        assert_eq!(
            dialog.user_tags(),
            &TagsLoad::Loaded(tags(&["a", "b", "c"]))
        );
        assert!(dialog.error.is_some());

        let _ = dialog
            .update(TagDialogMessage::Deleted(Tag::new("b"), Ok(())), &state);
        assert_eq!(dialog.user_tags(), &TagsLoad::Loaded(tags(&["a", "c"])));
        assert_eq!(dialog.error, None);
    }

    #[test]
    fn test_delete_request_keeps_list_until_confirmed() {
        let state = logged_in_state();
        let mut dialog = loaded_dialog(&["a", "b"]);
        let _ = dialog.update(
            TagDialogMessage::UserTags(UserTagMessage::Delete(Tag::new("a"))),
            &state,
        );
        assert_eq!(dialog.user_tags(), &TagsLoad::Loaded(tags(&["a", "b"])));
    }

    #[test]
    fn test_delete_ignored_when_unloaded() {
        let state = logged_in_state();
        let mut dialog = TagDialog::new(&test_replay());
        let _ = dialog.update(
            TagDialogMessage::UserTags(UserTagMessage::Delete(Tag::new("a"))),
            &state,
        );
        assert_eq!(dialog.user_tags(), &TagsLoad::Unloaded);
    }

    #[test]
    fn test_select_tab() {
        let state = anonymous_state();
        let mut dialog = TagDialog::new(&test_replay());
        let _ = dialog.update(TagDialogMessage::SelectTab(TagTab::MyTags), &state);
        assert_eq!(dialog.selected_tab(), TagTab::MyTags);
        let _ = dialog.update(TagDialogMessage::SelectTab(TagTab::Replay), &state);
        assert_eq!(dialog.selected_tab(), TagTab::Replay);

        assert!(TagDialog::is_tab_enabled(TagTab::Replay, &state));
        assert!(!TagDialog::is_tab_enabled(TagTab::MyTags, &state));
        assert!(TagDialog::is_tab_enabled(TagTab::MyTags, &logged_in_state()));
    }

    #[test]
    fn test_close_discards_and_ignores_late_completions() {
        let state = logged_in_state();
        let mut dialog = loaded_dialog(&["a"]);
        dialog.select_tab(TagTab::MyTags);
        let stale = dialog.generation;

        dialog.close();
        assert!(!dialog.is_open());
        assert_eq!(dialog.selected_tab(), TagTab::Replay);
        assert_eq!(dialog.user_tags(), &TagsLoad::Unloaded);

        let _ = dialog.update(
            TagDialogMessage::Scoped(
                stale,
                Box::new(TagDialogMessage::Loaded(Ok(tags(&["late"])))),
            ),
            &state,
        );
        assert_eq!(dialog.user_tags(), &TagsLoad::Unloaded);

        let _ = dialog.update(
            TagDialogMessage::Scoped(
                dialog.generation,
                Box::new(TagDialogMessage::Loaded(Ok(tags(&["fresh"])))),
            ),
            &state,
        );
        assert_eq!(dialog.user_tags(), &TagsLoad::Loaded(tags(&["fresh"])));
    }

    #[test]
    fn test_confirmed_replay_tag_change_survives_close() {
        let state = logged_in_state();
        let mut dialog = loaded_dialog(&["a"]);
        let stale = dialog.generation;
        dialog.close();

        let _ = dialog.update(
            TagDialogMessage::Scoped(
                stale,
                Box::new(TagDialogMessage::ReplayTags(ReplayTagMessage::Added(
                    Tag::new("save"),
                ))),
            ),
            &state,
        );
        assert_eq!(dialog.replay_tags(), tags(&["kickoff", "save"]));

        let _ = dialog.update(
            TagDialogMessage::ReplayTags(ReplayTagMessage::Removed(
                "kickoff".into(),
            )),
            &state,
        );
        assert_eq!(dialog.replay_tags(), tags(&["save"]));
    }

    #[test]
    fn test_close_resets_replay_tag_error() {
        let state = logged_in_state();
        let mut dialog = loaded_dialog(&["a"]);
        let _ = dialog.update(
            TagDialogMessage::ReplayTags(ReplayTagMessage::Error("boom".into())),
            &state,
        );
        assert!(format!("{:?}", dialog.replay_tags).contains("boom"));

        dialog.close();
        let _ = dialog.open(&state);
        assert!(!format!("{:?}", dialog.replay_tags).contains("boom"));
        assert_eq!(dialog.replay_tags(), tags(&["kickoff"]));
    }

    #[test]
    fn test_escape_closes_only_when_open() {
        use iced::keyboard::key::Named;
        use iced::keyboard::Modifiers;

        let mut dialog = TagDialog::new(&test_replay());
        assert!(dialog.handle_key(Named::Escape, Modifiers::empty()).is_none());
        dialog.is_open = true;
        assert!(dialog.handle_key(Named::Escape, Modifiers::empty()).is_some());
        assert!(dialog.handle_key(Named::Escape, Modifiers::SHIFT).is_none());
    }
}

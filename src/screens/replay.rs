use chrono::Local;
use iced::keyboard::key::Named as NamedKey;
use iced::widget::{
    button, center, column, container, mouse_area, opaque, row, scrollable,
    stack, text, Row,
};
use iced::{keyboard, Color, Element, Fill, Task as Command};
use log::error;

use crate::entities::Replay;
use crate::state::State;
use crate::widgets::{tag_chip, CustomWidget, TagDialog, TagDialogMessage};

#[derive(Clone, Debug)]
pub struct ReplayScreen {
    replay: Replay,
    tag_dialog: TagDialog,
}

#[derive(Clone, Debug)]
pub enum ReplayScreenMessage {
    OpenTags,
    OpenInBrowser,
    TagDialog(TagDialogMessage),
}

impl ReplayScreen {
    pub fn new(replay: Replay) -> Self {
        let tag_dialog = TagDialog::new(&replay);
        Self { replay, tag_dialog }
    }

    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    fn summary(&self, state: &State) -> Element<'_, ReplayScreenMessage> {
        let date = self
            .replay
            .date
            .map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let mode = self.replay.game_mode.clone().unwrap_or_default();
        let tags: Element<'_, ReplayScreenMessage> = if self.replay.tags.is_empty()
        {
            text("No tags").style(text::secondary).into()
        } else {
            Row::with_children(
                self.replay.tags.iter().map(|t| tag_chip(&t.name, None)),
            )
            .spacing(6)
            .wrap()
            .into()
        };
        let who = match &state.user {
            Some(user) => format!("Logged in as {}", user.name),
            None => "Browsing anonymously".to_owned(),
        };

        let content = column![
            text(self.replay.display_name()).size(24),
            row![text(date), text(mode)].spacing(12),
            tags,
            row![
                button("Edit tags")
                    .style(button::primary)
                    .on_press(ReplayScreenMessage::OpenTags),
                button("Open in browser")
                    .style(button::secondary)
                    .on_press(ReplayScreenMessage::OpenInBrowser),
            ]
            .spacing(10),
            text(who).size(12).style(text::secondary),
        ]
        .spacing(12);

        scrollable(container(content).center_x(Fill).padding(20)).into()
    }
}

impl CustomWidget<ReplayScreenMessage> for ReplayScreen {
    fn view(&self, state: &State) -> Element<'_, ReplayScreenMessage> {
        let base = self.summary(state);
        if !self.tag_dialog.is_open() {
            return base;
        }
        modal(
            base,
            self.tag_dialog
                .view(state)
                .map(ReplayScreenMessage::TagDialog),
            ReplayScreenMessage::TagDialog(TagDialogMessage::Close),
        )
    }

    fn update(
        &mut self,
        message: ReplayScreenMessage,
        state: &State,
    ) -> Command<ReplayScreenMessage> {
        match message {
            ReplayScreenMessage::OpenTags => self
                .tag_dialog
                .open(state)
                .map(ReplayScreenMessage::TagDialog),
            ReplayScreenMessage::OpenInBrowser => {
                if let Err(e) = opener::open(
                    self.replay.web_url(&state.config.api_base),
                ) {
                    error!("Failed to open browser: {e:?}");
                }
                Command::none()
            }
            ReplayScreenMessage::TagDialog(TagDialogMessage::TagsUpdated(
                tags,
            )) => {
                self.replay.tags = tags;
                Command::none()
            }
            ReplayScreenMessage::TagDialog(TagDialogMessage::Close) => {
                self.tag_dialog.close();
                Command::none()
            }
            ReplayScreenMessage::TagDialog(msg) => {
                let task = self.tag_dialog.update(msg, state);
                self.replay.tags = self.tag_dialog.replay_tags().to_vec();
                task.map(ReplayScreenMessage::TagDialog)
            }
        }
    }

    fn handle_key(
        &mut self,
        key: NamedKey,
        modifiers: keyboard::Modifiers,
    ) -> Option<Command<ReplayScreenMessage>> {
        self.tag_dialog
            .handle_key(key, modifiers)
            .map(|c| c.map(ReplayScreenMessage::TagDialog))
    }
}

fn modal<'a, T: Clone + 'a>(
    base: Element<'a, T>,
    content: Element<'a, T>,
    on_blur: T,
) -> Element<'a, T> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)).style(|_| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.6,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

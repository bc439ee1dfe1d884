use iced::alignment::Vertical;
use iced::widget::{button, column, row, scrollable, text, text_input, Column};
use iced::{Element, Length, Task as Command};
use iced_fonts::Bootstrap;
use log::error;

use crate::entities::Tag;
use crate::state::State;
use crate::widgets::icon_button;

#[derive(Clone, Debug)]
pub enum UserTagMessage {
    // Private
    EditNew(String),
    SubmitNew,
    Error(String),
    // Public
    /// Emitted once the server has stored the tag.
    Created(Tag),
    Delete(Tag),
}

#[derive(Clone, Debug, Default)]
pub struct UserTagDisplay {
    new_tag: String,
    error: Option<String>,
}

impl UserTagDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(
        &mut self,
        message: UserTagMessage,
        state: &State,
    ) -> Command<UserTagMessage> {
        use UserTagMessage::*;
        match message {
            EditNew(name) => {
                self.new_tag = name;
                self.error = None;
            }
            SubmitNew => {
                let name = self.new_tag.trim().to_owned();
                if name.is_empty() {
                    self.error = Some("Tag name must not be empty".to_owned());
                    return Command::none();
                }
                let client = match state.client() {
                    Ok(client) => client,
                    Err(e) => return Command::done(Error(e.to_string())),
                };
                return Command::future(async move {
                    match Tag::create(&name, &client).await {
                        Ok(tag) => Created(tag),
                        Err(e) => Error(e.to_string()),
                    }
                });
            }
            Created(_) => {
                self.new_tag.clear();
                self.error = None;
            }
            Error(e) => {
                error!("Tag creation failed: {e}");
                self.error = Some(e);
            }
            Delete(_) => {}
        }
        Command::none()
    }

    pub fn view<'a>(&'a self, tags: &'a [Tag]) -> Element<'a, UserTagMessage> {
        let list: Element<'a, UserTagMessage> = if tags.is_empty() {
            text("You have no tags yet.").into()
        } else {
            scrollable(Column::with_children(tags.iter().map(|tag| {
                row![
                    text(&tag.name).width(Length::Fill),
                    icon_button(Bootstrap::Trash)
                        .style(button::danger)
                        .width(28.0)
                        .on_press(UserTagMessage::Delete(tag.clone())),
                ]
                .spacing(8)
                .align_y(Vertical::Center)
                .into()
            })))
            .height(Length::Fill)
            .into()
        };

        column![
            row![
                text_input("New tag", &self.new_tag)
                    .id("new-tag-input")
                    .on_input(UserTagMessage::EditNew)
                    .on_submit(UserTagMessage::SubmitNew),
                button("Create")
                    .style(button::primary)
                    .on_press(UserTagMessage::SubmitNew),
            ]
            .spacing(6),
        ]
        .push_maybe(self.error.as_ref().map(|e| text(e).style(text::danger)))
        .push(list)
        .spacing(10)
        .into()
    }
}

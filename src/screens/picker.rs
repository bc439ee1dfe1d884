use iced::widget::{button, column, container, scrollable, text, text_input};
use iced::{Element, Fill, Task as Command};

use crate::state::State;
use crate::widgets::CustomWidget;

/// Asks for the replay to work on.
#[derive(Clone, Debug, Default)]
pub struct ReplayPicker {
    replay_id: String,
    error: String,
}

#[derive(Clone, Debug)]
pub enum ReplayPickerMessage {
    IdEdited(String),
    Submit,
    // Public
    Completed(String),
}

impl CustomWidget<ReplayPickerMessage> for ReplayPicker {
    fn view(&self, state: &State) -> Element<'_, ReplayPickerMessage> {
        let mode = if state.config.use_mock_data {
            "Mock mode is on: play-style data is canned."
        } else {
            ""
        };
        let content = column![
            text("Open a replay").size(24),
            text_input("Replay ID", &self.replay_id)
                .id("replay-id-input")
                .on_submit(ReplayPickerMessage::Submit)
                .on_input(ReplayPickerMessage::IdEdited),
            button("Open")
                .on_press(ReplayPickerMessage::Submit)
                .style(button::primary),
            text(&self.error).style(text::danger),
            text(mode).size(12),
        ]
        .spacing(10);

        scrollable(container(content).center_x(Fill).padding(40)).into()
    }

    fn update(
        &mut self,
        message: ReplayPickerMessage,
        _state: &State,
    ) -> Command<ReplayPickerMessage> {
        match message {
            ReplayPickerMessage::IdEdited(id) => {
                self.replay_id = id;
                self.error.clear();
            }
            ReplayPickerMessage::Submit => {
                let id = self.replay_id.trim();
                if id.is_empty() {
                    self.error = "Replay ID must not be empty".to_owned();
                } else {
                    return Command::done(ReplayPickerMessage::Completed(
                        id.to_owned(),
                    ));
                }
            }
            ReplayPickerMessage::Completed(_) => {}
        }
        Command::none()
    }
}

impl ReplayPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Self::default()
        }
    }
}

use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, container, row, text, Text};
use iced::{Border, Element, Length};
use iced_fonts::bootstrap::icon_to_string;
use iced_fonts::{Bootstrap, BOOTSTRAP_FONT};

mod base;
mod replay_tags;
mod tag_dialog;
mod user_tags;

pub use base::CustomWidget;
pub use replay_tags::{ReplayTagDisplay, ReplayTagMessage};
pub use tag_dialog::{TagDialog, TagDialogMessage};
pub use user_tags::{UserTagDisplay, UserTagMessage};

pub fn icon_text<'a>(
    icon: Bootstrap,
) -> text::Text<'a, iced::Theme, iced::Renderer> {
    text(icon_to_string(icon)).font(BOOTSTRAP_FONT)
}

pub fn icon_button<'a, T>(
    icon: Bootstrap,
) -> button::Button<'a, T, iced::Theme, iced::Renderer> {
    button(
        icon_text(icon)
            .align_x(Horizontal::Center)
            .width(iced::Length::Fill),
    )
}

pub fn close_button<'a, T: Clone + 'a>(message: T) -> Element<'a, T> {
    container(
        button(icon_text(Bootstrap::X).size(20).width(Length::Shrink))
            .on_press(message)
            .style(button::text),
    )
    .align_x(Horizontal::Right)
    .into()
}

/// A rounded tag badge, with a remove button when `on_remove` is given.
pub fn tag_chip<'a, T: Clone + 'a>(
    name: &str,
    on_remove: Option<T>,
) -> Element<'a, T> {
    let tag_style = |theme: &iced::Theme| {
        let color = theme.extended_palette().secondary.weak;
        container::Style {
            background: Some(color.color.into()),
            text_color: Some(color.text),
            border: Border {
                radius: 4.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        }
    };
    let remove = on_remove.map(|message| {
        icon_button(Bootstrap::X)
            .style(button::text)
            .width(12.0)
            .padding(iced::Padding {
                left: 3.0,
                top: -4.0,
                ..iced::Padding::default()
            })
            .on_press(message)
    });
    container(
        row![Text::new(name.to_owned()).center()]
            .push_maybe(remove)
            .spacing(2)
            .align_y(Vertical::Center),
    )
    .style(tag_style)
    .padding(iced::Padding {
        top: 4.0,
        bottom: 4.0,
        left: 8.0,
        right: 6.0,
    })
    .width(Length::Shrink)
    .into()
}

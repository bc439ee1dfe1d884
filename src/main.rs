use clap::Parser as _;
use iced::keyboard::key::Named as NamedKey;
use iced::keyboard::Modifiers;
use iced::widget::{center, text};
use iced::{Center, Element, Fill, Task as Command};
use log::error;

mod cli;
mod config;
mod entities;
mod screens;
mod state;
mod utils;
mod widgets;

use crate::cli::{CliArgs, LaunchOptions};
use crate::config::{Config, ConfigError};
use crate::entities::{LoggedInUser, Replay};
use crate::screens::{
    ReplayPicker, ReplayPickerMessage, ReplayScreen, ReplayScreenMessage,
};
use crate::state::State;
use crate::widgets::CustomWidget;

pub fn main() -> iced::Result {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let Some(options) = CliArgs::parse().run() else {
        return Ok(());
    };

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .font(iced_fonts::REQUIRED_FONT_BYTES)
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .window_size((420.0, 560.0))
        .run_with(move || App::new(options))
}

#[derive(Debug)]
struct App {
    state: State,
    screen: Screen,
    replay_id: Option<String>,
}

#[derive(Debug, Default)]
enum Screen {
    #[default]
    Loading,
    Picker(ReplayPicker),
    Replay(ReplayScreen),
}

#[derive(Clone, Debug)]
struct Context {
    user: Option<LoggedInUser>,
    replay: Option<Replay>,
}

#[derive(Debug, Clone)]
enum Message {
    ConfigLoaded(Result<Config, ConfigError>),
    ContextLoaded(Result<Box<Context>, String>),
    PickerProxy(ReplayPickerMessage),
    ReplayProxy(ReplayScreenMessage),
    KeyPressed(NamedKey, Modifiers),
}

impl App {
    fn new(options: LaunchOptions) -> (Self, Command<Message>) {
        (
            Self {
                state: State::default(),
                screen: Screen::Loading,
                replay_id: options.replay_id,
            },
            Command::perform(Config::load(), Message::ConfigLoaded),
        )
    }

    fn title(&self) -> String {
        match &self.screen {
            Screen::Replay(screen) => {
                format!("{} - Replay tags", screen.replay().display_name())
            }
            _ => "Replay tags".to_owned(),
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::ConfigLoaded(result) => {
                self.state.config = result.unwrap_or_else(|e| {
                    error!("{e} Falling back to defaults.");
                    Config::default().with_env_overrides()
                });
                return self.reload();
            }
            Message::ContextLoaded(Ok(context)) => {
                let Context { user, replay } = *context;
                self.state.user = user;
                self.screen = match replay {
                    Some(replay) => Screen::Replay(ReplayScreen::new(replay)),
                    None => Screen::Picker(ReplayPicker::new()),
                };
            }
            Message::ContextLoaded(Err(e)) => {
                error!("Loading failed: {e}");
                self.replay_id = None;
                self.screen = Screen::Picker(ReplayPicker::with_error(e));
            }
            Message::PickerProxy(ReplayPickerMessage::Completed(id)) => {
                self.replay_id = Some(id);
                return self.reload();
            }
            Message::PickerProxy(msg) => {
                if let Screen::Picker(screen) = &mut self.screen {
                    return screen
                        .update(msg, &self.state)
                        .map(Message::PickerProxy);
                }
            }
            Message::ReplayProxy(msg) => {
                if let Screen::Replay(screen) = &mut self.screen {
                    return screen
                        .update(msg, &self.state)
                        .map(Message::ReplayProxy);
                }
            }
            Message::KeyPressed(key, modifiers) => {
                let task = match &mut self.screen {
                    Screen::Loading => None,
                    Screen::Picker(screen) => screen
                        .handle_key(key, modifiers)
                        .map(|c| c.map(Message::PickerProxy)),
                    Screen::Replay(screen) => screen
                        .handle_key(key, modifiers)
                        .map(|c| c.map(Message::ReplayProxy)),
                };
                return task.unwrap_or_else(Command::none);
            }
        }
        Command::none()
    }

    fn view(&self) -> Element<'_, Message> {
        match &self.screen {
            Screen::Loading => loading_message(),
            Screen::Picker(screen) => {
                screen.view(&self.state).map(Message::PickerProxy)
            }
            Screen::Replay(screen) => {
                screen.view(&self.state).map(Message::ReplayProxy)
            }
        }
    }

    fn reload(&mut self) -> Command<Message> {
        self.screen = Screen::Loading;
        let config = self.state.config.clone();
        let replay_id = self.replay_id.clone();
        Command::future(async move {
            Message::ContextLoaded(
                load_context(config, replay_id).await.map(Box::new),
            )
        })
    }

    fn subscription(&self) -> iced::Subscription<Message> {
        use iced::keyboard::{on_key_press, Key};
        on_key_press(|key, modifiers| {
            let Key::Named(key) = key else {
                return None;
            };
            Some(Message::KeyPressed(key, modifiers))
        })
    }
}

async fn load_context(
    config: Config,
    replay_id: Option<String>,
) -> Result<Context, String> {
    let client = config.client().map_err(|e| e.to_string())?;
    let replay = async {
        match &replay_id {
            Some(id) => Replay::load(id, &client).await.map(Some),
            None => Ok(None),
        }
    };
    let (user, replay) =
        futures::try_join!(LoggedInUser::load(&client), replay)
            .map_err(|e| e.to_string())?;
    Ok(Context { user, replay })
}

fn loading_message<'a>() -> Element<'a, Message> {
    center(text("Loading...").width(Fill).align_x(Center).size(50)).into()
}

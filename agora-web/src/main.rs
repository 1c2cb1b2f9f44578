use agora_client::api::Session;
use gloo_storage::{LocalStorage, Storage};
use yew::prelude::*;

mod api;
mod ui;

const KEY_LOGIN: &str = "login";

lazy_static::lazy_static! {
    static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<Root>::new().render();
}

/// Where the backend lives, and who is using it if anyone
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LoginInfo {
    host: String,
    api_key: String,
    session: Option<Session>,
}

impl LoginInfo {
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn principal(&self) -> Option<&agora_client::api::Principal> {
        self.session.as_ref().map(|s| &s.principal)
    }
}

enum RootMsg {
    Connected(LoginInfo),
    ShowLogin,
    Logout,
}

struct Root {
    login: Option<LoginInfo>,
    show_login: bool,
}

fn save_login(login: &LoginInfo) {
    if let Err(e) = LocalStorage::set(KEY_LOGIN, login) {
        tracing::error!(?e, "failed saving login info to local storage");
    }
}

impl Component for Root {
    type Message = RootMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let login: Option<LoginInfo> = LocalStorage::get(KEY_LOGIN).ok();
        Root {
            show_login: login.is_none(),
            login,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            RootMsg::Connected(login) => {
                save_login(&login);
                self.login = Some(login);
                self.show_login = false;
            }
            RootMsg::ShowLogin => self.show_login = true,
            RootMsg::Logout => {
                if let Some(login) = &mut self.login {
                    let backend = api::backend(login);
                    login.session = None;
                    save_login(login);
                    ctx.link().send_future(async move {
                        backend.sign_out().await;
                        RootMsg::ShowLogin
                    });
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match (&self.login, self.show_login) {
            (Some(login), false) => html! {
                <ui::App
                    login={ login.clone() }
                    on_login={ ctx.link().callback(|_| RootMsg::ShowLogin) }
                    on_logout={ ctx.link().callback(|_| RootMsg::Logout) }
                />
            },
            (login, _) => html! {
                <div class="container">
                    <ui::Login
                        info={ login.clone() }
                        on_connected={ ctx.link().callback(RootMsg::Connected) }
                    />
                </div>
            },
        }
    }
}

use yew::prelude::*;

use crate::{api, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct LoginProps {
    pub info: Option<LoginInfo>,
    pub on_connected: Callback<LoginInfo>,
}

pub struct Login {
    host: String,
    api_key: String,
    email: String,
    pass: String,
    connecting: bool,
    error: Option<String>,
}

pub enum LoginMsg {
    HostChanged(String),
    ApiKeyChanged(String),
    EmailChanged(String),
    PassChanged(String),
    SubmitClicked,
    Connected(LoginInfo),
    Failed(String),
}

impl Component for Login {
    type Message = LoginMsg;
    type Properties = LoginProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (host, api_key) = match &ctx.props().info {
            Some(i) => (i.host.clone(), i.api_key.clone()),
            None => (String::new(), String::new()),
        };
        Self {
            host,
            api_key,
            email: String::new(),
            pass: String::new(),
            connecting: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            LoginMsg::HostChanged(h) => self.host = h,
            LoginMsg::ApiKeyChanged(k) => self.api_key = k,
            LoginMsg::EmailChanged(u) => self.email = u,
            LoginMsg::PassChanged(p) => self.pass = p,
            LoginMsg::SubmitClicked => {
                self.connecting = true;
                self.error = None;
                let connect = api::connect(
                    self.host.clone(),
                    self.api_key.clone(),
                    self.email.clone(),
                    self.pass.clone(),
                );
                ctx.link().send_future(async move {
                    match connect.await {
                        Ok(login) => LoginMsg::Connected(login),
                        Err(e) => {
                            tracing::warn!(?e, "failed connecting");
                            LoginMsg::Failed(e.to_string())
                        }
                    }
                });
            }
            LoginMsg::Connected(login) => {
                self.connecting = false;
                self.pass.clear();
                ctx.props().on_connected.emit(login);
            }
            LoginMsg::Failed(e) => {
                self.connecting = false;
                self.error = Some(e);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        macro_rules! callback_for {
            ($msg:ident) => {
                ctx.link().callback(|e: web_sys::Event| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    LoginMsg::$msg(input.value())
                })
            };
        }
        html! {<>
            <div class="text-center my-4">
                <h1>{ "Login" }</h1>
                <p class="text-muted">{ "Leave the email empty to browse anonymously" }</p>
            </div>
            <form class="login-form" onsubmit={ ctx.link().callback(|e: SubmitEvent| {
                e.prevent_default();
                LoginMsg::SubmitClicked
            }) }>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="host">{ "Host" }</label>
                    <input
                        type="url"
                        class="form-control form-control-lg"
                        id="host"
                        placeholder="https://project.example.org"
                        value={self.host.clone()}
                        onchange={callback_for!(HostChanged)}
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="api-key">{ "API key" }</label>
                    <input
                        type="text"
                        class="form-control form-control-lg"
                        id="api-key"
                        value={self.api_key.clone()}
                        onchange={callback_for!(ApiKeyChanged)}
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="email">{ "Email" }</label>
                    <input
                        type="email"
                        class="form-control form-control-lg"
                        id="email"
                        placeholder="user@example.org"
                        value={self.email.clone()}
                        onchange={callback_for!(EmailChanged)}
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="pass">{ "Password" }</label>
                    <input
                        type="password"
                        class="form-control form-control-lg"
                        id="pass"
                        value={self.pass.clone()}
                        onchange={callback_for!(PassChanged)}
                    />
                </div>
                if let Some(e) = &self.error {
                    <div class="alert alert-danger" role="alert">{ e }</div>
                }
                <button type="submit" class="btn btn-primary" disabled={ self.connecting }>
                    { if self.connecting { "Connecting..." } else { "Connect" } }
                </button>
            </form>
        </>}
    }
}

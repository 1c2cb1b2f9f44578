use agora_client::api::{CommunityId, PostId};
use yew::prelude::*;

use crate::{ui, LoginInfo};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Page {
    Home,
    Communities,
    Community(CommunityId),
    Post(PostId),
    NewPost,
    NewCommunity,
}

#[derive(Clone, PartialEq, Properties)]
pub struct AppProps {
    pub login: LoginInfo,
    pub on_login: Callback<()>,
    pub on_logout: Callback<()>,
}

pub enum AppMsg {
    Navigate(Page),
}

pub struct App {
    page: Page,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        App { page: Page::Home }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Navigate(page) => {
                tracing::debug!(?page, "navigating");
                let changed = self.page != page;
                self.page = page;
                changed
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let p = ctx.props();
        let login = p.login.clone();
        let on_navigate = ctx.link().callback(AppMsg::Navigate);
        let content = match self.page {
            Page::Home => html! {
                <ui::PostList
                    key="home"
                    { login }
                    community={ None::<CommunityId> }
                    on_open={ on_navigate.reform(Page::Post) }
                />
            },
            Page::Communities => html! {
                <ui::Communities
                    { login }
                    on_open={ on_navigate.reform(Page::Community) }
                />
            },
            Page::Community(id) => html! {
                <ui::PostList
                    key={ format!("community-{}", id.0) }
                    { login }
                    community={ Some(id) }
                    on_open={ on_navigate.reform(Page::Post) }
                />
            },
            Page::Post(id) => html! {
                <ui::PostPage key={ id.0.to_string() } { login } post={ id } />
            },
            Page::NewPost => html! {
                <ui::NewPostForm
                    { login }
                    on_created={ on_navigate.reform(|_| Page::Home) }
                />
            },
            Page::NewCommunity => html! {
                <ui::NewCommunityForm
                    { login }
                    on_created={ on_navigate.reform(|_| Page::Communities) }
                />
            },
        };
        html! {
            <div class="container-fluid">
                <ui::Navbar
                    author={ p.login.principal().map(|p| p.author.clone()) }
                    { on_navigate }
                    on_login={ p.on_login.clone() }
                    on_logout={ p.on_logout.clone() }
                />
                <main class="container py-4">
                    { content }
                </main>
            </div>
        }
    }
}

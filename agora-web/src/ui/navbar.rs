use yew::prelude::*;

use crate::ui::Page;

#[derive(Clone, PartialEq, Properties)]
pub struct NavbarProps {
    pub author: Option<String>,
    pub on_navigate: Callback<Page>,
    pub on_login: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(p: &NavbarProps) -> Html {
    let link = |page: Page, label: &'static str| {
        html! {
            <li class="nav-item">
                <a class="nav-link" href="#" onclick={ p.on_navigate.reform(move |e: MouseEvent| {
                    e.prevent_default();
                    page
                }) }>
                    { label }
                </a>
            </li>
        }
    };
    html! {
        <nav class="navbar navbar-expand-lg border-bottom">
            <span class="navbar-brand">{ "agora" }</span>
            <ul class="navbar-nav me-auto">
                { link(Page::Home, "Home") }
                { link(Page::NewPost, "Create post") }
                { link(Page::Communities, "Communities") }
                { link(Page::NewCommunity, "Create community") }
            </ul>
            {
                match &p.author {
                    Some(author) => html! {
                        <div class="d-flex align-items-center">
                            <span class="me-3">{ author }</span>
                            <button class="btn btn-outline-secondary" onclick={ p.on_logout.reform(|_| ()) }>
                                { "Sign out" }
                            </button>
                        </div>
                    },
                    None => html! {
                        <button class="btn btn-primary" onclick={ p.on_login.reform(|_| ()) }>
                            { "Sign in" }
                        </button>
                    },
                }
            }
        </nav>
    }
}

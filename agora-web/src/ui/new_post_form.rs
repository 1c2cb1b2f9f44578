use agora_client::{
    api::{Community, CommunityId, Error, NewPost},
    create_post, CommunityStore,
};
use yew::prelude::*;

use crate::{api, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct NewPostFormProps {
    pub login: LoginInfo,
    pub on_created: Callback<()>,
}

pub enum NewPostMsg {
    CommunitiesLoaded(Result<Vec<Community>, Error>),
    TitleChanged(String),
    ContentChanged(String),
    CommunityChanged(String),
    ImageUrlChanged(String),
    Submit,
    Done(Result<(), Error>),
}

pub struct NewPostForm {
    communities: Vec<Community>,
    title: String,
    content: String,
    community: Option<CommunityId>,
    image_url: String,
    pending: bool,
    error: Option<String>,
}

impl NewPostForm {
    fn new_post(&self) -> NewPost {
        let image_url = self.image_url.trim();
        NewPost {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            community_id: self.community,
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
            avatar_url: None,
        }
    }
}

impl Component for NewPostForm {
    type Message = NewPostMsg;
    type Properties = NewPostFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        let backend = api::backend(&ctx.props().login);
        ctx.link().send_future(async move {
            NewPostMsg::CommunitiesLoaded(backend.fetch_communities().await)
        });
        NewPostForm {
            communities: Vec::new(),
            title: String::new(),
            content: String::new(),
            community: None,
            image_url: String::new(),
            pending: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            NewPostMsg::CommunitiesLoaded(Ok(c)) => self.communities = c,
            NewPostMsg::CommunitiesLoaded(Err(e)) => {
                // posting outside of any community is still possible
                tracing::warn!(?e, "failed fetching communities");
            }
            NewPostMsg::TitleChanged(t) => self.title = t,
            NewPostMsg::ContentChanged(c) => self.content = c,
            NewPostMsg::CommunityChanged(c) => {
                self.community = c.parse().ok().map(CommunityId);
            }
            NewPostMsg::ImageUrlChanged(u) => self.image_url = u,
            NewPostMsg::Submit => {
                let post = self.new_post();
                if let Err(e) = post.validate() {
                    self.error = Some(e.to_string());
                    return true;
                }
                self.pending = true;
                self.error = None;
                let backend = api::backend(&ctx.props().login);
                ctx.link()
                    .send_future(async move { NewPostMsg::Done(create_post(&backend, post).await) });
            }
            NewPostMsg::Done(Ok(())) => {
                self.pending = false;
                ctx.props().on_created.emit(());
            }
            NewPostMsg::Done(Err(e)) => {
                tracing::error!(?e, "failed creating post");
                self.pending = false;
                self.error = Some(e.to_string());
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <form onsubmit={ link.callback(|e: SubmitEvent| {
                e.prevent_default();
                NewPostMsg::Submit
            }) }>
                <h2>{ "Create a post" }</h2>
                <div class="mb-3">
                    <label class="form-label" for="post-title">{ "Title" }</label>
                    <input
                        class="form-control"
                        id="post-title"
                        value={ self.title.clone() }
                        oninput={ link.callback(|e: InputEvent| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            NewPostMsg::TitleChanged(input.value())
                        }) }
                    />
                </div>
                <div class="mb-3">
                    <label class="form-label" for="post-content">{ "Content" }</label>
                    <textarea
                        class="form-control"
                        id="post-content"
                        rows="6"
                        value={ self.content.clone() }
                        oninput={ link.callback(|e: InputEvent| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            NewPostMsg::ContentChanged(input.value())
                        }) }
                    />
                </div>
                <div class="mb-3">
                    <label class="form-label" for="post-community">{ "Community" }</label>
                    <select
                        class="form-select"
                        id="post-community"
                        onchange={ link.callback(|e: Event| {
                            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                            NewPostMsg::CommunityChanged(input.value())
                        }) }
                    >
                        <option value="" selected={ self.community.is_none() }>{ "None" }</option>
                        { for self.communities.iter().map(|c| html! {
                            <option
                                key={ c.id.0 }
                                value={ c.id.0.to_string() }
                                selected={ self.community == Some(c.id) }
                            >
                                { &c.title }
                            </option>
                        }) }
                    </select>
                </div>
                <div class="mb-3">
                    <label class="form-label" for="post-image">{ "Image URL" }</label>
                    <input
                        type="url"
                        class="form-control"
                        id="post-image"
                        value={ self.image_url.clone() }
                        oninput={ link.callback(|e: InputEvent| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            NewPostMsg::ImageUrlChanged(input.value())
                        }) }
                    />
                </div>
                if let Some(e) = &self.error {
                    <div class="alert alert-danger">{ e }</div>
                }
                <button type="submit" class="btn btn-primary" disabled={ self.pending }>
                    { if self.pending { "Creating..." } else { "Create post" } }
                </button>
            </form>
        }
    }
}

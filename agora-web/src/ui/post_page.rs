use agora_client::{
    api::{Error, Post, PostId},
    PostStore,
};
use yew::prelude::*;

use crate::{api, ui, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct PostPageProps {
    pub login: LoginInfo,
    pub post: PostId,
}

pub enum PostPageMsg {
    Loaded(Result<Post, Error>),
}

pub struct PostPage {
    post: Option<Result<Post, String>>,
}

impl Component for PostPage {
    type Message = PostPageMsg;
    type Properties = PostPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let backend = api::backend(&ctx.props().login);
        let post = ctx.props().post;
        ctx.link()
            .send_future(async move { PostPageMsg::Loaded(backend.fetch_post(post).await) });
        PostPage { post: None }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            PostPageMsg::Loaded(res) => {
                self.post = Some(res.map_err(|e| {
                    tracing::error!(post = ?ctx.props().post, ?e, "failed fetching post");
                    match e {
                        Error::NotFound => String::from("This post does not exist"),
                        e => e.to_string(),
                    }
                }));
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let post = match &self.post {
            None => return html! { <div class="spinner-border" role="status"></div> },
            Some(Err(e)) => return html! { <div class="alert alert-danger">{ e }</div> },
            Some(Ok(post)) => post,
        };
        html! {
            <article class="post">
                <h1>{ &post.title }</h1>
                <small class="text-muted">
                    { post.created_at.format("%Y-%m-%d %H:%M").to_string() }
                </small>
                if let Some(url) = &post.image_url {
                    <img class="img-fluid my-3" src={ url.clone() } alt={ post.title.clone() } />
                }
                <p class="post-content">{ &post.content }</p>
                <ui::LikeButton login={ ctx.props().login.clone() } post={ post.id } />
                <ui::CommentSection login={ ctx.props().login.clone() } post={ post.id } />
            </article>
        }
    }
}

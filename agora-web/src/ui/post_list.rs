use agora_client::{
    api::{CommunityId, Error, Post, PostId},
    CommentStore, PostStore, VoteStore, VoteTally,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{api, LoginInfo};

const EXCERPT_LEN: usize = 200;

#[derive(Clone, PartialEq, Properties)]
pub struct PostListProps {
    pub login: LoginInfo,
    pub community: Option<CommunityId>,
    pub on_open: Callback<PostId>,
}

pub enum PostListMsg {
    Loaded(Result<Vec<Post>, Error>),
}

pub struct PostList {
    posts: Option<Result<Vec<Post>, String>>,
}

impl PostList {
    fn load(ctx: &Context<Self>) {
        let backend = api::backend(&ctx.props().login);
        let community = ctx.props().community;
        ctx.link().send_future(async move {
            PostListMsg::Loaded(match community {
                None => backend.fetch_posts().await,
                Some(c) => backend.fetch_community_posts(c).await,
            })
        });
    }
}

impl Component for PostList {
    type Message = PostListMsg;
    type Properties = PostListProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self::load(ctx);
        PostList { posts: None }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        Self::load(ctx);
        true
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            PostListMsg::Loaded(res) => {
                if let Err(e) = &res {
                    tracing::error!(?e, "failed fetching posts");
                }
                self.posts = Some(res.map_err(|e| e.to_string()));
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.posts {
            None => html! { <div class="spinner-border" role="status"></div> },
            Some(Err(e)) => html! { <div class="alert alert-danger">{ e }</div> },
            Some(Ok(posts)) if posts.is_empty() => html! {
                <p class="text-muted">{ "No posts yet" }</p>
            },
            Some(Ok(posts)) => html! {
                <div class="post-list">
                    { for posts.iter().map(|post| html! {
                        <PostCard
                            key={ post.id.0 }
                            login={ ctx.props().login.clone() }
                            post={ post.clone() }
                            on_open={ ctx.props().on_open.clone() }
                        />
                    }) }
                </div>
            },
        }
    }
}

#[derive(Clone, PartialEq, Properties)]
pub struct PostCardProps {
    pub login: LoginInfo,
    pub post: Post,
    pub on_open: Callback<PostId>,
}

/// Up-votes and number of comments of a post
type Counts = (usize, usize);

#[function_component(PostCard)]
pub fn post_card(p: &PostCardProps) -> Html {
    let counts = use_state(|| None::<Counts>);
    {
        let counts = counts.clone();
        let backend = api::backend(&p.login);
        use_effect_with_deps(
            move |post: &PostId| {
                let post = *post;
                spawn_local(async move {
                    let votes = backend.fetch_votes(post).await;
                    let comments = backend.fetch_comments(post).await;
                    match (votes, comments) {
                        (Ok(v), Ok(c)) => {
                            counts.set(Some((VoteTally::from_votes(&v, None).up, c.len())))
                        }
                        (Err(e), _) | (_, Err(e)) => {
                            tracing::warn!(?post, ?e, "failed fetching post counts")
                        }
                    }
                });
                || ()
            },
            p.post.id,
        );
    }

    let post = &p.post;
    let excerpt = match post.content.chars().count() > EXCERPT_LEN {
        true => format!("{}…", post.content.chars().take(EXCERPT_LEN).collect::<String>()),
        false => post.content.clone(),
    };
    let id = post.id;
    html! {
        <div class="card mb-3 post-card" onclick={ p.on_open.reform(move |_| id) }>
            if let Some(url) = &post.image_url {
                <img class="card-img-top" src={ url.clone() } alt={ post.title.clone() } />
            }
            <div class="card-body">
                <div class="d-flex align-items-center mb-2">
                    if let Some(url) = &post.avatar_url {
                        <img class="avatar me-2" src={ url.clone() } alt="" />
                    }
                    <h5 class="card-title mb-0">{ &post.title }</h5>
                </div>
                <p class="card-text">{ excerpt }</p>
                <small class="text-muted">
                    { post.created_at.format("%Y-%m-%d").to_string() }
                    if let Some((up, comments)) = *counts {
                        { format!(" · ♥ {up} · {comments} comments") }
                    }
                </small>
            </div>
        </div>
    }
}

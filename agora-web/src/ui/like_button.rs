use agora_client::{
    api::{Error, PostId, Vote, VoteValue},
    cast_vote, VoteChange, VoteStore, VoteTally,
};
use yew::prelude::*;

use crate::{api, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct LikeButtonProps {
    pub login: LoginInfo,
    pub post: PostId,
}

pub enum LikeButtonMsg {
    Loaded(Result<Vec<Vote>, Error>),
    Cast(VoteValue),
    Done(Result<VoteChange, Error>),
}

pub struct LikeButton {
    tally: VoteTally,
    voting: bool,
    error: Option<String>,
}

impl LikeButton {
    fn load(ctx: &Context<Self>) {
        let backend = api::backend(&ctx.props().login);
        let post = ctx.props().post;
        ctx.link()
            .send_future(async move { LikeButtonMsg::Loaded(backend.fetch_votes(post).await) });
    }
}

impl Component for LikeButton {
    type Message = LikeButtonMsg;
    type Properties = LikeButtonProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self::load(ctx);
        LikeButton {
            tally: VoteTally::default(),
            voting: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            LikeButtonMsg::Loaded(Ok(votes)) => {
                self.tally = VoteTally::from_votes(&votes, ctx.props().login.principal());
            }
            LikeButtonMsg::Loaded(Err(e)) => {
                tracing::error!(?e, "failed fetching votes");
                self.error = Some(e.to_string());
            }
            LikeButtonMsg::Cast(value) => {
                if ctx.props().login.principal().is_none() {
                    self.error = Some(Error::not_logged_in_to_vote().to_string());
                    return true;
                }
                self.voting = true;
                self.error = None;
                let login = ctx.props().login.clone();
                let post = ctx.props().post;
                ctx.link().send_future(async move {
                    let backend = api::backend(&login);
                    LikeButtonMsg::Done(cast_vote(&backend, post, login.principal(), value).await)
                });
            }
            LikeButtonMsg::Done(res) => {
                self.voting = false;
                if let Err(e) = res {
                    tracing::error!(?e, "failed voting");
                    self.error = Some(e.to_string());
                }
                Self::load(ctx);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let class = |value| match self.tally.mine == Some(value) {
            true => "btn btn-primary",
            false => "btn btn-outline-primary",
        };
        html! {
            <div class="like-button d-flex align-items-center my-3">
                <button
                    class={ class(VoteValue::Up) }
                    disabled={ self.voting }
                    aria-label="Up-vote"
                    onclick={ ctx.link().callback(|_| LikeButtonMsg::Cast(VoteValue::Up)) }
                >
                    { format!("♥ {}", self.tally.up) }
                </button>
                <button
                    class={ classes!(class(VoteValue::Down), "ms-2") }
                    disabled={ self.voting }
                    aria-label="Down-vote"
                    onclick={ ctx.link().callback(|_| LikeButtonMsg::Cast(VoteValue::Down)) }
                >
                    { format!("▼ {}", self.tally.down) }
                </button>
                if let Some(e) = &self.error {
                    <span class="text-danger ms-3">{ e }</span>
                }
            </div>
        }
    }
}

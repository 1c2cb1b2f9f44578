use agora_client::{
    api::{Community, CommunityId, Error},
    CommunityStore,
};
use yew::prelude::*;

use crate::{api, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct CommunitiesProps {
    pub login: LoginInfo,
    pub on_open: Callback<CommunityId>,
}

pub enum CommunitiesMsg {
    Loaded(Result<Vec<Community>, Error>),
}

pub struct Communities {
    communities: Option<Result<Vec<Community>, String>>,
}

impl Component for Communities {
    type Message = CommunitiesMsg;
    type Properties = CommunitiesProps;

    fn create(ctx: &Context<Self>) -> Self {
        let backend = api::backend(&ctx.props().login);
        ctx.link().send_future(async move {
            CommunitiesMsg::Loaded(backend.fetch_communities().await)
        });
        Communities { communities: None }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let CommunitiesMsg::Loaded(res) = msg;
        if let Err(e) = &res {
            tracing::error!(?e, "failed fetching communities");
        }
        self.communities = Some(res.map_err(|e| e.to_string()));
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let communities = match &self.communities {
            None => return html! { <div class="spinner-border" role="status"></div> },
            Some(Err(e)) => return html! { <div class="alert alert-danger">{ e }</div> },
            Some(Ok(c)) => c,
        };
        html! {
            <div class="list-group">
                { for communities.iter().map(|c| {
                    let id = c.id;
                    html! {
                        <button
                            key={ id.0 }
                            type="button"
                            class="list-group-item list-group-item-action"
                            onclick={ ctx.props().on_open.reform(move |_| id) }
                        >
                            <h5 class="mb-1">{ &c.title }</h5>
                            <p class="mb-1 text-muted">{ &c.description }</p>
                        </button>
                    }
                }) }
            </div>
        }
    }
}

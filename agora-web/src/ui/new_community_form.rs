use agora_client::{
    api::{Error, NewCommunity},
    create_community,
};
use yew::prelude::*;

use crate::{api, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct NewCommunityFormProps {
    pub login: LoginInfo,
    pub on_created: Callback<()>,
}

pub enum NewCommunityMsg {
    NameChanged(String),
    DescriptionChanged(String),
    Submit,
    Done(Result<(), Error>),
}

pub struct NewCommunityForm {
    name: String,
    description: String,
    pending: bool,
    error: Option<String>,
}

impl Component for NewCommunityForm {
    type Message = NewCommunityMsg;
    type Properties = NewCommunityFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        NewCommunityForm {
            name: String::new(),
            description: String::new(),
            pending: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            NewCommunityMsg::NameChanged(n) => self.name = n,
            NewCommunityMsg::DescriptionChanged(d) => self.description = d,
            NewCommunityMsg::Submit => {
                let community = NewCommunity {
                    title: self.name.trim().to_string(),
                    description: self.description.clone(),
                };
                // fail fast, without a round-trip
                if let Err(e) = community.validate() {
                    self.error = Some(e.to_string());
                    return true;
                }
                self.pending = true;
                self.error = None;
                let backend = api::backend(&ctx.props().login);
                ctx.link().send_future(async move {
                    NewCommunityMsg::Done(create_community(&backend, community).await)
                });
            }
            NewCommunityMsg::Done(Ok(())) => {
                self.pending = false;
                ctx.props().on_created.emit(());
            }
            NewCommunityMsg::Done(Err(e)) => {
                tracing::error!(?e, "failed creating community");
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
                NewCommunityMsg::Submit
            }) }>
                <h2>{ "Create a community" }</h2>
                <div class="mb-3">
                    <label class="form-label" for="community-name">{ "Name" }</label>
                    <input
                        class="form-control"
                        id="community-name"
                        value={ self.name.clone() }
                        oninput={ link.callback(|e: InputEvent| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            NewCommunityMsg::NameChanged(input.value())
                        }) }
                    />
                </div>
                <div class="mb-3">
                    <label class="form-label" for="community-description">{ "Description" }</label>
                    <textarea
                        class="form-control"
                        id="community-description"
                        rows="3"
                        value={ self.description.clone() }
                        oninput={ link.callback(|e: InputEvent| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            NewCommunityMsg::DescriptionChanged(input.value())
                        }) }
                    />
                </div>
                if let Some(e) = &self.error {
                    <div class="alert alert-danger">{ e }</div>
                }
                <button type="submit" class="btn btn-primary" disabled={ self.pending }>
                    { if self.pending { "Creating..." } else { "Create community" } }
                </button>
            </form>
        }
    }
}

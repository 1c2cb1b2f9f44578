use agora_client::{
    api::{Comment, CommentId, Error, NewComment, PostId},
    CommentSection as Section, CommentStore, SectionView,
};
use yew::prelude::*;

use crate::{
    api,
    ui::{view_comment, NodeMsg},
    LoginInfo,
};

#[derive(Clone, PartialEq, Properties)]
pub struct CommentSectionProps {
    pub login: LoginInfo,
    pub post: PostId,
}

pub enum SectionMsg {
    Reload,
    Loaded(u64, Result<Vec<Comment>, Error>),
    ComposerInput(String),
    SubmitTopLevel,
    TopLevelDone(Result<(), Error>),
    Node(CommentId, NodeMsg),
    DismissNotice,
}

pub struct CommentSection {
    section: Section,

    /// Only the response to the latest fetch is taken into account
    generation: u64,

    /// Shown when an action was refused before reaching the backend
    notice: Option<String>,
}

impl CommentSection {
    fn load(&mut self, ctx: &Context<Self>) {
        self.generation += 1;
        self.section.start_loading();
        let generation = self.generation;
        let backend = api::backend(&ctx.props().login);
        let post = self.section.post_id();
        ctx.link().send_future(async move {
            SectionMsg::Loaded(generation, backend.fetch_comments(post).await)
        });
    }

    fn insert(
        ctx: &Context<Self>,
        comment: NewComment,
        done: impl 'static + FnOnce(Result<(), Error>) -> SectionMsg,
    ) {
        let backend = api::backend(&ctx.props().login);
        ctx.link()
            .send_future(async move { done(backend.insert_comment(comment).await) });
    }

    fn refused(&mut self, e: Error) {
        tracing::info!(?e, "refused to submit comment");
        self.notice = Some(e.to_string());
    }

    fn update_node(&mut self, ctx: &Context<Self>, id: CommentId, msg: NodeMsg) {
        match msg {
            NodeMsg::ToggleReply => self.section.node_mut(id).toggle_reply(),
            NodeMsg::ReplyInput(text) => self.section.node_mut(id).set_reply_text(text),
            NodeMsg::ToggleCollapse => self.section.node_mut(id).toggle_collapse(),
            NodeMsg::SubmitReply => {
                match self.section.begin_reply(id, ctx.props().login.principal()) {
                    Ok(Some(comment)) => {
                        self.notice = None;
                        Self::insert(ctx, comment, move |res| {
                            SectionMsg::Node(id, NodeMsg::ReplyDone(res))
                        });
                    }
                    Ok(None) => (),
                    Err(e) => self.refused(e),
                }
            }
            NodeMsg::ReplyDone(res) => {
                if self.section.finish_reply(id, &res) {
                    self.load(ctx);
                }
            }
        }
    }
}

impl Component for CommentSection {
    type Message = SectionMsg;
    type Properties = CommentSectionProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut this = CommentSection {
            section: Section::new(ctx.props().post),
            generation: 0,
            notice: None,
        };
        this.load(ctx);
        this
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().post != old_props.post {
            self.section = Section::new(ctx.props().post);
            self.notice = None;
            self.load(ctx);
        } else if ctx.props().login.principal().is_some() {
            // the user just signed in
            self.notice = None;
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            SectionMsg::Reload => self.load(ctx),
            SectionMsg::Loaded(generation, res) => {
                if generation != self.generation {
                    tracing::debug!(generation, "ignoring outdated comments");
                    return false;
                }
                self.section.received(res);
            }
            SectionMsg::ComposerInput(text) => self.section.composer_mut().set_text(text),
            SectionMsg::SubmitTopLevel => {
                match self.section.begin_top_level(ctx.props().login.principal()) {
                    Ok(Some(comment)) => {
                        self.notice = None;
                        Self::insert(ctx, comment, SectionMsg::TopLevelDone);
                    }
                    Ok(None) => return false,
                    Err(e) => self.refused(e),
                }
            }
            SectionMsg::TopLevelDone(res) => {
                if self.section.finish_top_level(&res) {
                    self.load(ctx);
                }
            }
            SectionMsg::Node(id, msg) => self.update_node(ctx, id, msg),
            SectionMsg::DismissNotice => self.notice = None,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let composer = self.section.composer();
        let on_node_msg = link.callback(|(id, msg)| SectionMsg::Node(id, msg));

        let comments = match self.section.view() {
            SectionView::Loading => html! {
                <div class="spinner-border" role="status"></div>
            },
            SectionView::Failed(e) => html! {
                <div class="alert alert-danger">
                    { e }
                    <button class="btn btn-link" onclick={ link.callback(|_| SectionMsg::Reload) }>
                        { "Retry" }
                    </button>
                </div>
            },
            SectionView::Loaded(forest) if forest.is_empty() => html! {
                <p class="text-muted">{ "No comments yet" }</p>
            },
            SectionView::Loaded(forest) => html! {
                <div class="comment-forest">
                    { for forest.iter().map(|root| view_comment(root, &self.section, &on_node_msg)) }
                </div>
            },
        };

        html! {
            <section class="comment-section mt-4">
                <h4>
                    { format!("Comments ({})", self.section.comment_count()) }
                    if self.section.is_refreshing() {
                        <span class="spinner-border spinner-border-sm ms-2" role="status"></span>
                    }
                </h4>
                if let Some(notice) = &self.notice {
                    <div class="alert alert-warning d-flex justify-content-between" role="alert">
                        { notice }
                        <button
                            type="button"
                            class="btn-close"
                            aria-label="Close"
                            onclick={ link.callback(|_| SectionMsg::DismissNotice) }
                        ></button>
                    </div>
                }
                <form
                    class="mb-4"
                    onsubmit={ link.callback(|e: SubmitEvent| {
                        e.prevent_default();
                        SectionMsg::SubmitTopLevel
                    }) }
                >
                    <textarea
                        class="form-control"
                        rows="3"
                        placeholder="Write a comment..."
                        value={ composer.text().to_string() }
                        disabled={ composer.is_pending() }
                        oninput={ link.callback(|e: InputEvent| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            SectionMsg::ComposerInput(input.value())
                        }) }
                    />
                    <button type="submit" class="btn btn-primary mt-2" disabled={ !composer.can_submit() }>
                        { if composer.is_pending() { "Posting..." } else { "Comment" } }
                    </button>
                    if let Some(e) = composer.error() {
                        <div class="text-danger small">{ e }</div>
                    }
                </form>
                { comments }
            </section>
        }
    }
}

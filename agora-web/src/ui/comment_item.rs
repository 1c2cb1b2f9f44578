use agora_client::{
    api::{CommentId, Error},
    CommentNode, CommentSection, NodeState, SubmitStatus,
};
use yew::prelude::*;

pub enum NodeMsg {
    ToggleReply,
    ReplyInput(String),
    SubmitReply,
    ReplyDone(Result<(), Error>),
    ToggleCollapse,
}

/// Renders `node` and, unless collapsed, its replies
pub fn view_comment(
    node: &CommentNode,
    section: &CommentSection,
    on_msg: &Callback<(CommentId, NodeMsg)>,
) -> Html {
    let id = node.id();
    let default_state = NodeState::default();
    let state = section.node(id).unwrap_or(&default_state);
    let c = &node.comment;
    let msg = |m: fn() -> NodeMsg| on_msg.reform(move |_: MouseEvent| (id, m()));

    let collapse_toggle = NodeState::shows_collapse_toggle(node).then(|| {
        let label = match state.is_collapsed() {
            true => format!("[+] {} hidden", node.len() - 1),
            false => String::from("[-]"),
        };
        html! {
            <button class="btn btn-link btn-sm p-0 me-2" onclick={ msg(|| NodeMsg::ToggleCollapse) }>
                { label }
            </button>
        }
    });

    html! {
        <div class="comment" key={ id.0 }>
            <div class="comment-header">
                { for collapse_toggle }
                <strong>{ &c.author }</strong>
                <small class="text-muted ms-2">
                    { c.created_at.format("%Y-%m-%d %H:%M").to_string() }
                </small>
            </div>
            <div class="comment-content">{ &c.content }</div>
            <button class="btn btn-link btn-sm p-0" onclick={ msg(|| NodeMsg::ToggleReply) }>
                { if state.is_reply_open() { "Cancel" } else { "Reply" } }
            </button>
            if state.is_reply_open() {
                { view_reply_box(id, state, on_msg) }
            }
            <div class="comment-children ms-4 ps-3 border-start">
                { for state.visible_children(node).iter().map(|child| view_comment(child, section, on_msg)) }
            </div>
        </div>
    }
}

fn view_reply_box(id: CommentId, state: &NodeState, on_msg: &Callback<(CommentId, NodeMsg)>) -> Html {
    let reply = state.reply();
    html! {
        <form
            class="reply-box my-2"
            onsubmit={ on_msg.reform(move |e: SubmitEvent| {
                e.prevent_default();
                (id, NodeMsg::SubmitReply)
            }) }
        >
            <textarea
                class="form-control"
                rows="2"
                placeholder="Write a reply..."
                value={ reply.text().to_string() }
                disabled={ reply.is_pending() }
                oninput={ on_msg.reform(move |e: InputEvent| {
                    let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                    (id, NodeMsg::ReplyInput(input.value()))
                }) }
            />
            <button type="submit" class="btn btn-primary btn-sm mt-1" disabled={ !reply.can_submit() }>
                { match reply.status() {
                    SubmitStatus::Pending => "Posting...",
                    _ => "Post reply",
                } }
            </button>
            if let Some(e) = reply.error() {
                <div class="text-danger small">{ e }</div>
            }
        </form>
    }
}

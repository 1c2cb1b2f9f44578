mod app;
pub use app::{App, Page};

mod comment_item;
pub use comment_item::{view_comment, NodeMsg};

mod comment_section;
pub use comment_section::CommentSection;

mod communities;
pub use communities::Communities;

mod like_button;
pub use like_button::LikeButton;

mod login;
pub use login::Login;

mod navbar;
pub use navbar::Navbar;

mod new_community_form;
pub use new_community_form::NewCommunityForm;

mod new_post_form;
pub use new_post_form::NewPostForm;

mod post_list;
pub use post_list::PostList;

mod post_page;
pub use post_page::PostPage;

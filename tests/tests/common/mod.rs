#![allow(dead_code)]

use agora_client::{
    api::{PostId, Principal},
    CommentSection,
};
use agora_mock_server::MockServer;

macro_rules! do_mock_test {
    ( $name:ident, $typ:ty, $fn:expr ) => {
        #[test]
        fn $name() {
            if std::env::var("RUST_LOG").is_ok() {
                let _ = tracing_subscriber::fmt::try_init();
            }
            let runtime = std::panic::AssertUnwindSafe(
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("failed initializing tokio runtime"),
            );
            bolero::check!()
                .with_type::<$typ>()
                .cloned()
                .for_each(move |v| {
                    let () = runtime.block_on($fn(v));
                })
        }
    };
}

pub struct Fixture {
    pub server: MockServer,
    pub alice: Principal,
    pub bob: Principal,
    pub post: PostId,
}

impl Fixture {
    pub fn new() -> Fixture {
        let server = MockServer::new();
        let alice = server.admin_create_user("alice@example.org", "hunter2", "alice");
        let bob = server.admin_create_user("bob@example.org", "hunter3", "bob");
        let post = server.test_add_post("Hello world", None);
        Fixture {
            server,
            alice,
            bob,
            post,
        }
    }

    pub async fn loaded_section(&self) -> CommentSection {
        let mut section = CommentSection::new(self.post);
        section.load(&self.server).await;
        section
    }
}

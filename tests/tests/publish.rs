use agora_client::{
    api::{Error, NewCommunity, NewPost},
    create_community, create_post, CommunityStore, PostStore,
};

mod common;
use common::Fixture;

fn new_post(title: &str, content: &str) -> NewPost {
    NewPost {
        title: String::from(title),
        content: String::from(content),
        community_id: None,
        image_url: None,
        avatar_url: None,
    }
}

#[tokio::test]
async fn invalid_posts_are_not_sent() {
    let f = Fixture::new();
    let res = create_post(&f.server, new_post("Hi", "Some content")).await;
    assert!(matches!(res, Err(Error::InvalidField { field: "title", .. })));
    assert_eq!(f.server.test_num_writes(), 0);
}

#[tokio::test]
async fn posts_in_communities() {
    let f = Fixture::new();
    create_community(
        &f.server,
        NewCommunity {
            title: String::from("rustaceans"),
            description: String::from("All about crabs"),
        },
    )
    .await
    .unwrap();
    let community = f.server.fetch_communities().await.unwrap()[0].id;

    let mut p = new_post("Borrow checker", "It is fine, actually");
    p.community_id = Some(community);
    create_post(&f.server, p).await.unwrap();

    let posts = f.server.fetch_community_posts(community).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Borrow checker");

    // the fixture's post comes last
    let all = f.server.fetch_posts().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].id, f.post);
    assert_eq!(f.server.fetch_post(f.post).await.unwrap().title, "Hello world");
}

#[tokio::test]
async fn short_community_description() {
    let f = Fixture::new();
    let res = create_community(
        &f.server,
        NewCommunity {
            title: String::from("rustaceans"),
            description: String::from("crabs"),
        },
    )
    .await;
    assert!(matches!(
        res,
        Err(Error::InvalidField {
            field: "description",
            ..
        })
    ));
}

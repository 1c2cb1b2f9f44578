use agora_client::{
    api::{Error, VoteValue},
    cast_vote, VoteChange, VoteStore, VoteTally,
};

#[macro_use]
mod common;
use common::Fixture;

async fn tally(f: &Fixture) -> VoteTally {
    let votes = f.server.fetch_votes(f.post).await.unwrap();
    VoteTally::from_votes(&votes, Some(&f.alice))
}

#[tokio::test]
async fn voting_toggles() {
    let f = Fixture::new();

    let change = cast_vote(&f.server, f.post, Some(&f.alice), VoteValue::Up)
        .await
        .unwrap();
    assert!(matches!(change, VoteChange::Insert(_)));
    assert_eq!(
        tally(&f).await,
        VoteTally {
            up: 1,
            down: 0,
            mine: Some(VoteValue::Up),
        }
    );

    cast_vote(&f.server, f.post, Some(&f.alice), VoteValue::Down)
        .await
        .unwrap();
    assert_eq!(
        tally(&f).await,
        VoteTally {
            up: 0,
            down: 1,
            mine: Some(VoteValue::Down),
        }
    );

    cast_vote(&f.server, f.post, Some(&f.bob), VoteValue::Up)
        .await
        .unwrap();
    let change = cast_vote(&f.server, f.post, Some(&f.alice), VoteValue::Down)
        .await
        .unwrap();
    assert!(matches!(change, VoteChange::Delete(_)));
    assert_eq!(
        tally(&f).await,
        VoteTally {
            up: 1,
            down: 0,
            mine: None,
        }
    );
}

#[tokio::test]
async fn voting_requires_login() {
    let f = Fixture::new();
    let res = cast_vote(&f.server, f.post, None, VoteValue::Up).await;
    assert!(matches!(res, Err(ref e) if e.is_not_logged_in()));
    assert_eq!(f.server.test_num_writes(), 0);
}

#[tokio::test]
async fn failed_vote_changes_nothing() {
    let f = Fixture::new();
    f.server
        .fail_next_write(Error::Transport(String::from("offline")));
    let res = cast_vote(&f.server, f.post, Some(&f.alice), VoteValue::Up).await;
    assert_eq!(res, Err(Error::Transport(String::from("offline"))));
    assert_eq!(tally(&f).await, VoteTally::default());
}

async fn any_sequence(votes: Vec<(bool, bool)>) {
    let f = Fixture::new();
    for (as_alice, up) in votes {
        let who = if as_alice { &f.alice } else { &f.bob };
        let value = if up { VoteValue::Up } else { VoteValue::Down };
        cast_vote(&f.server, f.post, Some(who), value).await.unwrap();
    }
    // at most one vote per user and post
    let t = tally(&f).await;
    assert!(t.up + t.down <= 2);
}

do_mock_test!(one_vote_per_user, Vec<(bool, bool)>, any_sequence);

use crate::{
    api::{Error, NewVote, PostId, Principal, UserId, Vote, VoteId, VoteValue},
    VoteStore,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VoteTally {
    pub up: usize,
    pub down: usize,

    /// What the current user voted, if anything
    pub mine: Option<VoteValue>,
}

impl VoteTally {
    pub fn from_votes(votes: &[Vote], principal: Option<&Principal>) -> VoteTally {
        let mut res = VoteTally::default();
        for v in votes {
            match v.vote {
                VoteValue::Up => res.up += 1,
                VoteValue::Down => res.down += 1,
            }
            if Some(v.user_id) == principal.map(|p| p.id) {
                res.mine = Some(v.vote);
            }
        }
        res
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VoteChange {
    Insert(NewVote),
    Update(VoteId, VoteValue),
    Delete(VoteId),
}

/// Voting the same thing twice takes the vote back
pub fn plan_vote(existing: Option<&Vote>, post: PostId, user: UserId, value: VoteValue) -> VoteChange {
    match existing {
        None => VoteChange::Insert(NewVote {
            post_id: post,
            user_id: user,
            vote: value,
        }),
        Some(v) if v.vote == value => VoteChange::Delete(v.id),
        Some(v) => VoteChange::Update(v.id, value),
    }
}

/// Casts `value` on `post` for `principal`, returning what was done. The
/// caller is expected to refetch the votes afterwards.
pub async fn cast_vote<S: VoteStore + ?Sized>(
    store: &S,
    post: PostId,
    principal: Option<&Principal>,
    value: VoteValue,
) -> Result<VoteChange, Error> {
    let principal = principal.ok_or_else(Error::not_logged_in_to_vote)?;
    let votes = store.fetch_votes(post).await?;
    let existing = votes.iter().find(|v| v.user_id == principal.id);
    let change = plan_vote(existing, post, principal.id, value);
    tracing::debug!(?post, ?change, "casting vote");
    match &change {
        VoteChange::Insert(v) => store.insert_vote(v.clone()).await?,
        VoteChange::Update(id, value) => store.update_vote(*id, *value).await?,
        VoteChange::Delete(id) => store.delete_vote(*id).await?,
    }
    Ok(change)
}

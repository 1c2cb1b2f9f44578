use std::collections::HashMap;

use agora_client::{
    api::{
        Comment, CommentId, Community, CommunityId, Error, NewComment, NewCommunity, NewPost,
        NewVote, Post, PostId, Principal, Session, Time, UserId, Uuid, Vote, VoteId, VoteValue,
    },
    CommentStore, CommunityStore, PostStore, VoteStore,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;

/// In-memory stand-in for the hosted backend.
///
/// Rows are timestamped one second apart in insertion order, so that
/// "most recent first" is deterministic.
pub struct MockServer(Mutex<Db>);

#[derive(Debug)]
struct Db {
    epoch: Time,
    next_id: i64,
    users: HashMap<String, DbUser>,
    sessions: HashMap<String, Principal>,
    communities: Vec<Community>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    votes: Vec<Vote>,

    fail_next_fetch: Option<Error>,
    fail_next_write: Option<Error>,
    num_writes: usize,
    num_comment_inserts: usize,
}

#[derive(Debug)]
struct DbUser {
    pass: String,
    principal: Principal,
}

fn row_level_security(table: &str) -> Error {
    Error::Store {
        message: format!("new row violates row-level security policy for table \"{table}\""),
        code: Some(String::from("42501")),
    }
}

impl Db {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn now(&self) -> Time {
        self.epoch + Duration::seconds(self.next_id)
    }

    fn fetch(&mut self) -> Result<(), Error> {
        match self.fail_next_fetch.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn write(&mut self) -> Result<(), Error> {
        match self.fail_next_write.take() {
            Some(e) => Err(e),
            None => {
                self.num_writes += 1;
                Ok(())
            }
        }
    }

    fn check_author(&self, user: UserId, table: &str) -> Result<(), Error> {
        if self.users.values().any(|u| u.principal.id == user) {
            Ok(())
        } else {
            Err(row_level_security(table))
        }
    }
}

fn most_recent_first<T>(rows: impl Iterator<Item = T>) -> Vec<T> {
    let mut res = rows.collect::<Vec<_>>();
    res.reverse();
    res
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer(Mutex::new(Db {
            epoch: Utc::now(),
            next_id: 0,
            users: HashMap::new(),
            sessions: HashMap::new(),
            communities: Vec::new(),
            posts: Vec::new(),
            comments: Vec::new(),
            votes: Vec::new(),
            fail_next_fetch: None,
            fail_next_write: None,
            num_writes: 0,
            num_comment_inserts: 0,
        }))
    }

    pub fn admin_create_user(&self, email: &str, password: &str, name: &str) -> Principal {
        let principal = Principal {
            id: UserId(Uuid::new_v4()),
            author: String::from(name),
        };
        self.0.lock().users.insert(
            String::from(email),
            DbUser {
                pass: String::from(password),
                principal: principal.clone(),
            },
        );
        principal
    }

    pub fn auth(&self, email: &str, password: &str) -> Result<Session, Error> {
        let mut db = self.0.lock();
        let principal = match db.users.get(email) {
            Some(u) if u.pass == password => u.principal.clone(),
            _ => {
                return Err(Error::Store {
                    message: String::from("Invalid login credentials"),
                    code: Some(String::from("invalid_grant")),
                })
            }
        };
        let access_token = Uuid::new_v4().to_string();
        db.sessions.insert(access_token.clone(), principal.clone());
        Ok(Session {
            access_token,
            principal,
        })
    }

    pub fn unauth(&self, access_token: &str) {
        self.0.lock().sessions.remove(access_token);
    }

    pub fn whoami(&self, access_token: &str) -> Option<Principal> {
        self.0.lock().sessions.get(access_token).cloned()
    }

    /// Makes the next fetch of any kind fail with `err`
    pub fn fail_next_fetch(&self, err: Error) {
        self.0.lock().fail_next_fetch = Some(err);
    }

    /// Makes the next write of any kind fail with `err`
    pub fn fail_next_write(&self, err: Error) {
        self.0.lock().fail_next_write = Some(err);
    }

    /// Number of writes that reached the store successfully
    /// Writes that went through
    pub fn test_num_writes(&self) -> usize {
        self.0.lock().num_writes
    }

    /// Calls to `insert_comment`, whether they succeeded or not
    pub fn test_num_comment_inserts(&self) -> usize {
        self.0.lock().num_comment_inserts
    }

    pub fn test_comments(&self) -> Vec<Comment> {
        self.0.lock().comments.clone()
    }

    pub fn test_add_post(&self, title: &str, community: Option<CommunityId>) -> PostId {
        let mut db = self.0.lock();
        let id = PostId(db.next_id());
        let created_at = db.now();
        db.posts.push(Post {
            id,
            title: String::from(title),
            content: String::new(),
            created_at,
            image_url: None,
            avatar_url: None,
            community_id: community,
        });
        id
    }

    /// Adds a comment as-is, bypassing every check
    pub fn test_add_comment(
        &self,
        post: PostId,
        parent: Option<CommentId>,
        content: &str,
        principal: &Principal,
    ) -> CommentId {
        let mut db = self.0.lock();
        let id = CommentId(db.next_id());
        let created_at = db.now();
        db.comments.push(Comment {
            id,
            post_id: post,
            parent_comment_id: parent,
            content: String::from(content),
            author: principal.author.clone(),
            user_id: principal.id,
            created_at,
        });
        id
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

#[async_trait(?Send)]
impl CommentStore for MockServer {
    async fn fetch_comments(&self, post: PostId) -> Result<Vec<Comment>, Error> {
        let mut db = self.0.lock();
        db.fetch()?;
        Ok(most_recent_first(
            db.comments.iter().filter(|c| c.post_id == post).cloned(),
        ))
    }

    async fn insert_comment(&self, c: NewComment) -> Result<(), Error> {
        let mut db = self.0.lock();
        db.num_comment_inserts += 1;
        c.validate()?;
        db.check_author(c.user_id, "comments")?;
        db.write()?;
        let id = CommentId(db.next_id());
        let created_at = db.now();
        tracing::debug!(?id, post = ?c.post_id, parent = ?c.parent_comment_id, "inserting comment");
        db.comments.push(Comment {
            id,
            post_id: c.post_id,
            parent_comment_id: c.parent_comment_id,
            content: c.content,
            author: c.author,
            user_id: c.user_id,
            created_at,
        });
        Ok(())
    }
}

#[async_trait(?Send)]
impl PostStore for MockServer {
    async fn fetch_posts(&self) -> Result<Vec<Post>, Error> {
        let mut db = self.0.lock();
        db.fetch()?;
        Ok(most_recent_first(db.posts.iter().cloned()))
    }

    async fn fetch_post(&self, post: PostId) -> Result<Post, Error> {
        let mut db = self.0.lock();
        db.fetch()?;
        db.posts
            .iter()
            .find(|p| p.id == post)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn fetch_community_posts(&self, community: CommunityId) -> Result<Vec<Post>, Error> {
        let mut db = self.0.lock();
        db.fetch()?;
        Ok(most_recent_first(
            db.posts
                .iter()
                .filter(|p| p.community_id == Some(community))
                .cloned(),
        ))
    }

    async fn insert_post(&self, p: NewPost) -> Result<(), Error> {
        p.validate()?;
        let mut db = self.0.lock();
        db.write()?;
        let id = PostId(db.next_id());
        let created_at = db.now();
        db.posts.push(Post {
            id,
            title: p.title,
            content: p.content,
            created_at,
            image_url: p.image_url,
            avatar_url: p.avatar_url,
            community_id: p.community_id,
        });
        Ok(())
    }
}

#[async_trait(?Send)]
impl CommunityStore for MockServer {
    async fn fetch_communities(&self) -> Result<Vec<Community>, Error> {
        let mut db = self.0.lock();
        db.fetch()?;
        Ok(most_recent_first(db.communities.iter().cloned()))
    }

    async fn insert_community(&self, c: NewCommunity) -> Result<(), Error> {
        c.validate()?;
        let mut db = self.0.lock();
        db.write()?;
        let id = CommunityId(db.next_id());
        let created_at = db.now();
        db.communities.push(Community {
            id,
            title: c.title,
            description: c.description,
            created_at,
        });
        Ok(())
    }
}

#[async_trait(?Send)]
impl VoteStore for MockServer {
    async fn fetch_votes(&self, post: PostId) -> Result<Vec<Vote>, Error> {
        let mut db = self.0.lock();
        db.fetch()?;
        Ok(db.votes.iter().filter(|v| v.post_id == post).cloned().collect())
    }

    async fn insert_vote(&self, v: NewVote) -> Result<(), Error> {
        let mut db = self.0.lock();
        db.check_author(v.user_id, "votes")?;
        if db
            .votes
            .iter()
            .any(|o| o.post_id == v.post_id && o.user_id == v.user_id)
        {
            return Err(Error::Store {
                message: String::from(
                    "duplicate key value violates unique constraint \"votes_post_id_user_id_key\"",
                ),
                code: Some(String::from("23505")),
            });
        }
        db.write()?;
        let id = VoteId(db.next_id());
        let created_at = db.now();
        db.votes.push(Vote {
            id,
            post_id: v.post_id,
            user_id: v.user_id,
            vote: v.vote,
            created_at,
        });
        Ok(())
    }

    async fn update_vote(&self, vote: VoteId, value: VoteValue) -> Result<(), Error> {
        let mut db = self.0.lock();
        db.write()?;
        // like the hosted backend, updating no row is not an error
        if let Some(v) = db.votes.iter_mut().find(|v| v.id == vote) {
            v.vote = value;
        }
        Ok(())
    }

    async fn delete_vote(&self, vote: VoteId) -> Result<(), Error> {
        let mut db = self.0.lock();
        db.write()?;
        db.votes.retain(|v| v.id != vote);
        Ok(())
    }
}

//! Client for the hosted backend: a PostgREST-style table API under
//! `/rest/v1` and a password-grant auth API under `/auth/v1`.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::{
        Comment, Community, CommunityId, Error, NewComment, NewCommunity, NewPost, NewVote, Post,
        PostId, Principal, Session, UserId, Vote, VoteId, VoteValue,
    },
    CommentStore, CommunityStore, PostStore, VoteStore,
};

const COMMENTS: &str = "comments";
const COMMUNITIES: &str = "community";
const POSTS: &str = "posts";
const VOTES: &str = "votes";

fn transport(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}

#[derive(Clone, Debug)]
pub struct RestBackend {
    client: reqwest::Client,
    host: String,
    api_key: String,

    /// Requests are made anonymously (with the api key only) if unset
    access_token: Option<String>,
}

impl RestBackend {
    pub fn new(client: reqwest::Client, host: &str, api_key: String) -> RestBackend {
        RestBackend {
            client,
            host: String::from(host.trim_end_matches('/')),
            api_key,
            access_token: None,
        }
    }

    pub fn with_session(mut self, session: Option<&Session>) -> RestBackend {
        self.access_token = session.map(|s| s.access_token.clone());
        self
    }

    fn table_url(&self, table: &str, filters: &[(&str, String)]) -> String {
        let mut url = format!("{}/rest/v1/{}", self.host, table);
        for (i, (key, value)) in filters.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }
        url
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let token = self.access_token.as_deref().unwrap_or(&self.api_key);
        self.client
            .request(method, url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(token)
    }

    async fn send(req: RequestBuilder) -> Result<Response, Error> {
        let resp = req.send().await.map_err(transport)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.bytes().await.map_err(transport)?;
        let err = Error::from_response(status.as_u16(), &body);
        tracing::error!(?err, %status, "request to backend failed");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T, Error> {
        resp.json()
            .await
            .map_err(|e| Error::Transport(format!("decoding {what}: {e}")))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let req = self.request(Method::GET, self.table_url(table, filters));
        Self::decode(Self::send(req).await?, table).await
    }

    /// Fails with `Error::NotFound` if no row matches
    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<T, Error> {
        let req = self
            .request(Method::GET, self.table_url(table, filters))
            .header("Accept", "application/vnd.pgrst.object+json");
        Self::decode(Self::send(req).await?, table).await
    }

    async fn insert<T: Serialize + ?Sized>(&self, table: &str, row: &T) -> Result<(), Error> {
        let req = self
            .request(Method::POST, self.table_url(table, &[]))
            .header("Prefer", "return=minimal")
            .json(row);
        Self::send(req).await.map(|_| ())
    }

    async fn update<T: Serialize + ?Sized>(
        &self,
        table: &str,
        id: i64,
        changes: &T,
    ) -> Result<(), Error> {
        let url = self.table_url(table, &[("id", format!("eq.{id}"))]);
        let req = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=minimal")
            .json(changes);
        Self::send(req).await.map(|_| ())
    }

    async fn delete(&self, table: &str, id: i64) -> Result<(), Error> {
        let url = self.table_url(table, &[("id", format!("eq.{id}"))]);
        Self::send(self.request(Method::DELETE, url))
            .await
            .map(|_| ())
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error> {
        let req = self
            .client
            .post(format!("{}/auth/v1/token?grant_type=password", self.host))
            .header("apikey", self.api_key.as_str())
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }));
        let token: TokenResponse = Self::decode(Self::send(req).await?, "session").await?;
        tracing::info!(user = ?token.user.id, "signed in");
        Ok(token.into_session())
    }

    /// Revokes the current session, if any. Failures are only logged.
    pub async fn sign_out(&self) {
        if self.access_token.is_none() {
            return;
        }
        let req = self.request(Method::POST, format!("{}/auth/v1/logout", self.host));
        if let Err(e) = Self::send(req).await {
            tracing::warn!(?e, "failed signing out");
        }
    }
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(serde::Deserialize)]
struct AuthUser {
    id: UserId,

    #[serde(default)]
    email: Option<String>,

    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl AuthUser {
    fn display_name(&self) -> String {
        ["user_name", "full_name", "name"]
            .iter()
            .find_map(|k| self.user_metadata.get(*k).and_then(|n| n.as_str()))
            .or(self.email.as_deref())
            .map(String::from)
            .unwrap_or_else(|| String::from("anonymous"))
    }
}

impl TokenResponse {
    fn into_session(self) -> Session {
        Session {
            principal: Principal {
                id: self.user.id,
                author: self.user.display_name(),
            },
            access_token: self.access_token,
        }
    }
}

fn most_recent_first() -> (&'static str, String) {
    ("order", String::from("created_at.desc"))
}

#[async_trait(?Send)]
impl CommentStore for RestBackend {
    async fn fetch_comments(&self, post: PostId) -> Result<Vec<Comment>, Error> {
        self.select(
            COMMENTS,
            &[("post_id", format!("eq.{post}")), most_recent_first()],
        )
        .await
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<(), Error> {
        comment.validate()?;
        self.insert(COMMENTS, &comment).await
    }
}

#[async_trait(?Send)]
impl PostStore for RestBackend {
    async fn fetch_posts(&self) -> Result<Vec<Post>, Error> {
        self.select(POSTS, &[most_recent_first()]).await
    }

    async fn fetch_post(&self, post: PostId) -> Result<Post, Error> {
        self.select_one(POSTS, &[("id", format!("eq.{post}"))]).await
    }

    async fn fetch_community_posts(&self, community: CommunityId) -> Result<Vec<Post>, Error> {
        self.select(
            POSTS,
            &[
                ("community_id", format!("eq.{}", community.0)),
                most_recent_first(),
            ],
        )
        .await
    }

    async fn insert_post(&self, post: NewPost) -> Result<(), Error> {
        post.validate()?;
        self.insert(POSTS, &post).await
    }
}

#[async_trait(?Send)]
impl CommunityStore for RestBackend {
    async fn fetch_communities(&self) -> Result<Vec<Community>, Error> {
        self.select(COMMUNITIES, &[most_recent_first()]).await
    }

    async fn insert_community(&self, community: NewCommunity) -> Result<(), Error> {
        community.validate()?;
        self.insert(COMMUNITIES, &community).await
    }
}

#[async_trait(?Send)]
impl VoteStore for RestBackend {
    async fn fetch_votes(&self, post: PostId) -> Result<Vec<Vote>, Error> {
        self.select(VOTES, &[("post_id", format!("eq.{post}"))])
            .await
    }

    async fn insert_vote(&self, vote: NewVote) -> Result<(), Error> {
        self.insert(VOTES, &vote).await
    }

    async fn update_vote(&self, vote: VoteId, value: VoteValue) -> Result<(), Error> {
        self.update(VOTES, vote.0, &serde_json::json!({ "vote": value }))
            .await
    }

    async fn delete_vote(&self, vote: VoteId) -> Result<(), Error> {
        self.delete(VOTES, vote.0).await
    }
}

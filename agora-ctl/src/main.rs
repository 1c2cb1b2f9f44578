use agora_client::{
    api::{CommentId, CommunityId, NewCommunity, NewPost, PostId, Session, VoteValue},
    build_tree, cast_vote, create_community, create_post, CommentNode, CommentSection,
    CommentStore, CommunityStore, PostStore, RestBackend, VoteStore, VoteTally,
};
use anyhow::Context;

#[derive(structopt::StructOpt)]
struct Opt {
    #[structopt(long, env = "AGORA_HOST")]
    host: String,

    #[structopt(long, env = "AGORA_API_KEY", hide_env_values = true)]
    api_key: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// List the most recent posts
    Posts {
        /// Only list the posts of this community
        #[structopt(long)]
        community: Option<i64>,
    },

    /// List the communities
    Communities,

    /// Show a post along with its comment threads
    Show { post: i64 },

    /// Comment on a post, as the user given by AGORA_EMAIL and AGORA_PASSWORD
    Comment {
        post: i64,

        text: String,

        /// Id of the comment to reply to
        #[structopt(long)]
        reply_to: Option<i64>,
    },

    /// Vote on a post. Voting the same way twice takes the vote back.
    Vote {
        post: i64,

        #[structopt(long)]
        down: bool,
    },

    /// Create a post
    NewPost {
        title: String,

        content: String,

        #[structopt(long)]
        community: Option<i64>,

        #[structopt(long)]
        image_url: Option<String>,
    },

    /// Create a community
    NewCommunity { name: String, description: String },
}

async fn sign_in(backend: &RestBackend) -> anyhow::Result<Session> {
    let email = std::env::var("AGORA_EMAIL").context("retrieving AGORA_EMAIL environment variable")?;
    let password =
        std::env::var("AGORA_PASSWORD").context("retrieving AGORA_PASSWORD environment variable")?;
    backend
        .sign_in(&email, &password)
        .await
        .with_context(|| format!("signing in as {email}"))
}

fn print_threads(forest: &[CommentNode]) {
    let mut stack = forest.iter().rev().map(|n| (n, 0)).collect::<Vec<_>>();
    while let Some((node, depth)) = stack.pop() {
        let c = &node.comment;
        println!(
            "{:indent$}#{} {} ({})",
            "",
            c.id.0,
            c.author,
            c.created_at.format("%Y-%m-%d %H:%M"),
            indent = depth * 4
        );
        for line in c.content.lines() {
            println!("{:indent$}  {}", "", line, indent = depth * 4);
        }
        stack.extend(node.children.iter().rev().map(|n| (n, depth + 1)));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opt = <Opt as structopt::StructOpt>::from_args();

    let backend = RestBackend::new(reqwest::Client::new(), &opt.host, opt.api_key);

    match opt.cmd {
        Command::Posts { community } => {
            let posts = match community {
                None => backend.fetch_posts().await,
                Some(c) => backend.fetch_community_posts(CommunityId(c)).await,
            }
            .context("fetching posts")?;
            for p in posts {
                println!("#{}\t{}\t{}", p.id, p.created_at.format("%Y-%m-%d"), p.title);
            }
        }
        Command::Communities => {
            let communities = backend
                .fetch_communities()
                .await
                .context("fetching communities")?;
            for c in communities {
                println!("#{}\t{}\t{}", c.id.0, c.title, c.description);
            }
        }
        Command::Show { post } => {
            let post = PostId(post);
            let p = backend
                .fetch_post(post)
                .await
                .with_context(|| format!("fetching post {post}"))?;
            let votes = backend
                .fetch_votes(post)
                .await
                .context("fetching votes")?;
            let tally = VoteTally::from_votes(&votes, None);
            let comments = backend
                .fetch_comments(post)
                .await
                .context("fetching comments")?;
            println!("{}\n", p.title);
            println!("{}\n", p.content);
            println!("+{} -{}, {} comments\n", tally.up, tally.down, comments.len());
            print_threads(&build_tree(&comments));
        }
        Command::Comment {
            post,
            text,
            reply_to,
        } => {
            let session = sign_in(&backend).await?;
            let backend = backend.with_session(Some(&session));
            let mut section = CommentSection::new(PostId(post));
            let principal = Some(&session.principal);
            let posted = match reply_to {
                None => {
                    section.composer_mut().set_text(text);
                    section.submit_top_level(&backend, principal).await
                }
                Some(parent) => {
                    let parent = CommentId(parent);
                    section.node_mut(parent).set_reply_text(text);
                    section.submit_reply(&backend, parent, principal).await
                }
            }
            .context("posting comment")?;
            anyhow::ensure!(posted, "refusing to post an empty comment");
            if let Some(forest) = section.forest() {
                print_threads(forest);
            }
            backend.sign_out().await;
        }
        Command::Vote { post, down } => {
            let session = sign_in(&backend).await?;
            let backend = backend.with_session(Some(&session));
            let value = match down {
                true => VoteValue::Down,
                false => VoteValue::Up,
            };
            let change = cast_vote(&backend, PostId(post), Some(&session.principal), value)
                .await
                .context("voting")?;
            tracing::info!(?change, "voted");
            backend.sign_out().await;
        }
        Command::NewPost {
            title,
            content,
            community,
            image_url,
        } => {
            let session = sign_in(&backend).await?;
            let backend = backend.with_session(Some(&session));
            let post = NewPost {
                title,
                content,
                community_id: community.map(CommunityId),
                image_url,
                avatar_url: None,
            };
            create_post(&backend, post).await.context("creating post")?;
            backend.sign_out().await;
        }
        Command::NewCommunity { name, description } => {
            let session = sign_in(&backend).await?;
            let backend = backend.with_session(Some(&session));
            let community = NewCommunity {
                title: name,
                description,
            };
            create_community(&backend, community)
                .await
                .context("creating community")?;
            backend.sign_out().await;
        }
    }

    Ok(())
}

use chrono::{Duration, Utc};
use rand::{seq::SliceRandom, Rng};
use uuid::Uuid;

const NUM_USERS: usize = 5;
const NUM_COMMUNITIES: usize = 4;
const NUM_POSTS: usize = 40;
const NUM_COMMENTS: usize = 400;
const NUM_VOTES: usize = 120;

const POST_TITLE_LEN: usize = 6;
const POST_CONTENT_LEN: usize = 60;
const COMMENT_LEN: usize = 25;

/// Chance for a comment to be a reply to an earlier comment of the same post
const REPLY_PROBABILITY: f64 = 0.7;

fn gen_n_items(table: &str, columns: &str, n: usize, mut f: impl FnMut(usize) -> String) {
    println!("INSERT INTO {} ({}) VALUES", table, columns);
    for i in 0..n {
        if i != 0 {
            println!(",");
        }
        print!("    {}", f(i));
    }
    println!();
    println!("ON CONFLICT DO NOTHING;");
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn main() {
    let mut rng = rand::thread_rng();
    let start = Utc::now() - Duration::days(30);

    let users = (0..NUM_USERS)
        .map(|_| (Uuid::new_v4(), lipsum::lipsum_words(1).to_lowercase()))
        .collect::<Vec<_>>();

    // Ids are given explicitly so that later tables can reference them
    gen_n_items(
        "community",
        "id, title, description, created_at",
        NUM_COMMUNITIES,
        |i| {
            format!(
                "({}, {}, {}, '{}')",
                i + 1,
                quote(&lipsum::lipsum_words(2)),
                quote(&lipsum::lipsum_words(12)),
                start + Duration::hours(i as i64),
            )
        },
    );

    gen_n_items(
        "posts",
        "id, title, content, community_id, created_at",
        NUM_POSTS,
        |i| {
            let community = match rng.gen_bool(0.5) {
                true => rng.gen_range(1..=NUM_COMMUNITIES).to_string(),
                false => String::from("NULL"),
            };
            format!(
                "({}, {}, {}, {}, '{}')",
                i + 1,
                quote(&lipsum::lipsum_words(POST_TITLE_LEN)),
                quote(&lipsum::lipsum_words(POST_CONTENT_LEN)),
                community,
                start + Duration::days(1) + Duration::hours(i as i64),
            )
        },
    );

    // Replies only ever point to an earlier comment of the same post
    let mut comments_per_post = vec![Vec::<usize>::new(); NUM_POSTS];
    gen_n_items(
        "comments",
        "id, post_id, parent_comment_id, content, author, user_id, created_at",
        NUM_COMMENTS,
        |i| {
            let id = i + 1;
            let post = rng.gen_range(0..NUM_POSTS);
            let parent = match comments_per_post[post].choose(&mut rng) {
                Some(p) if rng.gen_bool(REPLY_PROBABILITY) => p.to_string(),
                _ => String::from("NULL"),
            };
            comments_per_post[post].push(id);
            let (user, author) = users.choose(&mut rng).expect("no users generated");
            format!(
                "({}, {}, {}, {}, {}, '{}', '{}')",
                id,
                post + 1,
                parent,
                quote(&lipsum::lipsum_words(COMMENT_LEN)),
                quote(author),
                user,
                start + Duration::days(3) + Duration::minutes(i as i64),
            )
        },
    );

    gen_n_items("votes", "post_id, user_id, vote", NUM_VOTES, |_| {
        // duplicates are skipped by ON CONFLICT
        let post = rng.gen_range(1..=NUM_POSTS);
        let (user, _) = users.choose(&mut rng).expect("no users generated");
        let vote = match rng.gen_bool(0.8) {
            true => 1,
            false => -1,
        };
        format!("({}, '{}', {})", post, user, vote)
    });
}

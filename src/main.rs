use std::env;
use std::process;

use anyhow::Result;
use chrono::Utc;
use log::info;

use linkup_client::api::ApiClient;
use linkup_client::config::ClientConfig;
use linkup_client::dtos::auth::SignupIn;
use linkup_client::dtos::posts::NewPost;
use linkup_client::feed::{FeedController, FeedScope, FeedSnapshot};

#[derive(Debug)]
enum Command {
    Feed { user_id: Option<u64>, pages: u64 },
    Post { content: String },
    Like { post_id: u64 },
    Comments { post_id: u64 },
    Comment { post_id: u64, content: String },
    Login { email: String, password: String },
    Signup { email: String, username: String, password: String },
    Logout,
}

fn print_usage() {
    eprintln!("Usage: linkup <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  feed [pages]                  show the home feed (default 1 page)");
    eprintln!("  feed user <id> [pages]        show one member's posts");
    eprintln!("  post <content...>             publish a post");
    eprintln!("  like <post-id>                like a post");
    eprintln!("  comments <post-id>            list comments on a post");
    eprintln!("  comment <post-id> <text...>   comment on a post");
    eprintln!("  login <email> <password>      log in and store the token");
    eprintln!("  signup <email> <user> <pass>  create an account");
    eprintln!("  logout                        forget the stored token");
}

fn parse_args(args: &[String]) -> Option<Command> {
    let mut rest = args.iter();
    let command = match rest.next()?.as_str() {
        "feed" => {
            let tail: Vec<&String> = rest.collect();
            match tail.as_slice() {
                [] => Command::Feed { user_id: None, pages: 1 },
                [pages] if pages.as_str() != "user" => Command::Feed {
                    user_id: None,
                    pages: pages.parse().ok()?,
                },
                [user, id] if user.as_str() == "user" => Command::Feed {
                    user_id: Some(id.parse().ok()?),
                    pages: 1,
                },
                [user, id, pages] if user.as_str() == "user" => Command::Feed {
                    user_id: Some(id.parse().ok()?),
                    pages: pages.parse().ok()?,
                },
                _ => return None,
            }
        }
        "post" => {
            let content = join_words(rest)?;
            Command::Post { content }
        }
        "like" => Command::Like {
            post_id: rest.next()?.parse().ok()?,
        },
        "comments" => Command::Comments {
            post_id: rest.next()?.parse().ok()?,
        },
        "comment" => {
            let post_id = rest.next()?.parse().ok()?;
            let content = join_words(rest)?;
            Command::Comment { post_id, content }
        }
        "login" => Command::Login {
            email: rest.next()?.clone(),
            password: rest.next()?.clone(),
        },
        "signup" => Command::Signup {
            email: rest.next()?.clone(),
            username: rest.next()?.clone(),
            password: rest.next()?.clone(),
        },
        "logout" => Command::Logout,
        _ => return None,
    };
    Some(command)
}

fn join_words<'a>(words: impl Iterator<Item = &'a String>) -> Option<String> {
    let joined = words.map(String::as_str).collect::<Vec<_>>().join(" ");
    if joined.is_empty() { None } else { Some(joined) }
}

/// Drops HTML tags from rich-text content so posts render in a terminal.
fn strip_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut in_tag = false;
    for ch in content.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

fn render_feed(snapshot: &FeedSnapshot) {
    if let Some(error) = &snapshot.error {
        eprintln!("feed error: {}", error);
        return;
    }
    if snapshot.posts.is_empty() {
        println!("No posts yet.");
        return;
    }
    let now = Utc::now();
    for post in &snapshot.posts {
        let author = post
            .user
            .as_ref()
            .map(|u| format!("{} (@{})", u.name, u.username))
            .unwrap_or_else(|| format!("user #{}", post.user_id));
        println!("#{} {} · {}", post.id, author, post.time_ago(now));
        if let Some(title) = &post.title {
            println!("  {}", title);
        }
        println!("  {}", strip_html(&post.content));
        println!(
            "  {} likes · {} comments{}",
            post.likes_count,
            post.comments_count,
            if post.liked_by_current_user { " · liked" } else { "" }
        );
        println!();
    }
    if !snapshot.exhausted {
        println!("(more available — run with a higher page count)");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = parse_args(&args) else {
        print_usage();
        process::exit(1);
    };

    let config = ClientConfig::from_env()?;
    let api = ApiClient::new(&config)?;

    match command {
        Command::Feed { user_id, pages } => {
            let scope = match user_id {
                Some(id) => FeedScope::User(id),
                None => FeedScope::Home,
            };
            let feed = FeedController::with_scope(api, scope, config.per_page);
            feed.load_first_page().await?;
            for _ in 1..pages {
                feed.load_next_page().await?;
            }
            render_feed(&feed.snapshot());
        }
        Command::Post { content } => {
            let feed = FeedController::new(api, config.per_page);
            feed.create_post(NewPost::text(content)).await?;
            info!("post published");
            render_feed(&feed.snapshot());
        }
        Command::Like { post_id } => {
            let ack = api.like_post(post_id).await?;
            println!("Post {} now has {} likes.", post_id, ack.likes_count);
        }
        Command::Comments { post_id } => {
            let comments = api.get_comments(post_id).await?;
            if comments.is_empty() {
                println!("No comments yet.");
            }
            for comment in comments {
                let author = comment
                    .user
                    .as_ref()
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| format!("user #{}", comment.user_id));
                println!("{}: {}", author, strip_html(&comment.content));
            }
        }
        Command::Comment { post_id, content } => {
            // Through the controller so blank drafts are rejected before
            // any request is sent.
            let feed = FeedController::new(api, config.per_page);
            let comment = feed.add_comment(post_id, &content).await?;
            println!("Comment {} added to post {}.", comment.id, post_id);
        }
        Command::Login { email, password } => {
            let session = api.login(&email, &password).await?;
            match session.user {
                Some(user) => println!("Logged in as {} (@{}).", user.name, user.username),
                None => println!("Logged in."),
            }
        }
        Command::Signup { email, username, password } => {
            let out = api
                .signup(&SignupIn {
                    email: &email,
                    password: &password,
                    confirm_password: &password,
                    username: &username,
                })
                .await?;
            println!("{}", out.message);
        }
        Command::Logout => {
            api.logout();
            println!("Logged out.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_keeps_text() {
        assert_eq!(strip_html("<p>hello <b>world</b></p>"), "hello world");
        assert_eq!(strip_html("plain"), "plain");
        assert_eq!(strip_html("<ul><li>a</li><li>b</li></ul>"), "ab");
    }

    #[test]
    fn parses_feed_variants() {
        let args = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert!(matches!(
            parse_args(&args(&["feed"])),
            Some(Command::Feed { user_id: None, pages: 1 })
        ));
        assert!(matches!(
            parse_args(&args(&["feed", "3"])),
            Some(Command::Feed { user_id: None, pages: 3 })
        ));
        assert!(matches!(
            parse_args(&args(&["feed", "user", "7", "2"])),
            Some(Command::Feed { user_id: Some(7), pages: 2 })
        ));
        assert!(parse_args(&args(&["bogus"])).is_none());
    }

    #[test]
    fn post_requires_content() {
        let args = vec!["post".to_string()];
        assert!(parse_args(&args).is_none());
    }
}

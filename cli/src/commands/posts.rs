//! Post commands

use magicpen_core::{App, Composer, Post, Submission};

use super::fail;

const PROMPT_PREVIEW_CHARS: usize = 80;

fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > PROMPT_PREVIEW_CHARS {
        let cut: String = line.chars().take(PROMPT_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}

fn print_summary(post: &Post) {
    let created = post
        .created_at
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    println!("{}  [{}]  {}  {}", post.id, post.tone, created, preview(&post.prompt));
}

pub async fn generate(app: &App, prompt: String, tone: String) -> anyhow::Result<()> {
    let user = app.current_user().await;

    let mut composer = Composer::new();
    composer.set_prompt(prompt);
    composer.set_tone(tone);

    match composer.generate(app.client(), user.as_ref()).await {
        Submission::Generated => {
            if let Some(content) = composer.generated_post() {
                println!("{}", content);
            }
            if let Some(stats) = composer.stats() {
                eprintln!(
                    "\n{} posts generated, {} left",
                    stats.posts_generated, stats.remaining
                );
            }
            Ok(())
        }
        Submission::Failed | Submission::Rejected => {
            fail(composer.error().unwrap_or("Failed to generate post"))
        }
    }
}

pub async fn history(app: &App, all: bool) -> anyhow::Result<()> {
    let user = app.current_user().await;

    let mut composer = Composer::new();
    if all {
        composer.toggle_history();
    }
    composer.refresh_history(app.client(), user.as_ref()).await?;

    let posts = composer.visible_history();
    if posts.is_empty() {
        println!("No posts yet. Generate your first post!");
        return Ok(());
    }

    for post in posts {
        print_summary(post);
    }

    let hidden = composer.history().len() - posts.len();
    if hidden > 0 {
        println!("... {} more (use --all)", hidden);
    }
    Ok(())
}

pub async fn show(app: &App, id: &str) -> anyhow::Result<()> {
    let response = app.client().get_post(id).await?;
    let Some(post) = response.post.filter(|_| response.success) else {
        return fail(response.message.as_deref().unwrap_or("Post not found"));
    };

    print_summary(&post);
    println!();
    println!("{}", post.content);
    Ok(())
}

pub async fn delete(app: &App, id: &str) -> anyhow::Result<()> {
    let response = app.client().delete_post(id).await?;
    if !response.success {
        return fail(response.message.as_deref().unwrap_or("Failed to delete post"));
    }

    println!("Deleted {}", id);
    Ok(())
}

//! Prompt composer
//!
//! Form and history state behind the "create a post" screen. The composer
//! owns the busy flag: while a generation is in flight, further
//! submissions are refused instead of queued.

use magicpen_api::{ApiClient, ApiError, Post, PostAllowance, User};

pub const DEFAULT_TONE: &str = "Professional";

/// Number of history entries shown while the list is collapsed.
pub const HISTORY_PREVIEW_LEN: usize = 3;

const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt";
const GENERATE_FAILED_MESSAGE: &str = "Failed to generate post";
const HISTORY_FAILED_MESSAGE: &str = "Failed to load post history";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStats {
    pub posts_generated: usize,
    pub remaining: PostAllowance,
}

/// What happened to a generate submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// A post was generated and stored in the form
    Generated,
    /// The request ran but produced no post; see [`Composer::error`]
    Failed,
    /// Refused before any request was made
    Rejected,
}

#[derive(Debug, Clone)]
pub struct Composer {
    prompt: String,
    tone: String,
    generated_post: Option<String>,
    busy: bool,
    error: Option<String>,
    history: Vec<Post>,
    show_all_history: bool,
    stats: Option<UserStats>,
}

impl Composer {
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            tone: DEFAULT_TONE.to_string(),
            generated_post: None,
            busy: false,
            error: None,
            history: Vec::new(),
            show_all_history: false,
            stats: None,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn tone(&self) -> &str {
        &self.tone
    }

    pub fn set_tone(&mut self, tone: impl Into<String>) {
        self.tone = tone.into();
    }

    pub fn generated_post(&self) -> Option<&str> {
        self.generated_post.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Form-level error banner text.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn history(&self) -> &[Post] {
        &self.history
    }

    pub fn stats(&self) -> Option<UserStats> {
        self.stats
    }

    pub fn shows_all_history(&self) -> bool {
        self.show_all_history
    }

    pub fn toggle_history(&mut self) {
        self.show_all_history = !self.show_all_history;
    }

    pub fn visible_history(&self) -> &[Post] {
        if self.show_all_history {
            &self.history
        } else {
            &self.history[..self.history.len().min(HISTORY_PREVIEW_LEN)]
        }
    }

    /// Copy a past post back into the form.
    pub fn load_from_history(&mut self, post: &Post) {
        self.prompt = post.prompt.clone();
        self.tone = post.tone.clone();
        self.generated_post = Some(post.content.clone());
    }

    /// Submit the form.
    ///
    /// The exclusive borrow is what keeps a second submission out while one
    /// is in flight. `busy` mirrors it for a renderer that shares the
    /// composer behind a lock and must grey out the submit control.
    pub async fn generate(&mut self, client: &ApiClient, user: Option<&User>) -> Submission {
        if self.busy {
            tracing::debug!("Generation already in flight, ignoring submission");
            return Submission::Rejected;
        }

        if self.prompt.trim().is_empty() {
            self.error = Some(EMPTY_PROMPT_MESSAGE.to_string());
            return Submission::Rejected;
        }

        self.busy = true;
        self.error = None;

        let result = client.generate_post(&self.prompt, &self.tone).await;
        let outcome = match result {
            Ok(response) if response.success => match response.post {
                Some(post) => {
                    tracing::info!(post_id = %post.id, tone = %post.tone, "Generated post");
                    self.generated_post = Some(post.content);
                    Submission::Generated
                }
                None => {
                    self.error = Some(
                        response
                            .message
                            .unwrap_or_else(|| GENERATE_FAILED_MESSAGE.to_string()),
                    );
                    Submission::Failed
                }
            },
            Ok(response) => {
                self.error = Some(
                    response
                        .message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| GENERATE_FAILED_MESSAGE.to_string()),
                );
                Submission::Failed
            }
            Err(e) => {
                let message = e.message();
                self.error = Some(if message.is_empty() {
                    GENERATE_FAILED_MESSAGE.to_string()
                } else {
                    message.to_string()
                });
                Submission::Failed
            }
        };

        self.busy = false;

        if outcome == Submission::Generated {
            // A stale list is not worth a banner; the failure is logged
            let _ = self.refresh_history(client, user).await;
        }

        outcome
    }

    /// Reload the history list.
    ///
    /// On failure the list is left as is and the error is logged and
    /// returned; the screen may ignore it, a one-shot command should not.
    pub async fn refresh_history(
        &mut self,
        client: &ApiClient,
        user: Option<&User>,
    ) -> Result<(), ApiError> {
        let response = client.get_post_history().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load post history");
            e
        })?;

        if !response.success {
            tracing::warn!("Post history request was not successful");
            return Err(ApiError::request_failed(HISTORY_FAILED_MESSAGE));
        }

        self.stats = Some(UserStats {
            posts_generated: response.count,
            remaining: user
                .map(User::allowance)
                .unwrap_or(PostAllowance::Unknown),
        });
        self.history = response.posts;
        Ok(())
    }

    /// Delete a post. Returns whether the server confirmed the deletion.
    pub async fn delete_post(&mut self, client: &ApiClient, user: Option<&User>, id: &str) -> bool {
        let was_listed = self.history.iter().any(|p| p.id == id);

        match client.delete_post(id).await {
            Ok(response) if response.success => {
                tracing::info!(post_id = %id, "Deleted post");
                let _ = self.refresh_history(client, user).await;
                if was_listed {
                    self.generated_post = None;
                }
                true
            }
            Ok(_) => {
                tracing::warn!(post_id = %id, "Delete was not confirmed");
                false
            }
            Err(e) => {
                tracing::error!(post_id = %id, error = %e, "Failed to delete post");
                false
            }
        }
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magicpen_api::ApiConfig;
    use magicpen_session::SessionStore;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            prompt: format!("prompt {}", id),
            tone: "Founder".to_string(),
            content: format!("content {}", id),
            created_at: None,
        }
    }

    fn offline_client() -> ApiClient {
        ApiClient::new(
            ApiConfig::new("http://127.0.0.1:1/api"),
            SessionStore::detached(),
        )
    }

    #[test]
    fn test_defaults() {
        let composer = Composer::new();
        assert_eq!(composer.tone(), DEFAULT_TONE);
        assert!(composer.prompt().is_empty());
        assert!(composer.generated_post().is_none());
        assert!(!composer.is_busy());
    }

    #[test]
    fn test_visible_history() {
        let mut composer = Composer::new();
        composer.history = (1..=5).map(|i| post(&i.to_string())).collect();

        assert_eq!(composer.visible_history().len(), HISTORY_PREVIEW_LEN);

        composer.toggle_history();
        assert!(composer.shows_all_history());
        assert_eq!(composer.visible_history().len(), 5);

        composer.history.truncate(1);
        composer.toggle_history();
        assert_eq!(composer.visible_history().len(), 1);
    }

    #[test]
    fn test_load_from_history() {
        let mut composer = Composer::new();
        composer.load_from_history(&post("7"));

        assert_eq!(composer.prompt(), "prompt 7");
        assert_eq!(composer.tone(), "Founder");
        assert_eq!(composer.generated_post(), Some("content 7"));
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected_locally() {
        let mut composer = Composer::new();
        composer.set_prompt("   \n");

        let outcome = composer.generate(&offline_client(), None).await;
        assert_eq!(outcome, Submission::Rejected);
        assert_eq!(composer.error(), Some(EMPTY_PROMPT_MESSAGE));
        assert!(!composer.is_busy());
    }

    #[tokio::test]
    async fn test_busy_composer_refuses_submission() {
        let mut composer = Composer::new();
        composer.set_prompt("hello");
        composer.busy = true;

        let outcome = composer.generate(&offline_client(), None).await;
        assert_eq!(outcome, Submission::Rejected);
        assert!(composer.error().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_sets_error_and_clears_busy() {
        let mut composer = Composer::new();
        composer.set_prompt("hello");

        let outcome = composer.generate(&offline_client(), None).await;
        assert_eq!(outcome, Submission::Failed);
        assert!(composer.error().is_some());
        assert!(!composer.is_busy());
    }
}

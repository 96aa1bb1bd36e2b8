//! Answer sources for the responder.
//!
//! The responder does not know where answers come from. It hands the question
//! to an [`AnswerSource`], which may be a fixed table ([`StaticAnswers`]) or
//! any async closure ([`from_fn`]).

use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::time::Duration;

/// Answer text, or a description of why there is none.
pub type AnswerResult = std::result::Result<String, String>;

/// Boxed future for answer results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that can answer a question.
pub trait AnswerSource: Send + Sync + 'static {
    /// Produce the answer for `question`.
    fn answer(&self, question: &str) -> BoxFuture<'static, AnswerResult>;
}

/// Wrapper turning an async closure into an [`AnswerSource`].
pub struct FnSource<F, Fut>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AnswerResult> + Send + 'static,
{
    f: F,
    _phantom: PhantomData<fn() -> Fut>,
}

impl<F, Fut> AnswerSource for FnSource<F, Fut>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AnswerResult> + Send + 'static,
{
    fn answer(&self, question: &str) -> BoxFuture<'static, AnswerResult> {
        Box::pin((self.f)(question.to_string()))
    }
}

/// Build an [`AnswerSource`] from an async closure.
pub fn from_fn<F, Fut>(f: F) -> FnSource<F, Fut>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AnswerResult> + Send + 'static,
{
    FnSource {
        f,
        _phantom: PhantomData,
    }
}

/// Fixed question → answer table.
///
/// Unknown questions get the fallback if one is set, otherwise an error.
#[derive(Debug, Clone, Default)]
pub struct StaticAnswers {
    answers: HashMap<String, String>,
    fallback: Option<String>,
    delay: Duration,
}

impl StaticAnswers {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    pub fn with_answer(mut self, question: &str, answer: &str) -> Self {
        self.answers.insert(question.to_string(), answer.to_string());
        self
    }

    /// Answer for questions not in the table.
    pub fn fallback(mut self, answer: &str) -> Self {
        self.fallback = Some(answer.to_string());
        self
    }

    /// Wait this long before every answer.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn lookup(&self, question: &str) -> AnswerResult {
        self.answers
            .get(question)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| format!("no answer for {:?}", question))
    }
}

impl AnswerSource for StaticAnswers {
    fn answer(&self, question: &str) -> BoxFuture<'static, AnswerResult> {
        let result = self.lookup(question);
        let delay = self.delay;
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_lookup() {
        let source = StaticAnswers::new().with_answer("2+2?", "4");
        assert_eq!(source.answer("2+2?").await, Ok("4".to_string()));
        assert!(source.answer("3+3?").await.is_err());
    }

    #[tokio::test]
    async fn test_static_fallback() {
        let source = StaticAnswers::new().with_answer("a", "1").fallback("dunno");
        assert_eq!(source.answer("a").await, Ok("1".to_string()));
        assert_eq!(source.answer("b").await, Ok("dunno".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_static_delay() {
        let source = StaticAnswers::new().fallback("x").delay(Duration::from_secs(2));
        let start = tokio::time::Instant::now();
        source.answer("q").await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_from_fn() {
        let source = from_fn(|q: String| async move {
            if q.is_empty() {
                Err("empty".to_string())
            } else {
                Ok(q.to_uppercase())
            }
        });
        assert_eq!(source.answer("hi").await, Ok("HI".to_string()));
        assert_eq!(source.answer("").await, Err("empty".to_string()));
    }
}

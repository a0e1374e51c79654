use acadexa_intent::{IntentMatcher, ParseResult};
use tracing::Instrument;

use crate::envelope::{Reply, ResponseEnvelope};
use crate::error::DispatchError;
use crate::handler;
use crate::policy::Policy;
use crate::principal::{Principal, role_of};
use crate::scope;
use crate::store::RecordStore;

/// Runs text commands for a principal against a [`RecordStore`].
///
/// A dispatcher holds no per-command state. Each call walks the same
/// sequence and stops at the first step that produces an answer:
///
/// ```text
/// parse ─► unknown? ─► mutating? ─► policy ─► scope ─► handler ─► envelope
///            │            │           │         │
///            ▼            ▼           └────┬────┘
///        guidance     read-only            ▼
///        envelope     envelope      DispatchError
/// ```
pub struct Dispatcher<S> {
    store: S,
    matcher: &'static IntentMatcher,
}

impl<S> Dispatcher<S>
where
    S: RecordStore,
{
    /// A dispatcher using the built-in rule table.
    pub fn new(store: S) -> Self {
        Self::with_matcher(store, IntentMatcher::standard())
    }

    /// A dispatcher using a custom matcher.
    pub fn with_matcher(store: S, matcher: &'static IntentMatcher) -> Self {
        Self { store, matcher }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The matcher commands are parsed with.
    pub fn matcher(&self) -> &'static IntentMatcher {
        self.matcher
    }

    /// Parse `text`, check it against `principal`, and run it.
    ///
    /// Unmatched text, write commands and missing records all come back as
    /// `Ok` envelopes. Only authorization and profile-link failures, and
    /// failures of the store itself, are errors.
    pub async fn submit_command(
        &self,
        text: &str,
        principal: &Principal,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let parsed = self.matcher.parse(text);
        let span = tracing::debug_span!(
            "command",
            intent = %parsed.intent,
            role = %role_of(principal),
            principal = principal.id
        );
        self.dispatch(text, parsed, principal)
            .instrument(span)
            .await
    }

    async fn dispatch(
        &self,
        text: &str,
        parsed: ParseResult,
        principal: &Principal,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let intent = parsed.intent;

        if intent.is_unknown() {
            tracing::debug!("no rule matched");
            return Ok(ResponseEnvelope::new(text, parsed, Reply::unknown_command()));
        }

        if intent.is_mutating() {
            tracing::info!("write command rejected on read-only surface");
            return Ok(ResponseEnvelope::new(text, parsed, Reply::read_only()));
        }

        let access = Policy::access(intent, role_of(principal));
        let slots = scope::resolve(
            intent,
            access,
            principal,
            parsed.slots.clone(),
            &self.store,
        )
        .await?;

        let reply = handler::handle(intent, &slots, &self.store).await?;
        tracing::debug!(results_type = ?reply.results_type, "command handled");
        Ok(ResponseEnvelope::new(text, parsed, reply))
    }
}

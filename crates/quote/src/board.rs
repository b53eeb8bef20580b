use time::OffsetDateTime;
use validator::Validate;

use crate::{
    ConfirmationPolicy, Direction, HistoryEntry, NewQuote, PendingTransition, Quote, Rejection,
    Result, Stage, TransitionOutcome,
};

/// In-memory quote collection and its stage pipeline.
///
/// Quotes are kept newest first. At most one transition waits for
/// confirmation at a time; a new request replaces it.
#[derive(Clone, Debug, Default)]
pub struct QuoteBoard {
    quotes: Vec<Quote>,
    policy: ConfirmationPolicy,
    pending: Option<PendingTransition>,
}

impl QuoteBoard {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            ..Default::default()
        }
    }

    pub fn with_policy(mut self, policy: ConfirmationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn into_quotes(self) -> Vec<Quote> {
        self.quotes
    }

    pub fn get(&self, id: u64) -> Option<&Quote> {
        self.quotes.iter().find(|quote| quote.id == id)
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    pub fn count_in(&self, stage: Stage) -> usize {
        self.quotes.iter().filter(|quote| quote.stage == stage).count()
    }

    /// Always computed from the live collection.
    pub fn next_id(&self) -> u64 {
        self.quotes
            .iter()
            .map(|quote| quote.id)
            .max()
            .map_or(1, |id| id + 1)
    }

    pub fn create(&mut self, input: NewQuote) -> Result<&Quote> {
        input.validate()?;

        let quote = input.into_quote(self.next_id());
        tracing::info!(id = quote.id, code = %quote.code, client = %quote.client, "quote created");

        self.quotes.insert(0, quote);

        Ok(&self.quotes[0])
    }

    pub fn request_transition(&mut self, id: u64, direction: Direction) -> TransitionOutcome {
        let Some(quote) = self.get(id) else {
            tracing::debug!(id, "transition requested for unknown quote");
            return TransitionOutcome::Unchanged;
        };

        let from = quote.stage;
        let to = from.step(direction);

        if to == from {
            return TransitionOutcome::Unchanged;
        }

        if from.is_terminal() && direction == Direction::Retreat {
            tracing::warn!(id, "refusing to move a delivered quote back");
            return TransitionOutcome::Rejected(Rejection::AlreadyDelivered);
        }

        if self.policy.requires_confirmation(from, to) {
            let pending = PendingTransition { id, from, to };
            if let Some(previous) = self.pending.replace(pending) {
                tracing::debug!(id = previous.id, "pending transition replaced");
            }

            return TransitionOutcome::PendingConfirmation(pending);
        }

        self.commit(id, to)
    }

    /// Commits the pending transition if the quote has not moved since.
    pub fn confirm(&mut self) -> TransitionOutcome {
        let Some(pending) = self.pending.take() else {
            return TransitionOutcome::Unchanged;
        };

        let unchanged = self
            .get(pending.id)
            .is_some_and(|quote| quote.stage == pending.from);

        if !unchanged {
            tracing::warn!(id = pending.id, "dropping stale pending transition");
            return TransitionOutcome::Unchanged;
        }

        self.commit(pending.id, pending.to)
    }

    pub fn cancel(&mut self) -> Option<PendingTransition> {
        self.pending.take()
    }

    pub fn set_scheduled_delivery(&mut self, id: u64, when: Option<OffsetDateTime>) -> bool {
        let Some(quote) = self.get_mut(id) else {
            return false;
        };

        quote.scheduled_delivery = when;

        true
    }

    /// Duplicate names are ignored.
    pub fn attach_file(&mut self, id: u64, name: impl Into<String>) -> bool {
        let Some(quote) = self.get_mut(id) else {
            return false;
        };

        let name = name.into();
        if !quote.files.contains(&name) {
            quote.files.push(name);
        }

        true
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Quote> {
        self.quotes.iter_mut().find(|quote| quote.id == id)
    }

    fn commit(&mut self, id: u64, to: Stage) -> TransitionOutcome {
        let Some(quote) = self.get_mut(id) else {
            return TransitionOutcome::Unchanged;
        };

        quote.stage = to;
        quote
            .history
            .push(HistoryEntry::stage_changed(OffsetDateTime::now_utc(), to));

        tracing::info!(id, stage = %to, "quote stage changed");

        TransitionOutcome::Applied { id, stage: to }
    }
}

//! Identifier generation for new expense records.

use spendwise_domain::ExpenseId;
use uuid::Uuid;

/// Source of fresh expense identifiers.
///
/// Implementations must return a different id on every call within a session.
pub trait IdGenerator: Send {
    fn fresh_id(&mut self) -> ExpenseId;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn fresh_id(&mut self) -> ExpenseId {
        ExpenseId::random()
    }
}

/// Deterministic counter-backed identifiers, handy for scripted sessions.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(next: u128) -> Self {
        Self { next }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn fresh_id(&mut self) -> ExpenseId {
        let id = ExpenseId::new(Uuid::from_u128(self.next));
        self.next = self.next.wrapping_add(1);
        id
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn fresh_id(&mut self) -> ExpenseId {
        (**self).fresh_id()
    }
}

/// Draws ids until one is not already taken.
///
/// With a generator that honours the distinct-per-call contract, at most
/// `taken.len() + 1` draws are needed; a random id is the last resort.
pub fn unused_id<G, F>(ids: &mut G, taken_count: usize, is_taken: F) -> ExpenseId
where
    G: IdGenerator + ?Sized,
    F: Fn(ExpenseId) -> bool,
{
    for _ in 0..=taken_count {
        let candidate = ids.fresh_id();
        if !is_taken(candidate) {
            return candidate;
        }
    }
    loop {
        let candidate = ExpenseId::random();
        if !is_taken(candidate) {
            return candidate;
        }
    }
}

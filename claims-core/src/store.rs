use crate::claim::Claim;

/// Append-only, insertion-ordered collection of accepted claims. Owned by the
/// submission controller, which is its single writer; readers get a slice
/// view. No sorting, no deduplication, no removal.
#[derive(Debug, Default)]
pub struct ClaimStore {
    claims: Vec<Claim>,
}

impl ClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, claim: Claim) {
        self.claims.push(claim);
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

use crate::ranking::dimension::Dimension;
use crate::ranking::item::Item;
use crate::ranking::judgment::Judgment;
use crate::ranking::judgment::JudgmentId;
use crate::ranking::judgment::Retraction;
use crate::ranking::judgment::Stamp;
use crate::ranking::outcome::Outcome;
use crate::ranking::strength::Strength;

/// the judgment history seam. the engine writes through this trait and
/// rereads the stream on every inference call; implementations may park
/// the rows anywhere that can hand them back in creation order.
/// retracted rows must stay retrievable for audit and must never leak
/// into the live stream.
pub trait Journal {
    /// record a new judgment, assigning it an id and a stamp that
    /// strictly exceeds every stamp already issued
    fn append(
        &mut self,
        dimension: Dimension,
        item_a: Item,
        item_b: Item,
        outcome: Outcome,
        strength: Option<Strength>,
    ) -> Judgment;
    /// live judgments of one dimension, in stamp order
    fn stream(&self, dimension: Dimension) -> Vec<Judgment>;
    /// full history of one dimension, retracted rows included
    fn audit(&self, dimension: Dimension) -> Vec<Judgment>;
    fn get(&self, id: JudgmentId) -> Option<Judgment>;
    /// mark a judgment retracted; true if it was live
    fn retract(&mut self, id: JudgmentId, retraction: Retraction) -> bool;
    /// most recent live judgment of one dimension
    fn last(&self, dimension: Dimension) -> Option<Judgment>;
    /// live count for one dimension
    fn count(&self, dimension: Dimension) -> usize;
}

/// in-memory journal: a flat append-only vec plus one sequence counter
/// shared by ids and stamps
#[derive(Debug, Default)]
pub struct Ledger {
    rows: Vec<Judgment>,
    seq: u64,
}

impl Journal for Ledger {
    fn append(
        &mut self,
        dimension: Dimension,
        item_a: Item,
        item_b: Item,
        outcome: Outcome,
        strength: Option<Strength>,
    ) -> Judgment {
        self.seq += 1;
        let judgment = Judgment {
            id: JudgmentId(self.seq),
            dimension,
            item_a,
            item_b,
            outcome,
            strength,
            created_at: Stamp(self.seq),
            retracted: None,
        };
        self.rows.push(judgment);
        judgment
    }

    fn stream(&self, dimension: Dimension) -> Vec<Judgment> {
        self.rows
            .iter()
            .filter(|j| j.dimension == dimension && j.live())
            .copied()
            .collect()
    }

    fn audit(&self, dimension: Dimension) -> Vec<Judgment> {
        self.rows
            .iter()
            .filter(|j| j.dimension == dimension)
            .copied()
            .collect()
    }

    fn get(&self, id: JudgmentId) -> Option<Judgment> {
        self.rows.iter().find(|j| j.id == id).copied()
    }

    fn retract(&mut self, id: JudgmentId, retraction: Retraction) -> bool {
        match self.rows.iter_mut().find(|j| j.id == id) {
            Some(row) if row.live() => {
                row.retracted = Some(retraction);
                true
            }
            _ => false,
        }
    }

    fn last(&self, dimension: Dimension) -> Option<Judgment> {
        self.rows
            .iter()
            .rev()
            .find(|j| j.dimension == dimension && j.live())
            .copied()
    }

    fn count(&self, dimension: Dimension) -> usize {
        self.rows
            .iter()
            .filter(|j| j.dimension == dimension && j.live())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appended(ledger: &mut Ledger, a: u64, b: u64) -> Judgment {
        ledger.append(
            Dimension::Value,
            Item::from(a),
            Item::from(b),
            Outcome::AWins,
            None,
        )
    }

    #[test]
    fn stamps_strictly_increase() {
        let ref mut ledger = Ledger::default();
        let first = appended(ledger, 0, 1);
        let second = appended(ledger, 1, 2);
        let third = appended(ledger, 2, 0);
        assert!(first.created_at < second.created_at);
        assert!(second.created_at < third.created_at);
    }

    #[test]
    fn retraction_hides_but_keeps() {
        let ref mut ledger = Ledger::default();
        let judgment = appended(ledger, 0, 1);
        assert!(ledger.retract(judgment.id, Retraction::Undone));
        assert!(ledger.stream(Dimension::Value).is_empty());
        assert!(ledger.audit(Dimension::Value).len() == 1);
        assert!(ledger.get(judgment.id).is_some());
        assert!(!ledger.retract(judgment.id, Retraction::Undone));
    }

    #[test]
    fn dimensions_do_not_bleed() {
        let ref mut ledger = Ledger::default();
        appended(ledger, 0, 1);
        ledger.append(
            Dimension::Complexity,
            Item::from(0),
            Item::from(1),
            Outcome::BWins,
            None,
        );
        assert!(ledger.count(Dimension::Value) == 1);
        assert!(ledger.count(Dimension::Complexity) == 1);
        assert!(ledger.stream(Dimension::Value).len() == 1);
    }

    #[test]
    fn last_skips_retracted_rows() {
        let ref mut ledger = Ledger::default();
        let first = appended(ledger, 0, 1);
        let second = appended(ledger, 1, 2);
        ledger.retract(second.id, Retraction::Undone);
        assert!(ledger.last(Dimension::Value).map(|j| j.id) == Some(first.id));
    }
}

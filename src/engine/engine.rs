use super::journal::Journal;
use super::journal::Ledger;
use super::receipt::Receipt;
use super::scores::Posteriors;
use super::scores::Scores;
use crate::Confidence;
use crate::Deviation;
use crate::inference::closure::Knowledge;
use crate::inference::cycles::Cycles;
use crate::inference::cycles::Inconsistency;
use crate::inference::graph::Tournament;
use crate::inference::progress::Progress;
use crate::inference::replay::replay;
use crate::inference::selector;
use crate::inference::selector::Resolution;
use crate::inference::selector::Selection;
use crate::ranking::config::Config;
use crate::ranking::dimension::Dimension;
use crate::ranking::error::RankError;
use crate::ranking::item::Item;
use crate::ranking::judgment::Actor;
use crate::ranking::judgment::Judgment;
use crate::ranking::judgment::JudgmentId;
use crate::ranking::judgment::Retraction;
use crate::ranking::mode::Mode;
use crate::ranking::posterior::Posterior;
use crate::ranking::verdict::Verdict;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// one project's preference-inference engine. owns the item set, the
/// per-dimension tuning, and the journal and score seams; everything
/// it infers (graph, closure, cycles, selection, progress) is
/// recomputed from the journal on demand and held nowhere.
///
/// every mutating operation takes &mut self — that exclusive borrow is
/// the per-context lock, so readers always observe a consistent
/// snapshot, and separate projects are separate engines that
/// parallelize freely. operations validate before they write, so a
/// failed call leaves no partial state.
pub struct Engine<J = Ledger, S = Posteriors> {
    mode: Mode,
    items: BTreeSet<Item>,
    configs: BTreeMap<Dimension, Config>,
    journal: J,
    scores: S,
}

impl Engine {
    /// fresh engine with default tuning and in-memory stores
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            items: BTreeSet::new(),
            configs: Dimension::all()
                .iter()
                .map(|&dimension| (dimension, Config::default()))
                .collect(),
            journal: Ledger::default(),
            scores: Posteriors::default(),
        }
    }

    /// same tuning across both dimensions, validated up front
    pub fn with(mode: Mode, config: Config) -> Result<Self, RankError> {
        config.validate()?;
        let mut engine = Self::new(mode);
        engine.configs = Dimension::all()
            .iter()
            .map(|&dimension| (dimension, config.clone()))
            .collect();
        Ok(engine)
    }
}

impl<J: Journal, S: Scores> Engine<J, S> {
    /// admit an item; both dimensions start at the configured prior
    pub fn insert(&mut self, item: Item) {
        if self.items.insert(item) {
            for &dimension in Dimension::all() {
                let prior = self.config(dimension).prior();
                self.scores.set(item, dimension, prior);
            }
        }
    }

    /// drop an item and its posteriors. its judgments stay journaled
    /// for audit but no longer feed inference or replay
    pub fn remove(&mut self, item: Item) {
        if self.items.remove(&item) {
            self.scores.purge(item);
        }
    }

    pub fn items(&self) -> &BTreeSet<Item> {
        &self.items
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self, dimension: Dimension) -> &Config {
        self.configs
            .get(&dimension)
            .expect("every dimension is configured at construction")
    }

    pub fn posterior(&self, item: Item, dimension: Dimension) -> Option<Posterior> {
        self.scores.get(item, dimension)
    }

    /// arithmetic mean of σ across the item set; the prior spread when
    /// the set is empty
    pub fn avg_sigma(&self, dimension: Dimension) -> Deviation {
        if self.items.is_empty() {
            return self.config(dimension).prior().sigma;
        }
        let total = self
            .items
            .iter()
            .filter_map(|&item| self.scores.get(item, dimension))
            .map(|posterior| posterior.sigma)
            .sum::<Deviation>();
        total / self.items.len() as Deviation
    }

    /// items in the order the evidence supports, best first: never
    /// contradicting a proven ordering, refined by posterior mean
    /// where the judgments prove nothing
    pub fn ranking(&self, dimension: Dimension) -> Vec<(Item, Posterior)> {
        let stream = self.scoped(dimension);
        let tournament = stream.iter().collect::<Tournament>();
        let knowledge = Knowledge::new(&self.items, &tournament);
        let posteriors = self.scores.snapshot(dimension, &self.items);
        knowledge
            .order(&posteriors)
            .into_iter()
            .map(|item| (item, posteriors.get(&item).copied().unwrap_or_default()))
            .collect()
    }

    /// full audit history of one dimension, retracted rows included
    pub fn history(&self, dimension: Dimension) -> Vec<Judgment> {
        self.journal.audit(dimension)
    }

    /// record one judgment and fold it into both posteriors. the
    /// verdict must match the project mode; graded strengths scale the
    /// mean step, nothing else
    pub fn submit(
        &mut self,
        dimension: Dimension,
        item_a: Item,
        item_b: Item,
        verdict: Verdict,
    ) -> Result<Receipt, RankError> {
        if item_a == item_b {
            return Err(RankError::InvalidPair(item_a));
        }
        if !self.items.contains(&item_a) {
            return Err(RankError::UnknownItem(item_a));
        }
        if !self.items.contains(&item_b) {
            return Err(RankError::UnknownItem(item_b));
        }
        if verdict.mode() != self.mode {
            return Err(RankError::ModeMismatch(self.mode));
        }
        let config = self.config(dimension).clone();
        let judgment = self.journal.append(
            dimension,
            item_a,
            item_b,
            verdict.outcome(),
            verdict.strength(),
        );
        let a = self
            .scores
            .get(item_a, dimension)
            .unwrap_or_else(|| config.prior());
        let b = self
            .scores
            .get(item_b, dimension)
            .unwrap_or_else(|| config.prior());
        let (a, b) = Posterior::update(a, b, judgment.outcome, judgment.weight(), &config);
        self.scores.set(item_a, dimension, a);
        self.scores.set(item_b, dimension, b);
        log::debug!("{} recorded {}", judgment.id, judgment);
        Ok(Receipt {
            judgment,
            a,
            b,
            avg_sigma: self.avg_sigma(dimension),
            inconsistency: self.inconsistency(dimension),
        })
    }

    /// live judgments of one dimension whose items are both still in
    /// scope. judgments orphaned by item removal stay journaled but
    /// feed neither the graph nor the statistics, matching what replay
    /// does to the posteriors
    fn scoped(&self, dimension: Dimension) -> Vec<Judgment> {
        self.journal
            .stream(dimension)
            .into_iter()
            .filter(|j| self.items.contains(&j.item_a) && self.items.contains(&j.item_b))
            .collect()
    }

    /// next pair worth judging, or completion once the target coverage
    /// is met on a consistent graph
    pub fn next(&self, dimension: Dimension, target: Confidence) -> Result<Selection, RankError> {
        let stream = self.scoped(dimension);
        let tournament = stream.iter().collect::<Tournament>();
        let knowledge = Knowledge::new(&self.items, &tournament);
        let cycles = Cycles::from(&tournament);
        let posteriors = self.scores.snapshot(dimension, &self.items);
        selector::select(
            &posteriors,
            &stream,
            &knowledge,
            &cycles,
            target,
            self.config(dimension),
        )
    }

    /// retract the most recent judgment and rebuild from what survives
    pub fn undo(&mut self, dimension: Dimension) -> Result<JudgmentId, RankError> {
        let last = self.journal.last(dimension).ok_or(RankError::EmptyHistory)?;
        self.journal.retract(last.id, Retraction::Undone);
        self.replay(dimension);
        Ok(last.id)
    }

    /// soft-delete by id and rebuild the affected dimension. deleting
    /// an already-retracted judgment acknowledges without touching
    /// anything; an unknown id is the caller's error
    pub fn delete(&mut self, id: JudgmentId, actor: Actor) -> Result<(), RankError> {
        let judgment = self.journal.get(id).ok_or(RankError::UnknownJudgment(id))?;
        if self.journal.retract(id, Retraction::Deleted(actor)) {
            self.replay(judgment.dimension);
        }
        Ok(())
    }

    /// retract every live judgment of a dimension and return all
    /// posteriors to the prior. the audit trail survives
    pub fn reset(&mut self, dimension: Dimension) -> usize {
        let live = self.journal.stream(dimension);
        for judgment in &live {
            self.journal.retract(judgment.id, Retraction::Reset);
        }
        let prior = self.config(dimension).prior();
        for &item in &self.items {
            self.scores.set(item, dimension, prior);
        }
        log::info!("reset {} judgments on {}", live.len(), dimension);
        live.len()
    }

    /// composite confidence snapshot for one dimension
    pub fn progress(&self, dimension: Dimension, target: Confidence) -> Progress {
        let stream = self.scoped(dimension);
        let tournament = stream.iter().collect::<Tournament>();
        let knowledge = Knowledge::new(&self.items, &tournament);
        let cycles = Cycles::from(&tournament);
        Progress::measure(
            dimension,
            target,
            &knowledge,
            &cycles,
            &stream,
            self.avg_sigma(dimension),
        )
    }

    /// enumerated judgment cycles, item ids in order
    pub fn inconsistencies(&self, dimension: Dimension) -> Cycles {
        let stream = self.scoped(dimension);
        Cycles::from(&stream.iter().collect::<Tournament>())
    }

    /// numeric inconsistency summary
    pub fn inconsistency(&self, dimension: Dimension) -> Inconsistency {
        let stream = self.scoped(dimension);
        let cycles = Cycles::from(&stream.iter().collect::<Tournament>());
        Inconsistency::measure(&cycles, stream.iter())
    }

    /// weakest link across detected cycles, if any need breaking
    pub fn resolve(&self, dimension: Dimension) -> Option<Resolution> {
        let stream = self.scoped(dimension);
        let cycles = Cycles::from(&stream.iter().collect::<Tournament>());
        selector::weakest_link(&cycles, &self.scores.snapshot(dimension, &self.items))
    }

    /// rebuild a dimension's posteriors from the surviving stream and
    /// commit them to the score store
    fn replay(&mut self, dimension: Dimension) {
        let stream = self.journal.stream(dimension);
        log::debug!("replaying {} judgments on {}", stream.len(), dimension);
        let rebuilt = replay(&self.items, stream.iter(), self.config(dimension));
        for (item, posterior) in rebuilt {
            self.scores.set(item, dimension, posterior);
        }
    }
}

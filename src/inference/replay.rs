use crate::ranking::config::Config;
use crate::ranking::item::Item;
use crate::ranking::judgment::Judgment;
use crate::ranking::posterior::Posterior;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// rebuild one dimension's posteriors from its surviving judgment
/// stream: every item back to the prior, then each live judgment
/// re-applied in stamp order with its strength weight. deterministic
/// and idempotent, and the journal itself is never touched — replaying
/// is indistinguishable from the retracted judgments never existing.
/// judgments naming items that have left the set are skipped.
pub fn replay<'a, I>(
    items: &BTreeSet<Item>,
    history: I,
    config: &Config,
) -> BTreeMap<Item, Posterior>
where
    I: IntoIterator<Item = &'a Judgment>,
{
    let mut posteriors = items
        .iter()
        .map(|&item| (item, config.prior()))
        .collect::<BTreeMap<_, _>>();
    let mut stream = history
        .into_iter()
        .filter(|j| j.live())
        .collect::<Vec<_>>();
    stream.sort_by_key(|j| j.created_at);
    for judgment in stream {
        let (Some(&a), Some(&b)) = (
            posteriors.get(&judgment.item_a),
            posteriors.get(&judgment.item_b),
        ) else {
            continue;
        };
        let (a, b) = Posterior::update(a, b, judgment.outcome, judgment.weight(), config);
        posteriors.insert(judgment.item_a, a);
        posteriors.insert(judgment.item_b, b);
    }
    posteriors
}

use crate::Confidence;
use crate::engine::engine::Engine;
use crate::engine::receipt::Receipt;
use crate::inference::progress::Progress;
use crate::inference::selector::Reason;
use crate::inference::selector::Selection;
use crate::ranking::config::Config;
use crate::ranking::dimension::Dimension;
use crate::ranking::error::RankError;
use crate::ranking::item::Item;
use crate::ranking::mode::Mode;
use crate::ranking::outcome::Outcome;
use crate::ranking::posterior::Posterior;
use crate::ranking::strength::Strength;
use crate::ranking::verdict::Verdict;
use colored::Colorize;
use std::collections::BTreeMap;

/// interactive judgment session: walks the same item set through both
/// dimensions in turn — complexity first, value second — against one
/// shared engine, then prints a single combined report. quitting a
/// phase skips the rest and goes straight to the report.
pub struct Session {
    engine: Engine,
    names: BTreeMap<Item, String>,
    target: Confidence,
}

impl Session {
    pub fn new(
        names: Vec<String>,
        mode: Mode,
        target: Confidence,
        config: Config,
    ) -> Result<Self, RankError> {
        let mut engine = Engine::with(mode, config)?;
        let names = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let item = Item::from(i as u64);
                engine.insert(item);
                (item, name)
            })
            .collect();
        Ok(Self {
            engine,
            names,
            target,
        })
    }

    pub fn run(&mut self) -> Result<(), anyhow::Error> {
        for (phase, &dimension) in Dimension::all().iter().enumerate() {
            println!(
                "\n{}",
                format!("phase {}: {} comparisons", phase + 1, dimension).bold()
            );
            if !self.judge(dimension)? {
                break;
            }
        }
        self.report();
        Ok(())
    }

    /// one dimension's question loop; false when the user bows out
    fn judge(&mut self, dimension: Dimension) -> Result<bool, anyhow::Error> {
        loop {
            match self.engine.next(dimension, self.target)? {
                Selection::Complete => {
                    println!("{}", format!("{} comparisons complete", dimension).green());
                    return Ok(true);
                }
                Selection::Pair { a, b, reason } => {
                    if reason == Reason::Cycle {
                        println!(
                            "{}",
                            "this pair sits on a contradictory cycle; re-judging it may break the knot"
                                .yellow()
                        );
                    }
                    match self.ask(dimension, a, b)? {
                        Some(verdict) => {
                            let receipt = self.engine.submit(dimension, a, b, verdict)?;
                            self.warn(&receipt);
                        }
                        None => return Ok(false),
                    }
                }
            }
        }
    }

    fn name(&self, item: Item) -> &str {
        self.names
            .get(&item)
            .map(|name| name.as_str())
            .unwrap_or("?")
    }

    /// one question. None means the user quit
    fn ask(&self, dimension: Dimension, a: Item, b: Item) -> Result<Option<Verdict>, anyhow::Error> {
        let prompt = match dimension {
            Dimension::Complexity => "which is more complex to build?",
            Dimension::Value => "which delivers more value?",
        };
        match self.engine.mode() {
            Mode::Binary => {
                let options = [
                    self.name(a).to_string(),
                    self.name(b).to_string(),
                    "they are equal".to_string(),
                    "quit and show results".to_string(),
                ];
                let pick = dialoguer::Select::new()
                    .with_prompt(prompt)
                    .items(&options)
                    .default(0)
                    .interact()?;
                Ok(match pick {
                    0 => Some(Verdict::Binary(Outcome::AWins)),
                    1 => Some(Verdict::Binary(Outcome::BWins)),
                    2 => Some(Verdict::Binary(Outcome::Tie)),
                    _ => None,
                })
            }
            Mode::Graded => {
                let options = [
                    format!("{} is much better", self.name(a)),
                    format!("{} is better", self.name(a)),
                    "they are equal".to_string(),
                    format!("{} is better", self.name(b)),
                    format!("{} is much better", self.name(b)),
                    "quit and show results".to_string(),
                ];
                let pick = dialoguer::Select::new()
                    .with_prompt(prompt)
                    .items(&options)
                    .default(2)
                    .interact()?;
                Ok(Strength::all()
                    .get(pick)
                    .map(|&strength| Verdict::Graded(strength)))
            }
        }
    }

    fn warn(&self, receipt: &Receipt) {
        if receipt.inconsistency.cycle_count > 0 {
            println!(
                "{}",
                format!("inconsistent judgments: {}", receipt.inconsistency).red()
            );
        }
    }

    /// combined report over both dimensions: confidence per dimension,
    /// then the item table ordered by value-over-complexity priority
    fn report(&self) {
        println!("\n{}", "final results".bold());
        for &dimension in Dimension::all() {
            let progress = self.engine.progress(dimension, self.target);
            let line = format!(
                "{:<12} {:>4.0}% confident, {} judgments",
                dimension.to_string(),
                progress.effective_confidence * 100.,
                progress.judgments_done,
            );
            match progress.cycle_count {
                0 => println!("{}", line.green()),
                cycles => println!("{}", format!("{line}, {cycles} unresolved cycles").yellow()),
            }
        }
        println!(
            "\n{:>3}  {:<24} {:<22} {:<22} {}",
            "#", "item", "value", "complexity", "priority"
        );
        for (place, (item, value, complexity, priority)) in self.prioritized().into_iter().enumerate()
        {
            println!(
                "{:>3}. {:<24} {:<22} {:<22} {:+.2}",
                place + 1,
                self.name(item),
                value.to_string(),
                complexity.to_string(),
                priority,
            );
        }
    }

    /// value posterior over complexity posterior, best bargains first;
    /// the denominator floor keeps easy low-complexity items from
    /// blowing up the ratio
    fn prioritized(&self) -> Vec<(Item, Posterior, Posterior, f64)> {
        let mut rows = self
            .engine
            .items()
            .iter()
            .map(|&item| {
                let value = self
                    .engine
                    .posterior(item, Dimension::Value)
                    .unwrap_or_default();
                let complexity = self
                    .engine
                    .posterior(item, Dimension::Complexity)
                    .unwrap_or_default();
                let priority = value.mu / complexity.mu.max(0.1);
                (item, value, complexity, priority)
            })
            .collect::<Vec<_>>();
        rows.sort_by(|(i1, _, _, p1), (i2, _, _, p2)| {
            p2.partial_cmp(p1)
                .expect("priorities are finite")
                .then(i1.cmp(i2))
        });
        rows
    }

    /// both dimensions' progress snapshots, keyed by dimension
    pub fn progress_json(&self) -> String {
        let snapshot = Dimension::all()
            .iter()
            .map(|&dimension| {
                (
                    dimension.to_string(),
                    self.engine.progress(dimension, self.target),
                )
            })
            .collect::<BTreeMap<String, Progress>>();
        serde_json::to_string_pretty(&snapshot).expect("progress serializes")
    }
}

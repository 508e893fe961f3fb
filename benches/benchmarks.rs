criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        computing_transitive_closure,
        enumerating_cycles,
        selecting_next_pair,
        replaying_full_history,
}

use pairwise::engine::engine::Engine;
use pairwise::inference::closure::Knowledge;
use pairwise::inference::cycles::Cycles;
use pairwise::inference::graph::Tournament;
use pairwise::inference::selector::Selection;
use pairwise::ranking::dimension::Dimension;
use pairwise::ranking::item::Item;
use pairwise::ranking::judgment::Actor;
use pairwise::ranking::mode::Mode;
use pairwise::ranking::outcome::Outcome;
use pairwise::ranking::verdict::Verdict;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const N: u64 = 200;
const DIM: Dimension = Dimension::Value;

/// engine seeded with ~2·n·log₂n truthful judgments over random pairs
fn seeded() -> Engine {
    let ref mut rng = SmallRng::seed_from_u64(0xD1CE);
    let mut engine = Engine::new(Mode::Binary);
    for item in (0..N).map(Item::from) {
        engine.insert(item);
    }
    let budget = 2 * (N as f64 * (N as f64).log2()) as usize;
    for _ in 0..budget {
        let a = rng.random_range(0..N);
        let b = rng.random_range(0..N);
        if a == b {
            continue;
        }
        let verdict = match a < b {
            true => Verdict::Binary(Outcome::AWins),
            false => Verdict::Binary(Outcome::BWins),
        };
        engine
            .submit(DIM, Item::from(a), Item::from(b), verdict)
            .expect("valid judgment");
    }
    engine
}

fn computing_transitive_closure(c: &mut criterion::Criterion) {
    let engine = seeded();
    let items = engine.items().clone();
    let stream = engine.history(DIM);
    c.bench_function("compute transitive closure over 200 items", |b| {
        b.iter(|| {
            let tournament = stream.iter().collect::<Tournament>();
            Knowledge::new(&items, &tournament)
        })
    });
}

fn enumerating_cycles(c: &mut criterion::Criterion) {
    let engine = seeded();
    let stream = engine.history(DIM);
    c.bench_function("enumerate judgment cycles", |b| {
        b.iter(|| {
            let tournament = stream.iter().collect::<Tournament>();
            Cycles::from(&tournament)
        })
    });
}

fn selecting_next_pair(c: &mut criterion::Criterion) {
    let engine = seeded();
    c.bench_function("select next pair", |b| {
        b.iter(|| match engine.next(DIM, 1.0) {
            Ok(Selection::Pair { a, b, .. }) => {
                let _ = (a, b);
            }
            Ok(Selection::Complete) => (),
            Err(_) => unreachable!("two hundred items"),
        })
    });
}

fn replaying_full_history(c: &mut criterion::Criterion) {
    c.bench_function("replay after delete", |b| {
        b.iter_batched(
            seeded,
            |mut engine| {
                let id = engine
                    .history(DIM)
                    .first()
                    .map(|j| j.id)
                    .expect("history is seeded");
                engine.delete(id, Actor(0)).expect("judgment exists");
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

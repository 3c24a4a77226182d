use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use falsefriends::config::OrthographicConfig;
use falsefriends::similarity::orthographic::{
    OrthographicSimilarity, SubstitutionCosts, weighted_edit_distance,
};

const PAIRS: [(&str, &str); 6] = [
    ("афектирахме", "аффектировались"),
    ("бира", "пиво"),
    ("вода", "вода"),
    ("неделя", "неделя"),
    ("стол", "стол"),
    ("благодаря", "благодарить"),
];

fn bench_edit_distance(c: &mut Criterion) {
    let costs = SubstitutionCosts::cyrillic();
    let pairs: Vec<(Vec<char>, Vec<char>)> = PAIRS
        .iter()
        .map(|(a, b)| (a.chars().collect(), b.chars().collect()))
        .collect();

    c.bench_function("weighted_edit_distance", |b| {
        b.iter(|| {
            for (bg, ru) in &pairs {
                let _ = black_box(weighted_edit_distance(black_box(bg), black_box(ru), &costs));
            }
        })
    });
}

fn bench_mmedr(c: &mut Criterion) {
    let mmedr = OrthographicSimilarity::new(OrthographicConfig::default());

    c.bench_function("mmedr", |b| {
        b.iter(|| {
            for (bg, ru) in PAIRS {
                let _ = black_box(mmedr.similarity(black_box(bg), black_box(ru)).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_edit_distance, bench_mmedr);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand::rngs::StdRng;

use text_adventure::adventure::{combat, generate, AdventureRules, Monster, Player, Relentless};

fn giant_fight(rules: &AdventureRules) {
    // a long fight: the giant has far more health than the player can chip away
    let mut player = Player { attack_power: 20, ..Player::new_with_rules(rules) };
    let mut monster = Monster {
        name: "George the Giant".into(),
        description: String::new(),
        health: 1400,
        power: 1,
        bounty: 7,
    };
    black_box(combat::resolve(&mut player, &mut monster, false, &mut Relentless));
}

fn criterion_benchmark(c: &mut Criterion) {
    let rules = AdventureRules::default();
    c.bench_function("resolve giant fight", |b| b.iter(|| giant_fight(black_box(&rules))));

    let mut rng = StdRng::seed_from_u64(7);
    c.bench_function("generate monster", |b| b.iter(|| black_box(generate(&rules, &mut rng))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

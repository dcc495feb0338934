use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng as _, SeedableRng as _};
use std::hint::black_box;
use unicool::Polynomial;

fn random_poly(rng: &mut rand::rngs::SmallRng, max_exp: u32, num_terms: usize) -> Polynomial {
    Polynomial::from_terms(
        (0..num_terms).map(|_| (rng.random_range(0..=max_exp), rng.random_range(-10.0..10.0))),
    )
}

fn parse_canonical(c: &mut Criterion) {
    let text = "9*x^6-x^3+7*x^2+x-2.5e-3";
    c.bench_function("parse_canonical", |b| {
        b.iter(|| Polynomial::parse(black_box(text)).unwrap())
    });
}

fn render_round_trip(c: &mut Criterion) {
    let mut rng = rand::rngs::SmallRng::from_seed([7u8; 32]);
    let poly = random_poly(&mut rng, 30, 20);
    c.bench_function("render_round_trip", |b| {
        b.iter(|| {
            let text = black_box(&poly).to_string();
            black_box(Polynomial::parse(&text).unwrap())
        })
    });
}

fn mul_sparse(c: &mut Criterion) {
    let mut rng = rand::rngs::SmallRng::from_seed([1u8; 32]);
    let p = random_poly(&mut rng, 40, 16);
    let q = random_poly(&mut rng, 40, 16);
    c.bench_function("mul_sparse", |b| b.iter(|| black_box(&p) * black_box(&q)));
}

fn div_rem_dense(c: &mut Criterion) {
    // (x - 1)^12 divided by x^3 - 2x + 5
    let mut p = Polynomial::from_term(0, 1.0);
    let factor = Polynomial::parse("x - 1").unwrap();
    for _ in 0..12 {
        p = &p * &factor;
    }
    let divisor = Polynomial::parse("x^3 - 2x + 5").unwrap();
    c.bench_function("div_rem_dense", |b| {
        b.iter(|| black_box(&p).div_rem(black_box(&divisor)).unwrap())
    });
}

fn eval_and_derive(c: &mut Criterion) {
    let poly = Polynomial::parse("0.25x^8 - 3x^5 + x^2 - 7").unwrap();
    c.bench_function("eval_and_derive", |b| {
        let mut rng = rand::rng();
        let samples: Vec<f64> = (0..1000).map(|_| rng.random_range(-2.0..2.0)).collect();

        b.iter(|| {
            let slope = black_box(&poly).derive();
            for &x in &samples {
                black_box(slope.get_y(x));
            }
        })
    });
}

criterion_group!(
    benches,
    parse_canonical,
    render_round_trip,
    mul_sparse,
    div_rem_dense,
    eval_and_derive
);
criterion_main!(benches);

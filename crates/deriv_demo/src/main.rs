use anyhow::{Context, Result};
use deriv_core::{
    bisection_root, newton_root, taylor_polynomial, BisectionSettings, NewtonSettings, Node,
};
use env_logger::Env;
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEED: u64 = 42;
const SAMPLE_COUNT: usize = 10;

/// Sample points: 0, 1, -1, then random values in [-3000, 3000] rounded to three places.
fn sample_points(rng: &mut impl Rng, count: usize) -> Vec<f64> {
    let mut xs = vec![0.0, 1.0, -1.0];
    xs.truncate(count);
    while xs.len() < count {
        let x: f64 = rng.gen_range(-3000.0..3000.0);
        xs.push((x * 1000.0).round() / 1000.0);
    }
    xs
}

fn report(rng: &mut impl Rng, function: &Node, name: &str, taylor_max_order: usize) {
    println!("{name}: {function}");
    for x in sample_points(rng, SAMPLE_COUNT) {
        println!("{name} value at {x}: {}", function.value_at(x));
    }
    println!("{name} derivative: {}", function.derivative());
    for n in 0..=taylor_max_order {
        println!(
            "{name} Taylor polynomial of order {n}: {}",
            taylor_polynomial(function, n)
        );
    }
    println!();
}

fn report_roots(function: &Node, name: &str, a: f64, b: f64, tolerance: Option<f64>) {
    let (bisection, newton, label) = match tolerance {
        Some(eps) => (
            BisectionSettings::with_tolerance(eps),
            NewtonSettings::with_tolerance(eps),
            format!("epsilon={eps}"),
        ),
        None => (
            BisectionSettings::default(),
            NewtonSettings::default(),
            "default epsilon".to_string(),
        ),
    };

    match bisection_root(function, a, b, bisection) {
        Ok(result) => println!("{name} root in [{a}, {b}] and {label}: {}", result.root),
        Err(err) => warn!("{name} bisection on [{a}, {b}] failed: {err:#}"),
    }

    let mid = (a + b) / 2.0;
    match newton_root(function, mid, newton) {
        Ok(result) => println!("{name} root near {mid} and {label}: {}", result.root),
        Err(err) => warn!("{name} Newton-Raphson from {mid} failed: {err:#}"),
    }
}

fn run(rng: &mut impl Rng) -> Result<()> {
    let const1 = Node::constant(12345.0);
    let const2 = Node::constant(12.391709);
    let const3 = Node::constant(-1709.0);
    report(rng, &const1, "const1", 10);
    report(rng, &const2, "const2", 10);

    let prod1 = Node::product(Node::sum(const1.clone(), const2.clone()), const3.clone());
    report(rng, &prod1, "prod1", 10);

    let prod2 = Node::product(
        Node::sum(const1.clone(), const2.clone()),
        Node::negation(Node::negation(const3.clone())),
    );
    report(rng, &prod2, "prod2", 10);

    let diff1 = Node::difference(const1.clone(), const3.clone());
    report(rng, &diff1, "diff1", 10);

    let quotient1 = Node::quotient(
        Node::sum(
            Node::difference(Node::product(const1.clone(), const3.clone()), const2.clone()),
            Node::polynomial(vec![1.0, 0.0, 1.0]),
        ),
        prod1.clone(),
    );
    report(rng, &quotient1, "quotient1", 4);

    let multi_sum1 = Node::multi_sum(vec![Node::constant(21.03), Node::constant(3.0)])?;
    report(rng, &multi_sum1, "multiSum1", 10);

    let poly1 = Node::polynomial(vec![0.0, 0.0, 1.0, 1.5, 2.0, 3.1415]);
    report(rng, &poly1, "poly1", 10);

    let mut poly2_coefficients = vec![1.0, 0.0, 2.0, 1.5, 5.0, 2.17];
    poly2_coefficients.extend(std::iter::repeat(0.0).take(12));
    poly2_coefficients.push(3.0);
    let poly2 = Node::polynomial(poly2_coefficients);
    report(rng, &poly2, "poly2", 20);

    let multi_sum2 = Node::multi_sum(vec![
        Node::constant(21.03),
        poly1.clone(),
        Node::constant(5.0),
        Node::polynomial(vec![3.1415]),
    ])?;
    report(rng, &multi_sum2, "multiSum2", 10);

    let multi_prod1 = Node::multi_product(vec![
        Node::constant(10.0),
        Node::polynomial(vec![7.0, 3.5, 2.0, 1.0]),
    ])?;
    report(rng, &multi_prod1, "multiProd1", 10);

    let multi_prod2 = Node::multi_product(vec![
        Node::constant(3.0),
        poly2.clone(),
        Node::negation(Node::sum(Node::constant(21.0), poly2.clone())),
    ])?;
    report(rng, &multi_prod2, "multiProd2", 10);

    let pow1 = Node::power(poly1.clone(), 3);
    report(rng, &pow1, "pow1", 5);
    let pow2 = Node::power(pow1.clone(), 3);
    report(rng, &pow2, "pow2", 4);
    let pow3 = Node::power(Node::negation(poly1.clone()), 2);
    report(rng, &pow3, "pow3", 4);

    let quotient2 = Node::quotient(
        Node::polynomial(vec![1.0, 0.0, 2.5, 3.0]),
        Node::polynomial(vec![1.0, 2.0, 3.0, 4.0]),
    );
    report(rng, &quotient2, "quotient2", 8);

    let massive = Node::sum(
        Node::multi_sum(vec![quotient1.clone(), poly1.clone(), poly2.clone()])?,
        Node::negation(Node::sum(
            quotient1.clone(),
            Node::quotient(
                Node::sum(Node::difference(pow1, const3), const2),
                Node::negation(Node::quotient(
                    Node::constant(2.17),
                    Node::difference(quotient1, Node::negation(poly2)),
                )),
            ),
        )),
    );
    info!(
        "massiveFunc has {} nodes; its derivative has {}",
        massive.node_count(),
        massive.derivative().node_count()
    );
    report(rng, &massive, "massiveFunc", 5);

    run_root_finding();
    Ok(())
}

fn run_root_finding() {
    let poly3 = Node::polynomial(vec![-4.0, 0.0, 1.0]);
    println!("poly3: {poly3}");
    report_roots(&poly3, "poly3", 0.0, 5.0, Some(1e-5));
    report_roots(&poly3, "poly3", 0.0, 5.0, None);
    report_roots(&poly3, "poly3", 1.0, 9.5, Some(1e-10));
    report_roots(&poly3, "poly3", 1.0, 900000.235, Some(1e-10));
    report_roots(&poly3, "poly3", -10.0, 0.0, Some(1e-6));
    println!();

    let poly4 = Node::polynomial(vec![4.0, 0.0, -1.0]);
    println!("poly4: {poly4}");
    report_roots(&poly4, "poly4", 0.0, 5.0, Some(1e-5));
    report_roots(&poly4, "poly4", 0.0, 5.0, None);
    report_roots(&poly4, "poly4", 1.0, 9.0, Some(1e-10));
    report_roots(&poly4, "poly4", -10.0, 0.0, Some(1e-6));
    println!();

    let quotient3 = Node::quotient(poly3, Node::polynomial(vec![0.0, 0.0, 1.0, 0.0, 1.0]));
    println!("quotient3: {quotient3}");
    report_roots(&quotient3, "quotient3", 1.0, 4.0, Some(1e-5));
    report_roots(&quotient3, "quotient3", 1.0, 4.0, None);
    report_roots(&quotient3, "quotient3", 1.0, 3.0, Some(1e-10));
    report_roots(&quotient3, "quotient3", -3.0, -1.0, Some(1e-10));
    report_roots(&quotient3, "quotient3", -4.0, -1.0, Some(1e-6));
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    info!("deriv demo v{} (seed {SEED})", env!("CARGO_PKG_VERSION"));
    run(&mut rng).context("Failed to build demo expressions.")
}

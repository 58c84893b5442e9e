//! Riemann zeta function for real arguments greater than one.
//!
//! Evaluated with Euler–Maclaurin summation: an explicit partial sum of the
//! first `HEAD - 1` terms, the integral of the tail, and a Bernoulli
//! correction series. Twelve head terms and six corrections give close to
//! full `f64` precision over the whole `s > 1` range the sampler accepts.

const HEAD: u32 = 12;

/// `B_2j / (2j)!` for j = 1..=6.
const CORRECTIONS: [f64; 6] = [
    1.0 / 12.0,
    -1.0 / 720.0,
    1.0 / 30_240.0,
    -1.0 / 1_209_600.0,
    1.0 / 47_900_160.0,
    -691.0 / 1_307_674_368_000.0,
];

/// ζ(s) = Σ k^-s. Caller guarantees `s > 1`.
pub fn riemann_zeta(s: f64) -> f64 {
    debug_assert!(s > 1.0, "zeta diverges for s <= 1 (got {s})");

    let n = f64::from(HEAD);
    let mut sum: f64 = (1..HEAD).map(|k| f64::from(k).powf(-s)).sum();
    sum += n.powf(1.0 - s) / (s - 1.0);
    sum += 0.5 * n.powf(-s);

    // Rising factorial s(s+1)...(s+2j-2) and N^(-s-2j+1), advanced two steps per term.
    let mut rising = s;
    let mut power = n.powf(-s - 1.0);
    for (j, coeff) in CORRECTIONS.iter().enumerate() {
        sum += coeff * rising * power;
        let k = 2.0 * j as f64;
        rising *= (s + k + 1.0) * (s + k + 2.0);
        power /= n * n;
    }
    sum
}

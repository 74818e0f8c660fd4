use baghchal::Qubo;
use rand::rngs::StdRng;
use rand::Rng;

/// Knobs for [`anneal()`].
#[derive(Clone, Copy, Debug)]
pub struct Schedule {
    /// Independent annealing runs; the best result wins.
    pub num_reads: usize,
    /// Passes over all variables per run.
    pub sweeps: usize,
    /// Inverse temperatures at the start and the end of each run, relative
    /// to the largest coefficient of the problem.
    pub beta_start: f64,
    pub beta_end: f64,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            num_reads: 100,
            sweeps: 200,
            beta_start: 0.1,
            beta_end: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub bits: Vec<bool>,
    pub energy: f64,
}

/// Classical simulated annealing with single bit flips and a geometric
/// temperature schedule. Each run ends with a greedy descent, so the result
/// is always a local minimum.
///
/// Returns `None` for a problem without variables.
pub fn anneal(qubo: &Qubo, schedule: &Schedule, rng: &mut StdRng) -> Option<Sample> {
    let num_variables = qubo.num_variables();
    if num_variables == 0 {
        return None;
    }
    let scale = coefficient_scale(qubo);
    let beta_start = schedule.beta_start / scale;
    let beta_end = schedule.beta_end / scale;
    let last_sweep = schedule.sweeps.saturating_sub(1).max(1) as f64;

    let mut best: Option<Sample> = None;
    for _ in 0..schedule.num_reads.max(1) {
        let mut bits: Vec<bool> = (0..num_variables).map(|_| rng.gen()).collect();
        let mut energy = qubo.energy(&bits);

        for sweep in 0..schedule.sweeps {
            let beta = beta_start * (beta_end / beta_start).powf(sweep as f64 / last_sweep);
            for idx in 0..num_variables {
                let delta = qubo.flip_delta(&bits, idx);
                if delta <= 0.0 || rng.gen::<f64>() < (-beta * delta).exp() {
                    bits[idx] = !bits[idx];
                    energy += delta;
                }
            }
        }
        energy += descend(qubo, &mut bits);

        if best.as_ref().map_or(true, |b| energy < b.energy) {
            best = Some(Sample { bits, energy });
        }
    }
    best
}

// Flips bits as long as that lowers the energy, returns the total change.
fn descend(qubo: &Qubo, bits: &mut [bool]) -> f64 {
    let mut total = 0.0;
    loop {
        let improvement = (0..bits.len())
            .map(|idx| (idx, qubo.flip_delta(bits, idx)))
            .filter(|&(_, delta)| delta < 0.0)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        match improvement {
            Some((idx, delta)) => {
                bits[idx] = !bits[idx];
                total += delta;
            }
            None => break total,
        }
    }
}

fn coefficient_scale(qubo: &Qubo) -> f64 {
    qubo.linear()
        .iter()
        .chain(qubo.quadratic().values())
        .map(|coeff| coeff.abs())
        .fold(1.0, f64::max)
}

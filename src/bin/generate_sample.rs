use anyhow::{Context, Result};
use serde::Serialize;

/// One row of the bundled salaries dataset.
#[derive(Debug, Serialize)]
struct SalaryRecord {
    work_year: i64,
    experience_level: &'static str,
    employment_type: &'static str,
    job_title: &'static str,
    salary: i64,
    salary_currency: &'static str,
    salary_in_usd: i64,
    employee_residence: &'static str,
    remote_ratio: i64,
    company_location: &'static str,
    company_size: &'static str,
}

/// (level, salary multiplier)
const EXPERIENCE: [(&str, f64); 4] = [("EN", 0.6), ("MI", 0.85), ("SE", 1.15), ("EX", 1.6)];
const EMPLOYMENT: [&str; 4] = ["FT", "PT", "CT", "FL"];
/// (title, base USD salary)
const JOBS: [(&str, f64); 8] = [
    ("Data Scientist", 120_000.0),
    ("Data Engineer", 115_000.0),
    ("Data Analyst", 85_000.0),
    ("Machine Learning Engineer", 135_000.0),
    ("Research Scientist", 140_000.0),
    ("Analytics Engineer", 110_000.0),
    ("Data Architect", 150_000.0),
    ("BI Developer", 80_000.0),
];
/// (country, currency, USD per unit, salary level)
const COUNTRIES: [(&str, &str, f64, f64); 6] = [
    ("US", "USD", 1.0, 1.0),
    ("GB", "GBP", 1.25, 0.7),
    ("DE", "EUR", 1.08, 0.65),
    ("IN", "INR", 0.012, 0.25),
    ("CA", "CAD", 0.74, 0.8),
    ("ES", "EUR", 1.08, 0.5),
];
const REMOTE: [i64; 3] = [0, 50, 100];
const SIZES: [&str; 3] = ["S", "M", "L"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Uniform pick, skewed towards the front when `bias` > 1.
    fn pick<'a, T>(&mut self, items: &'a [T], bias: f64) -> &'a T {
        let u = self.next_f64().powf(bias);
        let idx = ((u * items.len() as f64) as usize).min(items.len() - 1);
        &items[idx]
    }
}

fn generate(n: usize, rng: &mut SimpleRng) -> Vec<SalaryRecord> {
    (0..n)
        .map(|_| {
            let work_year = 2020 + (rng.next_u64() % 4) as i64;
            let &(experience_level, exp_factor) = rng.pick(&EXPERIENCE, 1.0);
            let &(job_title, base) = rng.pick(&JOBS, 1.6);
            let &(country, currency, usd_rate, level) = rng.pick(&COUNTRIES, 2.0);
            let employment_type = *rng.pick(&EMPLOYMENT, 6.0);

            let year_factor = 1.0 + 0.05 * (work_year - 2020) as f64;
            let usd = (base * exp_factor * level * year_factor * rng.gauss(1.0, 0.15))
                .max(5_000.0)
                .round();
            let local = (usd / usd_rate).round();

            // most people live where the company is
            let company_location = if rng.next_f64() < 0.9 {
                country
            } else {
                rng.pick(&COUNTRIES, 1.0).0
            };

            SalaryRecord {
                work_year,
                experience_level,
                employment_type,
                job_title,
                salary: local as i64,
                salary_currency: currency,
                salary_in_usd: usd as i64,
                employee_residence: country,
                remote_ratio: *rng.pick(&REMOTE, 1.0),
                company_location,
                company_size: *rng.pick(&SIZES, 1.0),
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ds_salaries.csv".to_string());
    let mut rng = SimpleRng::new(42);
    let records = generate(600, &mut rng);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    for record in &records {
        writer
            .serialize(record)
            .with_context(|| format!("writing {output_path}"))?;
    }
    writer.flush().with_context(|| format!("flushing {output_path}"))?;

    println!("Wrote {} salary records to {output_path}", records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let a = generate(20, &mut SimpleRng::new(7));
        let b = generate(20, &mut SimpleRng::new(7));
        let salaries = |rows: &[SalaryRecord]| rows.iter().map(|r| r.salary_in_usd).collect::<Vec<_>>();
        assert_eq!(salaries(&a), salaries(&b));
        assert!(a.iter().all(|r| (2020..=2023).contains(&r.work_year)));
        assert!(a.iter().all(|r| r.salary_in_usd >= 5_000));
    }
}

//! Write a synthetic passenger CSV with the Kaggle Titanic schema, for
//! trying the dashboard without the real dataset.

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

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a, T>(&mut self, options: &'a [T]) -> &'a T {
        &options[(self.next_u64() as usize) % options.len()]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let n = 500;

    let output_path = "titanic_sample.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "PassengerId",
            "Survived",
            "Pclass",
            "Sex",
            "Age",
            "SibSp",
            "Parch",
            "Fare",
            "Embarked",
        ])
        .expect("Failed to write header");

    for id in 1..=n {
        let class = *rng.pick(&[1u8, 2, 2, 3, 3, 3]);
        let sex = *rng.pick(&["male", "male", "male", "female", "female"]);

        // Roughly 5% missing ages, clamped to a plausible span.
        let age = if rng.chance(0.05) {
            None
        } else {
            Some(rng.gauss(30.0, 14.0).clamp(0.4, 80.0))
        };

        let siblings_spouses = if rng.chance(0.35) { rng.next_u64() % 3 + 1 } else { 0 };
        let parents_children = if rng.chance(0.25) { rng.next_u64() % 3 + 1 } else { 0 };

        let base_fare = match class {
            1 => 80.0,
            2 => 25.0,
            _ => 10.0,
        };
        let fare = (base_fare + rng.gauss(0.0, base_fare * 0.4)).max(0.0);

        // A couple of rows with an unknown embarkation port.
        let port = if rng.chance(0.01) {
            ""
        } else {
            *rng.pick(&["S", "S", "S", "C", "C", "Q"])
        };

        // Survival odds skewed by sex and class, as in the real data.
        let mut odds: f64 = if sex == "female" { 0.72 } else { 0.2 };
        odds += match class {
            1 => 0.15,
            2 => 0.05,
            _ => -0.05,
        };
        let survived = rng.chance(odds.clamp(0.02, 0.97));

        writer
            .write_record([
                id.to_string(),
                (survived as u8).to_string(),
                class.to_string(),
                sex.to_string(),
                age.map(|a| format!("{a:.1}")).unwrap_or_default(),
                siblings_spouses.to_string(),
                parents_children.to_string(),
                format!("{fare:.4}"),
                port.to_string(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n} passengers to {output_path}");
}

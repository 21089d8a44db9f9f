use std::f64::consts::PI;

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
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// Monthly incident count: yearly baseline with a seasonal swing peaking in
/// `peak_month`, a slow upward trend, and noise. Clamped at zero.
fn monthly_count(
    base: f64,
    amplitude: f64,
    peak_month: u32,
    months_elapsed: u32,
    month: u32,
    rng: &mut SimpleRng,
) -> u32 {
    let phase = 2.0 * PI * (month as f64 - peak_month as f64) / 12.0;
    let seasonal = amplitude * phase.cos();
    let trend = 0.02 * base * months_elapsed as f64 / 12.0;
    let noisy = rng.gauss(base + seasonal + trend, 0.08 * base);
    noisy.round().max(0.0) as u32
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (class, yearly baseline, seasonal amplitude, peak month)
    let classes: [(&str, f64, f64, u32); 5] = [
        ("Birds", 40.0, 18.0, 6),
        ("Cats", 90.0, 25.0, 7),
        ("Dogs", 65.0, 10.0, 8),
        ("Raccoons", 25.0, 12.0, 5),
        ("Reptiles", 8.0, 4.0, 7),
    ];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["Animal Class", "year", "month", "count"])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for &(class, base, amplitude, peak_month) in &classes {
        let mut months_elapsed = 0;
        for year in 2021..=2024 {
            for month in 1..=12 {
                let count = monthly_count(base, amplitude, peak_month, months_elapsed, month, &mut rng);
                writer
                    .write_record([
                        class,
                        &year.to_string(),
                        &month.to_string(),
                        &count.to_string(),
                    ])
                    .expect("Failed to write row");
                months_elapsed += 1;
                rows += 1;
            }
        }
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {rows} rows for {} classes to {output_path}", classes.len());
}

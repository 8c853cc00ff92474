use anyhow::{Context, Result};

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Spell a region the way hand-typed spreadsheets do.
fn messy_case(region: &str, rng: &mut SimpleRng) -> String {
    match rng.next_u64() % 4 {
        0 => region.to_lowercase(),
        1 => region.to_uppercase(),
        2 => format!(" {region} "),
        _ => region.to_string(),
    }
}

/// Format an amount with thousands separators about a third of the time.
fn messy_amount(amount: f64, rng: &mut SimpleRng) -> String {
    let whole = amount.round() as i64;
    if rng.next_u64() % 3 == 0 {
        let digits = whole.to_string();
        let mut out = String::new();
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    } else {
        whole.to_string()
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let regions = ["North", "South", "East", "West", "Central"];
    let products = ["Widget", "Gadget", "Gizmo", "Doohickey"];
    let reps = ["Alice", "Bob", "Chen", "Dana", "Eli", "Fatima"];

    let output_path = "sample_sales.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Region", "Product", "Rep", "Units", "Revenue"])?;

    let rows = 200;
    for _ in 0..rows {
        let region = messy_case(rng.pick(&regions), &mut rng);
        let product = rng.pick(&products);
        let rep = rng.pick(&reps);
        let units = 1 + (rng.next_f64() * 50.0) as u32;
        let price = 20.0 + rng.next_f64() * 480.0;

        // Roughly 5% of revenue cells are unusable.
        let revenue = if rng.next_f64() < 0.05 {
            "n/a".to_string()
        } else {
            messy_amount(units as f64 * price, &mut rng)
        };

        let units = units.to_string();
        writer.write_record([region.as_str(), product, rep, units.as_str(), revenue.as_str()])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} sales rows to {output_path}");
    Ok(())
}

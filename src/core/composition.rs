#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Composition {
    pub gc_percent: f64,
    pub at_percent: f64,
}

// Case-sensitive: only uppercase A/C/G/T are counted, so ambiguity codes
// such as N fall outside the denominator.
pub fn gc_at_content(sequence: &[u8]) -> Composition {
    let mut gc: u64 = 0;
    let mut at: u64 = 0;
    for &base in sequence {
        match base {
            b'G' | b'C' => gc += 1,
            b'A' | b'T' => at += 1,
            _ => {}
        }
    }
    let total = gc + at;
    if total == 0 {
        return Composition {
            gc_percent: 0.0,
            at_percent: 0.0,
        };
    }
    Composition {
        gc_percent: round2(gc as f64 * 100.0 / total as f64),
        at_percent: round2(at as f64 * 100.0 / total as f64),
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

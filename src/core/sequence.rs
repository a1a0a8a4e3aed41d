const COMPLEMENT: [u8; 256] = build_complement_table();

// Watson-Crick pairs plus the pairwise IUPAC ambiguity codes, both cases.
// W, S, N and anything outside the table map to themselves.
const fn build_complement_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }
    let pairs: [(u8, u8); 6] = [
        (b'A', b'T'),
        (b'C', b'G'),
        (b'R', b'Y'),
        (b'K', b'M'),
        (b'B', b'V'),
        (b'D', b'H'),
    ];
    let mut p = 0;
    while p < pairs.len() {
        let (a, b) = pairs[p];
        table[a as usize] = b;
        table[b as usize] = a;
        table[a.to_ascii_lowercase() as usize] = b.to_ascii_lowercase();
        table[b.to_ascii_lowercase() as usize] = a.to_ascii_lowercase();
        p += 1;
    }
    table
}

pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .chars()
        .rev()
        .map(|c| {
            if c.is_ascii() {
                COMPLEMENT[c as usize] as char
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_complements_plain_dna() {
        assert_eq!(reverse_complement("ATGC"), "GCAT");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn is_an_involution_over_nucleotides() {
        let sequence = "ATTGCCNAGT";
        assert_eq!(reverse_complement(&reverse_complement(sequence)), sequence);
    }

    #[test]
    fn preserves_case() {
        assert_eq!(reverse_complement("atgc"), "gcat");
        assert_eq!(reverse_complement("AcGt"), "aCgT");
    }

    #[test]
    fn complements_iupac_ambiguity_codes() {
        assert_eq!(reverse_complement("RYKM"), "KMRY");
        assert_eq!(reverse_complement("WSN"), "NSW");
        assert_eq!(reverse_complement("BDHV"), "BDHV");
    }

    #[test]
    fn unknown_characters_pass_through() {
        assert_eq!(reverse_complement("AT-GC"), "GC-AT");
        assert_eq!(reverse_complement("A*T"), "A*T");
    }
}

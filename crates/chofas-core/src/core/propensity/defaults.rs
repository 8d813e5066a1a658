use phf::{Map, phf_map};

/// Chou–Fasman helix propensities (Pa), keyed by one-letter code.
pub(crate) static HELIX_PROPENSITY: Map<char, f64> = phf_map! {
    'E' => 1.53, 'A' => 1.45, 'L' => 1.34, 'H' => 1.24, 'M' => 1.20,
    'Q' => 1.17, 'W' => 1.14, 'V' => 1.14, 'F' => 1.12, 'K' => 1.07,
    'I' => 1.00, 'D' => 0.98, 'T' => 0.82, 'S' => 0.79, 'R' => 0.79,
    'C' => 0.77, 'N' => 0.73, 'Y' => 0.61, 'P' => 0.59, 'G' => 0.53,
};

/// Chou–Fasman strand propensities (Pb), keyed by one-letter code.
pub(crate) static STRAND_PROPENSITY: Map<char, f64> = phf_map! {
    'M' => 1.67, 'V' => 1.65, 'I' => 1.60, 'C' => 1.30, 'Y' => 1.29,
    'F' => 1.28, 'Q' => 1.23, 'L' => 1.22, 'T' => 1.20, 'W' => 1.19,
    'A' => 0.97, 'R' => 0.90, 'G' => 0.81, 'D' => 0.80, 'K' => 0.74,
    'S' => 0.72, 'H' => 0.71, 'N' => 0.65, 'P' => 0.62, 'E' => 0.26,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::residue::AminoAcid;

    #[test]
    fn both_tables_cover_every_standard_residue() {
        for aa in AminoAcid::ALL {
            assert!(HELIX_PROPENSITY.contains_key(&aa.code()), "Pa missing for {aa}");
            assert!(STRAND_PROPENSITY.contains_key(&aa.code()), "Pb missing for {aa}");
        }
        assert_eq!(HELIX_PROPENSITY.len(), 20);
        assert_eq!(STRAND_PROPENSITY.len(), 20);
    }

    #[test]
    fn well_known_formers_have_expected_values() {
        assert_eq!(HELIX_PROPENSITY.get(&'E'), Some(&1.53));
        assert_eq!(STRAND_PROPENSITY.get(&'M'), Some(&1.67));
        assert_eq!(HELIX_PROPENSITY.get(&'G'), Some(&0.53));
        assert_eq!(STRAND_PROPENSITY.get(&'E'), Some(&0.26));
    }
}

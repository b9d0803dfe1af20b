//! Pitch resolution properties over the whole piano-and-up range.

use assert_approx_eq::assert_approx_eq;

use notewave::pitch::{PitchResolver, TABLE_HIGHEST_MIDI, TABLE_LOWEST_MIDI};

fn resolver() -> PitchResolver {
    PitchResolver::default()
}

#[test]
fn canonical_names_resolve_to_equal_temperament() {
    let r = resolver();
    for midi in TABLE_LOWEST_MIDI..=TABLE_HIGHEST_MIDI {
        let name = r.to_canonical_name(midi).to_string();
        let freq = r.to_frequency(r.parse(&name).unwrap());
        let expected = 440.0 * 2f64.powf((midi - 69) as f64 / 12.0);
        assert!(
            ((freq - expected) / expected).abs() < 1e-9,
            "{name}: {freq} vs {expected}"
        );
    }
}

#[test]
fn reference_frequencies() {
    let r = resolver();
    assert_eq!(r.to_frequency(r.parse("A4").unwrap()), 440.0);
    assert_approx_eq!(r.to_frequency(r.parse("C4").unwrap()), 261.6255653005986, 1e-9);
    assert_eq!(r.pitch_to_freq("rest").unwrap(), 0.0);
}

#[test]
fn enharmonic_pairs_are_bit_identical() {
    let r = resolver();
    let pairs = [
        ("E#4", "F4"),
        ("Bbb3", "A3"),
        ("Fx4", "G4"),
        ("Cb4", "B4"),
        ("B#3", "C3"),
        ("Db5", "C#5"),
        ("Gx2", "A2"),
        ("Ebb6", "D6"),
    ];
    for (a, b) in pairs {
        let fa = r.pitch_to_freq(a).unwrap();
        let fb = r.pitch_to_freq(b).unwrap();
        assert_eq!(fa.to_bits(), fb.to_bits(), "{a} vs {b}");
    }
}

#[test]
fn canonicalisation_is_idempotent() {
    let r = resolver();
    for midi in TABLE_LOWEST_MIDI..=TABLE_HIGHEST_MIDI {
        let once = r.to_canonical_name(midi);
        let twice = r.to_canonical_name(r.parse(&once.to_string()).unwrap());
        assert_eq!(once, twice);
    }
}

#[test]
fn frequencies_strictly_increase() {
    let r = resolver();
    for midi in TABLE_LOWEST_MIDI..TABLE_HIGHEST_MIDI {
        assert!(r.to_frequency(midi + 1) > r.to_frequency(midi));
    }
}

#[test]
fn table_matches_resolver() {
    let r = resolver();
    let table = r.frequency_table();
    assert_eq!(table.len(), 108);
    assert_eq!(table["rest"], 0.0);
    assert_eq!(table["A4"], 440.0);
    for (name, &freq) in &table {
        assert_eq!(r.pitch_to_freq(name).unwrap(), freq, "{name}");
    }
}

#[test]
fn alternative_tuning_shifts_everything() {
    let r = PitchResolver::new(69, 432.0);
    assert_eq!(r.pitch_to_freq("A4").unwrap(), 432.0);
    assert_approx_eq!(r.pitch_to_freq("A5").unwrap(), 864.0, 1e-9);
}

//! Full pipeline integration tests: notation → measures → timeline → synthesis → effects → WAV.
//!
//! Nothing here needs audio hardware.

use std::sync::atomic::AtomicBool;

use notewave::audio::{load_wav, save_wav};
use notewave::effects::{distortion, echo, reverb, Effect};
use notewave::notation::{align_measures, parse_measures, Fraction, NoteToken, Validation};
use notewave::synth::SAMPLE_RATE;
use notewave::{compose, Instrument, Library, PitchResolver, Renderer, Synthesizer, Tempo, TimeSignature, Timeline};

const SEED: u64 = 42;

fn renderer() -> Renderer {
    Renderer::new(TimeSignature::COMMON).with_synthesizer(Synthesizer::new(SEED))
}

fn tempo(bpm: f64) -> Tempo {
    Tempo::new(bpm).unwrap()
}

// =============================================================================
// Measures
// =============================================================================

#[test]
fn two_full_measures_pass_strict_validation() {
    let beats = TimeSignature::COMMON.beats_per_measure();
    let mut measures = parse_measures("C4/4 E4/4 G4/4 C5/4 | F4/4 F4/4 F4/4 F4/4");
    assert_eq!(measures.len(), 2);
    for m in &mut measures {
        assert_eq!(m.len(), 4);
        assert!(m.notes.iter().all(|n| n.value == Fraction::new(1, 4)));
        assert_eq!(m.total(), Some(Fraction::ONE));
        assert!(m.validate(beats, Validation::Strict));
    }
}

#[test]
fn solve_pads_single_quarter_with_three_quarter_rest() {
    let measures = align_measures("C4/4", TimeSignature::COMMON);
    assert_eq!(measures[0].len(), 2);
    assert_eq!(measures[0].notes[1], NoteToken::rest(Fraction::new(3, 4)));
}

#[test]
fn multiline_notation_parses_like_single_line() {
    let one = parse_measures("C4/4 D4/4 E4/4 F4/4 | G4/1");
    let many = parse_measures("C4/4 D4/4\n  E4/4 F4/4 |\n\tG4/1\n");
    assert_eq!(one, many);
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn leading_rest_piece_has_exact_length_for_every_instrument() {
    for instrument in Instrument::ALL {
        let mut r = renderer();
        let buf = r.render("rest/4 C4/4 D4/4 E4/4", tempo(60.0), instrument, 0.5);
        assert_eq!(buf.len(), 4 * SAMPLE_RATE as usize, "{instrument}");
        // The leading quarter rest is one second of silence.
        assert!(
            buf.samples()[..SAMPLE_RATE as usize].iter().all(|&s| s == 0.0),
            "{instrument}"
        );
    }
}

#[test]
fn composed_length_is_sum_of_rounded_event_lengths() {
    let resolver = PitchResolver::default();
    let notation = "C4/8+16 D4/16 E4/3 | rest/7 G4/4";
    let events: Vec<_> = Timeline::new(parse_measures(notation), tempo(97.0), &resolver).collect();
    let expected: usize = events
        .iter()
        .map(|e| (e.seconds * SAMPLE_RATE as f64).round() as usize)
        .sum();

    let mut synth = Synthesizer::new(SEED);
    let buf = compose(&mut synth, events, Instrument::Bell, 0.5);
    assert_eq!(buf.len(), expected);
}

#[test]
fn seeded_renders_are_reproducible() {
    let notation = "C4/8 E4/8 G4/8 C5/8 | rest/4 G4/4 E4/2";
    for instrument in [Instrument::Guitar, Instrument::Drum, Instrument::Flute] {
        let a = renderer().render(notation, tempo(140.0), instrument, 0.7);
        let b = renderer().render(notation, tempo(140.0), instrument, 0.7);
        assert_eq!(a, b, "{instrument}");
    }
}

#[test]
fn enharmonic_spellings_render_identically() {
    let mut a = renderer();
    let mut b = renderer();
    let sharp = a.render("C#4/4 E#4/4 Fx4/4", tempo(120.0), Instrument::Organ, 0.5);
    let flat = b.render("Db4/4 F4/4 G4/4", tempo(120.0), Instrument::Organ, 0.5);
    assert_eq!(sharp, flat);
}

#[test]
fn canonized_piece_round_trips() {
    let r = renderer();
    let notation = "Cb4/4 B#3/8+8 | rest/8+8+4 Ebb4/2";
    let canonical = r.canonize(notation);
    assert_eq!(canonical, "B4/4 C3/4 | rest/2 D4/2");
    assert_eq!(r.canonize(&canonical), canonical);
}

#[test]
fn out_of_range_octave_renders_silence() {
    let mut r = renderer();
    let buf = r.render("C9999/4", tempo(240.0), Instrument::Sine, 0.5);
    assert_eq!(buf.len(), 11025);
    assert!(buf.samples().iter().all(|&s| s == 0.0));
}

#[test]
fn canonized_decimal_length_round_trips() {
    let r = renderer();
    let canonical = r.canonize("C4/24.2 | D4/2+3");
    let before = parse_measures("C4/24.2 | D4/2+3");
    let after = parse_measures(&canonical);
    let values = |ms: &[notewave::Measure]| -> Vec<Fraction> {
        ms.iter().flat_map(|m| m.notes.iter().map(|n| n.value)).collect()
    };
    assert_eq!(values(&after), values(&before));
}

#[test]
fn interrupted_render_is_a_prefix() {
    let stop = AtomicBool::new(true);
    let mut r = renderer();
    let partial = r.render_until("C4/4 D4/4", tempo(120.0), Instrument::Sine, 0.5, &stop);
    assert!(partial.is_empty());
}

#[test]
fn builtin_compositions_render() {
    let library = Library::builtin();
    let stop = AtomicBool::new(false);
    for piece in library.all() {
        let mut r = renderer();
        let buf = r.render_composition(piece, &stop).unwrap();
        assert!(!buf.is_empty(), "{}", piece.name);
        assert!(buf.peak() > 0.0, "{}", piece.name);
        assert_eq!(r.time_signature(), piece.time_signature().unwrap());
    }
}

// =============================================================================
// Effects and persistence
// =============================================================================

#[test]
fn effects_keep_length_and_distortion_stays_in_range() {
    let mut r = renderer();
    let dry = r.render("A3/4 C4/4 E4/4 A4/4", tempo(120.0), Instrument::Bass, 1.0);

    assert_eq!(echo(&dry, 0.15, 0.5).len(), dry.len());
    assert_eq!(reverb(&dry, 0.4).len(), dry.len());

    let wet = distortion(&dry, 50.0);
    assert!(wet.samples().iter().all(|s| (-1.0..=1.0).contains(s)));
}

#[test]
fn effect_chain_then_wav_round_trip() {
    let mut r = renderer();
    let dry = r.render("C4/4 E4/4 G4/2", tempo(120.0), Instrument::Piano, 0.9);
    let wet = [Effect::echo(), Effect::reverb()]
        .iter()
        .fold(dry.clone(), |buf, fx| fx.apply(&buf));
    assert_eq!(wet.len(), dry.len());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("piece.wav");
    save_wav(&path, &wet).unwrap();
    let back = load_wav(&path).unwrap();
    assert_eq!(back.len(), wet.len());
    assert_eq!(back.sample_rate(), SAMPLE_RATE);
    assert!(back.peak() <= 1.0);
}

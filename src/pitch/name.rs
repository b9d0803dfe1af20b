//! Pitch name parsing. Converts "C4", "Eb5", "Fx4", "Bbb3" to MIDI note numbers.

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;

/// Natural note letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Case-insensitive letter lookup.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    /// Semitones above C.
    pub fn pitch_class(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// A single accidental symbol. Several may follow one letter (`Bbb`, `F#x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Sharp,
    Flat,
    DoubleSharp,
}

impl Accidental {
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            'x' => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    pub fn semitones(self) -> i32 {
        match self {
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
            Accidental::DoubleSharp => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Accidental::Sharp => '#',
            Accidental::Flat => 'b',
            Accidental::DoubleSharp => 'x',
        }
    }
}

/// Sharp-only spellings indexed by pitch class.
const CANONICAL_SPELLINGS: [(Letter, Option<Accidental>); 12] = [
    (Letter::C, None),
    (Letter::C, Some(Accidental::Sharp)),
    (Letter::D, None),
    (Letter::D, Some(Accidental::Sharp)),
    (Letter::E, None),
    (Letter::F, None),
    (Letter::F, Some(Accidental::Sharp)),
    (Letter::G, None),
    (Letter::G, Some(Accidental::Sharp)),
    (Letter::A, None),
    (Letter::A, Some(Accidental::Sharp)),
    (Letter::B, None),
];

/// A spelled pitch: letter, accidentals in written order, octave.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PitchName {
    pub letter: Letter,
    pub accidentals: Vec<Accidental>,
    pub octave: i32,
}

impl PitchName {
    /// MIDI note number: `(octave + 1) * 12 + pitch class`.
    ///
    /// Accidentals wrap within the octave rather than crossing it, so `Cb4`
    /// lands on 71 and `Bx3` on 49.
    pub fn midi(&self) -> i32 {
        let shift: i32 = self.accidentals.iter().map(|a| a.semitones()).sum();
        let pitch_class = (self.letter.pitch_class() + shift).rem_euclid(12);
        (self.octave + 1) * 12 + pitch_class
    }

    /// Sharp-only spelling of a MIDI note number (60 → `C4`, 61 → `C#4`).
    pub fn canonical(midi: i32) -> Self {
        let (letter, accidental) = CANONICAL_SPELLINGS[midi.rem_euclid(12) as usize];
        Self {
            letter,
            accidentals: accidental.into_iter().collect(),
            octave: midi.div_euclid(12) - 1,
        }
    }
}

impl fmt::Display for PitchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        for accidental in &self.accidentals {
            write!(f, "{}", accidental.symbol())?;
        }
        write!(f, "{}", self.octave)
    }
}

/// Format: `<letter><accidentals><octave>`
/// - Letter: A–G, either case
/// - Accidentals: any run of `#`, `b`, `x`
/// - Octave: one or more digits
impl FromStr for PitchName {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || NotationError::InvalidPitchFormat(token.to_string());
        let chars: Vec<char> = token.chars().collect();

        let letter = chars
            .first()
            .and_then(|&c| Letter::from_char(c))
            .ok_or_else(invalid)?;

        let digits_start = chars
            .iter()
            .position(|c| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        if !chars[digits_start..].iter().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let accidentals = chars[1..digits_start]
            .iter()
            .map(|&symbol| {
                Accidental::from_symbol(symbol).ok_or_else(|| {
                    NotationError::UnrecognizedAccidental {
                        token: token.to_string(),
                        symbol,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let octave: i32 = chars[digits_start..]
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| invalid())?;
        // Reject octaves whose MIDI number would not fit.
        octave
            .checked_add(1)
            .and_then(|o| o.checked_mul(12))
            .and_then(|m| m.checked_add(11))
            .ok_or_else(invalid)?;

        Ok(Self {
            letter,
            accidentals,
            octave,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midi(s: &str) -> i32 {
        s.parse::<PitchName>().unwrap().midi()
    }

    #[test]
    fn middle_c() {
        assert_eq!(midi("C4"), 60);
    }

    #[test]
    fn a4_concert() {
        assert_eq!(midi("A4"), 69);
    }

    #[test]
    fn lowercase_letter() {
        assert_eq!(midi("a4"), 69);
        assert_eq!(midi("bb3"), 58);
    }

    #[test]
    fn double_sharp() {
        assert_eq!(midi("Fx4"), 67);
        assert_eq!(midi("Cx5"), 74);
    }

    #[test]
    fn double_flat() {
        assert_eq!(midi("Bbb3"), 57);
    }

    #[test]
    fn mixed_accidentals_sum() {
        assert_eq!(midi("C#b4"), 60);
        assert_eq!(midi("Cx#4"), 63);
    }

    #[test]
    fn accidentals_wrap_within_octave() {
        assert_eq!(midi("Cb4"), 71);
        assert_eq!(midi("Bx3"), 49);
        assert_eq!(midi("B#3"), 48);
    }

    #[test]
    fn multi_digit_octave() {
        assert_eq!(midi("C10"), 132);
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        assert_eq!(midi("  G4 "), 67);
    }

    #[test]
    fn invalid_empty() {
        assert!(matches!(
            "".parse::<PitchName>(),
            Err(NotationError::InvalidPitchFormat(_))
        ));
    }

    #[test]
    fn invalid_letter() {
        assert!(matches!(
            "H4".parse::<PitchName>(),
            Err(NotationError::InvalidPitchFormat(_))
        ));
    }

    #[test]
    fn invalid_no_octave() {
        assert!(matches!(
            "C#".parse::<PitchName>(),
            Err(NotationError::InvalidPitchFormat(_))
        ));
    }

    #[test]
    fn invalid_trailing_garbage() {
        assert!(matches!(
            "C4x".parse::<PitchName>(),
            Err(NotationError::InvalidPitchFormat(_))
        ));
    }

    #[test]
    fn rest_is_not_a_pitch() {
        assert!("rest".parse::<PitchName>().is_err());
    }

    #[test]
    fn unrecognized_accidental() {
        let err = "C$4".parse::<PitchName>().unwrap_err();
        assert_eq!(
            err,
            NotationError::UnrecognizedAccidental {
                token: "C$4".into(),
                symbol: '$'
            }
        );
    }

    #[test]
    fn uppercase_b_is_not_a_flat() {
        assert!(matches!(
            "BB3".parse::<PitchName>(),
            Err(NotationError::UnrecognizedAccidental { symbol: 'B', .. })
        ));
    }

    #[test]
    fn display_keeps_spelling() {
        assert_eq!("fx4".parse::<PitchName>().unwrap().to_string(), "Fx4");
        assert_eq!("Bbb3".parse::<PitchName>().unwrap().to_string(), "Bbb3");
    }

    #[test]
    fn canonical_spellings() {
        assert_eq!(PitchName::canonical(60).to_string(), "C4");
        assert_eq!(PitchName::canonical(61).to_string(), "C#4");
        assert_eq!(PitchName::canonical(21).to_string(), "A0");
        assert_eq!(PitchName::canonical(127).to_string(), "G9");
        assert_eq!(PitchName::canonical(11).to_string(), "B-1");
    }
}

//! Character classification used by the matcher and the fallback rules

/// Coarse class of a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// ASCII or full-width Latin letter
    Letter,
    /// ASCII or full-width decimal digit
    Digit,
    /// Any Unicode whitespace, including the ideographic space
    Whitespace,
    /// ASCII, general, CJK or full-width punctuation
    Punctuation,
    /// Everything else: ideographs, kana, symbols, control characters
    Other,
}

impl CharClass {
    /// Classify a character
    pub fn of(ch: char) -> Self {
        if ch.is_whitespace() {
            CharClass::Whitespace
        } else if ch.is_ascii_alphabetic() || matches!(ch, 'Ａ'..='Ｚ' | 'ａ'..='ｚ') {
            CharClass::Letter
        } else if ch.is_ascii_digit() || matches!(ch, '０'..='９') {
            CharClass::Digit
        } else if is_punctuation(ch) {
            CharClass::Punctuation
        } else {
            CharClass::Other
        }
    }

    /// Letters and digits coalesce into runs
    pub fn is_alphanumeric(self) -> bool {
        matches!(self, CharClass::Letter | CharClass::Digit)
    }
}

fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation()
        || matches!(ch,
            '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{205E}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3011}'
            | '\u{3014}'..='\u{301F}'
            | '\u{30FB}'
            | '\u{FE10}'..='\u{FE19}'
            | '\u{FE30}'..='\u{FE4F}'
            | '\u{FF01}'..='\u{FF0F}'
            | '\u{FF1A}'..='\u{FF20}'
            | '\u{FF3B}'..='\u{FF40}'
            | '\u{FF5B}'..='\u{FF65}')
}

/// End of the alphanumeric run that contains `pos`, scanning up to `limit`
pub(crate) fn run_end(chars: &[char], pos: usize, limit: usize) -> usize {
    let mut end = pos;
    while end < limit && CharClass::of(chars[end]).is_alphanumeric() {
        end += 1;
    }
    end
}

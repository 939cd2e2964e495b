use std::collections::{HashMap, HashSet};

/// Every rule shortens the word, so this bound is never reached in practice.
const MAX_PASSES: usize = 32;

const IRREGULAR: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("doing", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("going", "go"),
    ("made", "make"),
    ("said", "say"),
    ("says", "say"),
    ("got", "get"),
    ("gotten", "get"),
    ("gave", "give"),
    ("given", "give"),
    ("took", "take"),
    ("taken", "take"),
    ("came", "come"),
    ("saw", "see"),
    ("seen", "see"),
    ("knew", "know"),
    ("known", "know"),
    ("found", "find"),
    ("thought", "think"),
    ("told", "tell"),
    ("became", "become"),
    ("felt", "feel"),
    ("kept", "keep"),
    ("began", "begin"),
    ("begun", "begin"),
    ("brought", "bring"),
    ("bought", "buy"),
    ("built", "build"),
    ("sent", "send"),
    ("spent", "spend"),
    ("paid", "pay"),
    ("held", "hold"),
    ("stood", "stand"),
    ("understood", "understand"),
    ("wrote", "write"),
    ("written", "write"),
    ("ran", "run"),
    ("sat", "sit"),
    ("met", "meet"),
    ("led", "lead"),
    ("lost", "lose"),
    ("won", "win"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("heard", "hear"),
    ("meant", "mean"),
    ("taught", "teach"),
    ("caught", "catch"),
    ("sought", "seek"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("used", "use"),
    ("uses", "use"),
    ("using", "use"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("selves", "self"),
];

/// Words that look inflected but are already base forms.
const BASE_FORMS: &[&str] = &[
    "news", "series", "species", "always", "perhaps", "thus", "yes", "this", "his", "its",
    "thing", "nothing", "something", "anything", "everything", "morning", "evening",
    "ceiling", "king", "ring", "sing", "string", "spring", "wing", "bring", "during",
    "building", "meeting", "hearing", "need", "speed", "seed", "feed", "bleed", "breed",
    "red", "bed", "shed", "hundred", "sacred", "naked", "wicked", "embed", "indeed",
    "united", "analysis", "basis", "thesis", "crisis", "status", "campus", "bonus", "focus",
    "bus", "gas", "atlas", "canvas", "lens", "physics", "politics", "economics",
    "mathematics", "whereas", "towards", "afterwards", "sometimes", "besides", "various",
    "previous", "serious", "famous",
];

/// Rule-based English lemmatizer
///
/// Irregular forms are resolved through a lookup table; everything else goes
/// through ordered suffix rules (possessive, plural, `-ing`, `-ed`). Rules are
/// re-applied until the word stops changing, so the lemma of a lemma is
/// itself. Input is expected to be lower-cased.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    base_forms: HashSet<&'static str>,
}

impl Lemmatizer {
    pub fn english() -> Self {
        let irregular: HashMap<_, _> = IRREGULAR.iter().copied().collect();
        let mut base_forms: HashSet<_> = BASE_FORMS.iter().copied().collect();
        base_forms.extend(irregular.values().copied());
        Self {
            irregular,
            base_forms,
        }
    }

    /// Reduce `token` to its base form
    pub fn lemmatize(&self, token: &str) -> String {
        let mut current = token.to_string();
        for _ in 0..MAX_PASSES {
            match self.rewrite(&current) {
                Some(next) if next != current => current = next,
                _ => break,
            }
        }
        current
    }

    fn rewrite(&self, word: &str) -> Option<String> {
        if self.base_forms.contains(word) {
            return None;
        }
        if let Some(lemma) = self.irregular.get(word) {
            return Some((*lemma).to_string());
        }
        if let Some(stem) = word
            .strip_suffix("'s")
            .or_else(|| word.strip_suffix("\u{2019}s"))
        {
            return (!stem.is_empty()).then(|| stem.to_string());
        }
        if word.chars().count() <= 3
            || !word.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\'')
        {
            return None;
        }

        strip_plural(word)
            .or_else(|| strip_ing(word))
            .or_else(|| strip_ed(word))
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

fn strip_plural(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ies") {
        return (stem.chars().count() >= 2).then(|| format!("{stem}y"));
    }
    if word.ends_with("sses") {
        return word.strip_suffix("es").map(str::to_string);
    }
    for suffix in ["xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word.strip_suffix("es").map(str::to_string);
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    word.strip_suffix('s').map(str::to_string)
}

fn strip_ing(word: &str) -> Option<String> {
    let stem = word.strip_suffix("ing")?;
    restore_stem(stem)
}

fn strip_ed(word: &str) -> Option<String> {
    if word.ends_with("eed") {
        return None;
    }
    if let Some(stem) = word.strip_suffix("ied") {
        return (stem.chars().count() >= 2).then(|| format!("{stem}y"));
    }
    let stem = word.strip_suffix("ed")?;
    restore_stem(stem)
}

/// Undo consonant doubling or restore a dropped final `e` after removing `-ing`/`-ed`.
fn restore_stem(stem: &str) -> Option<String> {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() < 3
        || !chars.iter().any(|&c| is_vowel(c) || c == 'y')
        || !chars.last().is_some_and(|c| c.is_alphabetic())
    {
        return None;
    }

    let n = chars.len();
    let last = chars[n - 1];
    if n >= 4 && last == chars[n - 2] && !is_vowel(last) && !matches!(last, 'l' | 's' | 'z') {
        return Some(chars[..n - 1].iter().collect());
    }
    if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
        return Some(format!("{stem}e"));
    }
    if measure(&chars) == 1 && ends_cvc(&chars) {
        return Some(format!("{stem}e"));
    }
    Some(stem.to_string())
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(chars: &[char], i: usize) -> bool {
    match chars[i] {
        c if is_vowel(c) => false,
        'y' => i == 0 || !is_consonant(chars, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant sequences in the stem.
fn measure(chars: &[char]) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..chars.len() {
        let consonant = is_consonant(chars, i);
        if consonant && prev_vowel {
            m += 1;
        }
        prev_vowel = !consonant;
    }
    m
}

fn ends_cvc(chars: &[char]) -> bool {
    let n = chars.len();
    if n < 3 {
        return false;
    }
    is_consonant(chars, n - 3)
        && !is_consonant(chars, n - 2)
        && is_consonant(chars, n - 1)
        && !matches!(chars[n - 1], 'w' | 'x' | 'y')
}

//! Light Spanish stemmer: one plural rule, then at most one derivational suffix.

/// Checked in this order; the first match wins.
const SUFFIXES: [&str; 11] = [
    "ción", "ciones", "mente", "dad", "dades", "ando", "endo", "ado", "ido", "aba", "ía",
];

pub fn stem(token: &str) -> String {
    let mut word = token.to_string();
    strip_plural(&mut word);
    strip_suffix(&mut word);
    word
}

fn char_len(word: &str) -> usize {
    word.chars().count()
}

fn strip_plural(word: &mut String) {
    let len = char_len(word);
    if word.ends_with("es") && len > 4 {
        word.truncate(word.len() - 2);
    } else if word.ends_with('s') && len > 3 {
        word.truncate(word.len() - 1);
    }
}

fn strip_suffix(word: &mut String) {
    let len = char_len(word);
    if let Some(suffix) = SUFFIXES
        .iter()
        .find(|s| word.ends_with(*s) && len > char_len(s) + 2)
    {
        word.truncate(word.len() - suffix.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_plurals() {
        assert_eq!(stem("cursos"), "curso");
        assert_eq!(stem("leyes"), "ley");
        assert_eq!(stem("tres"), "tre");
        // too short for either rule
        assert_eq!(stem("mes"), "mes");
    }

    #[test]
    fn strips_first_listed_suffix_only() {
        assert_eq!(stem("rápidamente"), "rápida");
        assert_eq!(stem("estudiando"), "estudi");
        assert_eq!(stem("ciudadado"), "ciudad");
        assert_eq!(stem("administraciones"), "administracion");
        assert_eq!(stem("administración"), "administra");
    }

    #[test]
    fn plural_runs_before_suffix() {
        // "pensabas" -> "pensaba" -> "pens"
        assert_eq!(stem("pensabas"), "pens");
        // re-stemming only applies the plural rule again
        assert_eq!(stem(&stem("pensabas")), "pen");
    }

    #[test]
    fn keeps_short_stems() {
        assert_eq!(stem("dad"), "dad");
        assert_eq!(stem("nado"), "nado");
        assert_eq!(stem("vía"), "vía");
    }

    #[test]
    fn unaccented_suffix_variants_do_not_match() {
        assert_eq!(stem("preparacion"), "preparacion");
        assert_eq!(stem("policia"), "policia");
    }
}

//! Character and entity reference decoding.
//!
//! `&name;` resolves through the HTML 4 entity table, `&#NNN;` and `&#xHH;`
//! through code-point conversion. Anything that does not resolve is left as
//! written.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9a-fA-F]+)|([A-Za-z][A-Za-z0-9]*));").expect("valid regex")
});

/// Entries replacing base table values. Non-breaking spaces become ordinary
/// spaces so whitespace collapsing and trimming treat them alike.
const OVERRIDES: &[(&str, char)] = &[("nbsp", ' ')];

/// Name → character table, built once from [`BASE_ENTITIES`] plus [`OVERRIDES`].
static ENTITIES: LazyLock<HashMap<&'static str, char>> = LazyLock::new(|| {
    let mut table: HashMap<&'static str, char> = BASE_ENTITIES.iter().copied().collect();
    table.extend(OVERRIDES.iter().copied());
    table
});

/// Look up a named entity (without `&` and `;`).
pub fn lookup_entity(name: &str) -> Option<char> {
    ENTITIES.get(name).copied()
}

/// Replace every resolvable reference in `text` with its literal character.
pub fn decode_refs(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    REF_RE
        .replace_all(text, |caps: &Captures| {
            let resolved = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(code_point)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(code_point)
            } else {
                caps.get(3).and_then(|name| lookup_entity(name.as_str()))
            };
            match resolved {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn code_point(n: u32) -> Option<char> {
    match char::from_u32(n)? {
        '\u{a0}' => Some(' '),
        c => Some(c),
    }
}

/// The HTML 4 named character entities.
const BASE_ENTITIES: &[(&str, char)] = &[
    ("quot", '"'), ("amp", '&'), ("lt", '<'), ("gt", '>'), ("apos", '\''),
    ("nbsp", '\u{a0}'), ("iexcl", '¡'), ("cent", '¢'), ("pound", '£'), ("curren", '¤'),
    ("yen", '¥'), ("brvbar", '¦'), ("sect", '§'), ("uml", '¨'), ("copy", '©'),
    ("ordf", 'ª'), ("laquo", '«'), ("not", '¬'), ("shy", '\u{ad}'), ("reg", '®'),
    ("macr", '¯'), ("deg", '°'), ("plusmn", '±'), ("sup2", '²'), ("sup3", '³'),
    ("acute", '´'), ("micro", 'µ'), ("para", '¶'), ("middot", '·'), ("cedil", '¸'),
    ("sup1", '¹'), ("ordm", 'º'), ("raquo", '»'), ("frac14", '¼'), ("frac12", '½'),
    ("frac34", '¾'), ("iquest", '¿'), ("Agrave", 'À'), ("Aacute", 'Á'), ("Acirc", 'Â'),
    ("Atilde", 'Ã'), ("Auml", 'Ä'), ("Aring", 'Å'), ("AElig", 'Æ'), ("Ccedil", 'Ç'),
    ("Egrave", 'È'), ("Eacute", 'É'), ("Ecirc", 'Ê'), ("Euml", 'Ë'), ("Igrave", 'Ì'),
    ("Iacute", 'Í'), ("Icirc", 'Î'), ("Iuml", 'Ï'), ("ETH", 'Ð'), ("Ntilde", 'Ñ'),
    ("Ograve", 'Ò'), ("Oacute", 'Ó'), ("Ocirc", 'Ô'), ("Otilde", 'Õ'), ("Ouml", 'Ö'),
    ("times", '×'), ("Oslash", 'Ø'), ("Ugrave", 'Ù'), ("Uacute", 'Ú'), ("Ucirc", 'Û'),
    ("Uuml", 'Ü'), ("Yacute", 'Ý'), ("THORN", 'Þ'), ("szlig", 'ß'), ("agrave", 'à'),
    ("aacute", 'á'), ("acirc", 'â'), ("atilde", 'ã'), ("auml", 'ä'), ("aring", 'å'),
    ("aelig", 'æ'), ("ccedil", 'ç'), ("egrave", 'è'), ("eacute", 'é'), ("ecirc", 'ê'),
    ("euml", 'ë'), ("igrave", 'ì'), ("iacute", 'í'), ("icirc", 'î'), ("iuml", 'ï'),
    ("eth", 'ð'), ("ntilde", 'ñ'), ("ograve", 'ò'), ("oacute", 'ó'), ("ocirc", 'ô'),
    ("otilde", 'õ'), ("ouml", 'ö'), ("divide", '÷'), ("oslash", 'ø'), ("ugrave", 'ù'),
    ("uacute", 'ú'), ("ucirc", 'û'), ("uuml", 'ü'), ("yacute", 'ý'), ("thorn", 'þ'),
    ("yuml", 'ÿ'), ("OElig", 'Œ'), ("oelig", 'œ'), ("Scaron", 'Š'), ("scaron", 'š'),
    ("Yuml", 'Ÿ'), ("fnof", 'ƒ'), ("circ", 'ˆ'), ("tilde", '˜'), ("Alpha", 'Α'),
    ("Beta", 'Β'), ("Gamma", 'Γ'), ("Delta", 'Δ'), ("Epsilon", 'Ε'), ("Zeta", 'Ζ'),
    ("Eta", 'Η'), ("Theta", 'Θ'), ("Iota", 'Ι'), ("Kappa", 'Κ'), ("Lambda", 'Λ'),
    ("Mu", 'Μ'), ("Nu", 'Ν'), ("Xi", 'Ξ'), ("Omicron", 'Ο'), ("Pi", 'Π'),
    ("Rho", 'Ρ'), ("Sigma", 'Σ'), ("Tau", 'Τ'), ("Upsilon", 'Υ'), ("Phi", 'Φ'),
    ("Chi", 'Χ'), ("Psi", 'Ψ'), ("Omega", 'Ω'), ("alpha", 'α'), ("beta", 'β'),
    ("gamma", 'γ'), ("delta", 'δ'), ("epsilon", 'ε'), ("zeta", 'ζ'), ("eta", 'η'),
    ("theta", 'θ'), ("iota", 'ι'), ("kappa", 'κ'), ("lambda", 'λ'), ("mu", 'μ'),
    ("nu", 'ν'), ("xi", 'ξ'), ("omicron", 'ο'), ("pi", 'π'), ("rho", 'ρ'),
    ("sigmaf", 'ς'), ("sigma", 'σ'), ("tau", 'τ'), ("upsilon", 'υ'), ("phi", 'φ'),
    ("chi", 'χ'), ("psi", 'ψ'), ("omega", 'ω'), ("thetasym", 'ϑ'), ("upsih", 'ϒ'),
    ("piv", 'ϖ'), ("ensp", '\u{2002}'), ("emsp", '\u{2003}'), ("thinsp", '\u{2009}'),
    ("zwnj", '\u{200c}'), ("zwj", '\u{200d}'), ("lrm", '\u{200e}'), ("rlm", '\u{200f}'),
    ("ndash", '–'), ("mdash", '—'), ("lsquo", '‘'), ("rsquo", '’'), ("sbquo", '‚'),
    ("ldquo", '“'), ("rdquo", '”'), ("bdquo", '„'), ("dagger", '†'), ("Dagger", '‡'),
    ("bull", '•'), ("hellip", '…'), ("permil", '‰'), ("prime", '′'), ("Prime", '″'),
    ("lsaquo", '‹'), ("rsaquo", '›'), ("oline", '‾'), ("frasl", '⁄'), ("euro", '€'),
    ("image", 'ℑ'), ("weierp", '℘'), ("real", 'ℜ'), ("trade", '™'), ("alefsym", 'ℵ'),
    ("larr", '←'), ("uarr", '↑'), ("rarr", '→'), ("darr", '↓'), ("harr", '↔'),
    ("crarr", '↵'), ("lArr", '⇐'), ("uArr", '⇑'), ("rArr", '⇒'), ("dArr", '⇓'),
    ("hArr", '⇔'), ("forall", '∀'), ("part", '∂'), ("exist", '∃'), ("empty", '∅'),
    ("nabla", '∇'), ("isin", '∈'), ("notin", '∉'), ("ni", '∋'), ("prod", '∏'),
    ("sum", '∑'), ("minus", '−'), ("lowast", '∗'), ("radic", '√'), ("prop", '∝'),
    ("infin", '∞'), ("ang", '∠'), ("and", '∧'), ("or", '∨'), ("cap", '∩'),
    ("cup", '∪'), ("int", '∫'), ("there4", '∴'), ("sim", '∼'), ("cong", '≅'),
    ("asymp", '≈'), ("ne", '≠'), ("equiv", '≡'), ("le", '≤'), ("ge", '≥'),
    ("sub", '⊂'), ("sup", '⊃'), ("nsub", '⊄'), ("sube", '⊆'), ("supe", '⊇'),
    ("oplus", '⊕'), ("otimes", '⊗'), ("perp", '⊥'), ("sdot", '⋅'), ("lceil", '⌈'),
    ("rceil", '⌉'), ("lfloor", '⌊'), ("rfloor", '⌋'), ("lang", '〈'), ("rang", '〉'),
    ("loz", '◊'), ("spades", '♠'), ("clubs", '♣'), ("hearts", '♥'), ("diams", '♦'),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_references() {
        assert_eq!(decode_refs("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_refs("Am&eacute;lie"), "Amélie");
        assert_eq!(decode_refs("&lt;b&gt;"), "<b>");
    }

    #[test]
    fn nbsp_becomes_plain_space() {
        assert_eq!(decode_refs("a&nbsp;b"), "a b");
        assert_eq!(decode_refs("a&#160;b"), "a b");
        assert_eq!(decode_refs("a&#xA0;b"), "a b");
    }

    #[test]
    fn numeric_references() {
        assert_eq!(decode_refs("&#233;t&#233;"), "été");
        assert_eq!(decode_refs("&#x263A;"), "☺");
    }

    #[test]
    fn unresolved_references_pass_through() {
        assert_eq!(decode_refs("&bogus; stays"), "&bogus; stays");
        assert_eq!(decode_refs("&#55296;"), "&#55296;");
        assert_eq!(decode_refs("&#99999999999;"), "&#99999999999;");
        assert_eq!(decode_refs("AT&T rocks"), "AT&T rocks");
    }

    #[test]
    fn idempotent_without_reference_syntax() {
        let plain = "No references here; just text & symbols.";
        assert_eq!(decode_refs(plain), plain);
        assert_eq!(decode_refs(&decode_refs(plain)), plain);
    }

    #[test]
    fn override_replaces_base_entry() {
        assert_eq!(lookup_entity("nbsp"), Some(' '));
        assert_eq!(lookup_entity("copy"), Some('©'));
        assert_eq!(lookup_entity("nope"), None);
    }
}

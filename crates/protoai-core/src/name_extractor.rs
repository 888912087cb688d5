//! Name Extractor — derives a short business label from a free-text idea.
//!
//! Rules run in priority order and the first one that yields a name wins:
//! a double-quoted name, then a phrase after "called"/"named", then the first
//! meaningful words of the idea. When nothing survives, [`FALLBACK_BUSINESS_NAME`].

/// Returned when the idea has no usable words at all.
pub const FALLBACK_BUSINESS_NAME: &str = "Your Business";

/// Idea-framing and filler words ignored by the word fallback (compared lowercase).
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "for", "to", "of", "in", "on", "at", "by", "with",
    "app", "website", "platform", "service", "business",
    "i", "want", "develop", "create", "build",
];

/// Keywords that introduce an explicit name ("a bakery called Sweet Crumbs").
const NAME_KEYWORDS: &[&str] = &["called", "named"];

const TOKEN_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Maximum number of words kept by the word fallback.
const MAX_NAME_WORDS: usize = 3;

type NameRule = fn(&str) -> Option<String>;

/// Ordered rule chain. Earlier rules take precedence even when later ones would match.
const RULES: &[NameRule] = &[quoted_name, keyword_phrase, meaningful_words];

/// Extracts a business name from the idea. Never fails and never returns a blank string.
pub fn extract_business_name(idea: &str) -> String {
    RULES
        .iter()
        .find_map(|rule| rule(idea))
        .unwrap_or_else(|| FALLBACK_BUSINESS_NAME.to_string())
}

/// Contents of the first `"..."` pair with non-blank content, verbatim.
fn quoted_name(idea: &str) -> Option<String> {
    // Quotes pair up left to right; a skipped blank pair consumes both of its marks.
    let quotes: Vec<usize> = idea.match_indices('"').map(|(i, _)| i).collect();
    quotes.chunks_exact(2).find_map(|pair| {
        let inner = &idea[pair[0] + 1..pair[1]];
        if inner.trim().is_empty() {
            None
        } else {
            Some(inner.to_string())
        }
    })
}

/// Phrase following the first "called"/"named" keyword that is followed by letters.
fn keyword_phrase(idea: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `idea`.
    let lower = idea.to_ascii_lowercase();
    let mut hits: Vec<(usize, usize)> = NAME_KEYWORDS
        .iter()
        .flat_map(|kw| lower.match_indices(kw).map(|(i, m)| (i, i + m.len())))
        .filter(|&(start, _)| {
            idea[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphabetic())
        })
        .collect();
    hits.sort_unstable();

    hits.into_iter()
        .find_map(|(_, end)| phrase_after_keyword(&idea[end..]))
}

/// `rest` starts right after the keyword. Requires at least one whitespace before the phrase.
fn phrase_after_keyword(rest: &str) -> Option<String> {
    let body = rest.trim_start();
    if body.len() == rest.len() {
        return None;
    }

    let stop = body
        .char_indices()
        .find(|&(_, c)| !(c.is_alphabetic() || c.is_whitespace()))
        .map_or(body.len(), |(i, _)| i);
    let words: Vec<&str> = body[..stop].split_whitespace().collect();
    let first = words.first()?;

    let kept: Vec<&str> = if starts_uppercase(first) {
        words.iter().copied().take_while(|w| starts_uppercase(w)).collect()
    } else {
        vec![*first]
    };
    Some(kept.join(" "))
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// First meaningful words of the idea, title-cased. `None` when every token is filtered out.
fn meaningful_words(idea: &str) -> Option<String> {
    let words: Vec<&str> = idea
        .split_whitespace()
        .map(|token| token.trim_matches(TOKEN_PUNCTUATION))
        .filter(|word| word.chars().count() > 2)
        .filter(|word| !STOP_WORDS.contains(&word.to_lowercase().as_str()))
        .take(MAX_NAME_WORDS)
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(title_case(&words.join(" ")))
    }
}

/// Uppercases the first letter of every word and lowercases the rest.
/// An apostrophe inside a word does not start a new word ("don't" -> "Don't").
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            in_word = in_word && c == '\'';
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_name_is_returned_verbatim() {
        assert_eq!(
            extract_business_name(r#"Build a store "Acme Corp" for pets"#),
            "Acme Corp"
        );
        assert_eq!(extract_business_name(r#"a shop "  lower case co " here"#), "  lower case co ");
    }

    #[test]
    fn quoted_name_beats_called_phrase() {
        assert_eq!(
            extract_business_name(r#"an app called Pixel Forge, branded "Forge Studio""#),
            "Forge Studio"
        );
    }

    #[test]
    fn empty_quotes_are_skipped() {
        assert_eq!(extract_business_name(r#"a "" store called Nook"#), "Nook");
    }

    #[test]
    fn blank_quote_pair_does_not_capture_text_between_pairs() {
        assert_eq!(extract_business_name(r#"a "" shop "Acme" here"#), "Acme");
        assert_eq!(extract_business_name(r#"a " " shop "Acme""#), "Acme");
    }

    #[test]
    fn called_phrase_keeps_capitalized_run() {
        assert_eq!(
            extract_business_name("an app called Pixel Forge for designers"),
            "Pixel Forge"
        );
    }

    #[test]
    fn named_phrase_stops_at_comma_and_period() {
        assert_eq!(
            extract_business_name("a bakery named Sweet Crumbs, open late"),
            "Sweet Crumbs"
        );
        assert_eq!(extract_business_name("a gym named Iron Den. Members only"), "Iron Den");
    }

    #[test]
    fn called_phrase_at_end_of_input() {
        assert_eq!(extract_business_name("a bookshop called Paper Trail"), "Paper Trail");
    }

    #[test]
    fn lowercase_called_phrase_keeps_first_word() {
        assert_eq!(extract_business_name("a tool called forge for artists"), "forge");
    }

    #[test]
    fn keyword_inside_another_word_is_ignored() {
        // "recalled" is not the keyword; falls through to the word rule.
        assert_eq!(
            extract_business_name("recalled memories journal"),
            "Recalled Memories Journal"
        );
    }

    #[test]
    fn keyword_followed_by_digits_falls_through() {
        assert_eq!(extract_business_name("named 42 things"), "Named Things");
    }

    #[test]
    fn word_fallback_filters_stop_words() {
        assert_eq!(
            extract_business_name("I want to create a website for selling handmade candles"),
            "Selling Handmade Candles"
        );
    }

    #[test]
    fn stop_words_are_case_insensitive_and_punctuation_stripped() {
        assert_eq!(extract_business_name("BUILD The App: organic, coffee!"), "Organic Coffee");
    }

    #[test]
    fn single_word_is_title_cased() {
        assert_eq!(extract_business_name("a platform for yoga"), "Yoga");
    }

    #[test]
    fn degenerate_idea_falls_back() {
        assert_eq!(extract_business_name("app website platform"), FALLBACK_BUSINESS_NAME);
        assert_eq!(extract_business_name("a b c"), FALLBACK_BUSINESS_NAME);
    }

    #[test]
    fn never_blank() {
        for idea in ["x", "...", "\"\"", "called", "named ,", "to be or not", "🙂 🙂 🙂"] {
            let name = extract_business_name(idea);
            assert!(!name.trim().is_empty(), "blank name for {idea:?}");
        }
    }

    #[test]
    fn title_case_handles_apostrophes() {
        assert_eq!(title_case("don't STOP believing"), "Don't Stop Believing");
    }
}

//! Escapes FTS-grammar special characters before handing a user query to
//! tantivy's query parser (spec §4.1).

const SPECIAL: &[char] = &['"', '\'', '(', ')', '{', '}', '[', ']', '*', '+', '-', ':', '^', '~'];

pub fn escape_fts_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_each_special_character() {
        let escaped = escape_fts_query("foo(bar)*baz");
        assert_eq!(escaped, r"foo\(bar\)\*baz");
    }

    #[test]
    fn leaves_plain_words_untouched() {
        assert_eq!(escape_fts_query("http request"), "http request");
    }
}

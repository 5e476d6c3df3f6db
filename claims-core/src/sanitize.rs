use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Elements whose text content must not survive stripping
    static ref DROP_CONTENT: Vec<Regex> = vec![
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap(),
        Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap(),
        Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe\s*>").unwrap(),
    ];

    /// Any remaining tag, opening or closing, attributes included
    static ref TAG: Regex = Regex::new(r"</?[^<>]+>").unwrap();
}

/// Strip markup from free-text input, keeping only text content, then trim
/// surrounding whitespace. Content of script/style/iframe elements is dropped
/// entirely rather than unwrapped. Stripping runs to a fixpoint, so the
/// function is idempotent even on overlapping tag fragments. Never fails;
/// empty input yields empty output.
pub fn sanitize(input: &str) -> String {
    let mut text = input.to_string();
    loop {
        let mut next = text.clone();
        for pattern in DROP_CONTENT.iter() {
            next = pattern.replace_all(&next, "").into_owned();
        }
        next = TAG.replace_all(&next, "").into_owned();
        if next == text {
            break;
        }
        text = next;
    }
    text.trim().to_string()
}

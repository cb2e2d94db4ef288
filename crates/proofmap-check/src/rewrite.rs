// Character rewrite rules applied to Normal token text before it enters the
// canonical string.

/// A pure per-character rewrite.
///
/// Implementations push the replacement for `c` onto `out`: the character
/// itself to keep it, something else to replace it, nothing to drop it.
pub trait RewriteRule: Send + Sync {
    fn rewrite(&self, c: char, out: &mut String);
}

/// Closures work as rules.
impl<F> RewriteRule for F
where
    F: Fn(char, &mut String) + Send + Sync,
{
    fn rewrite(&self, c: char, out: &mut String) {
        self(c, out)
    }
}

/// Replace one character with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceChar {
    pub from: char,
    pub to: char,
}

impl RewriteRule for ReplaceChar {
    fn rewrite(&self, c: char, out: &mut String) {
        out.push(if c == self.from { self.to } else { c });
    }
}

/// Replace one character with a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceWith {
    pub from: char,
    pub to: String,
}

impl RewriteRule for ReplaceWith {
    fn rewrite(&self, c: char, out: &mut String) {
        if c == self.from {
            out.push_str(&self.to);
        } else {
            out.push(c);
        }
    }
}

/// `\n` becomes a space so that hard-wrapped prose reads as one line.
pub fn newlines_to_spaces() -> ReplaceChar {
    ReplaceChar { from: '\n', to: ' ' }
}

/// No-break space becomes a plain space.
pub fn nbsp_to_space() -> ReplaceChar {
    ReplaceChar {
        from: '\u{00A0}',
        to: ' ',
    }
}

/// Run `text` through every rule, left to right. The output of one rule is
/// the input of the next.
pub fn apply_rules(text: &str, rules: &[Box<dyn RewriteRule>]) -> String {
    let mut current = text.to_string();
    for rule in rules {
        let mut next = String::with_capacity(current.len());
        for c in current.chars() {
            rule.rewrite(c, &mut next);
        }
        current = next;
    }
    current
}
